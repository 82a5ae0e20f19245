//! Shared view-model types for the Termchat transcript interpreters.

mod context;
mod cost;
mod notes;
mod transcript;

pub use context::*;
pub use cost::*;
pub use notes::*;
pub use transcript::*;
