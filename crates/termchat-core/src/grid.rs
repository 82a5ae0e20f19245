//! Context usage grid allocation.
//!
//! Turns the category breakdown of a [`ContextReport`] into a fixed
//! 100-cell grid, one cell per percent. Allocation is an explicit fold:
//! every category but the last rounds independently, and the last category
//! absorbs whatever remains so the grid always totals exactly 100 cells.
//! The source category order is a load-bearing input — whichever category
//! comes last receives the rounding correction.

use std::collections::HashMap;
use termchat_types::{ContextReport, GridCell};

/// Cells per grid row.
pub const GRID_COLS: usize = 10;
/// Total cells in a full grid, one per percent.
pub const GRID_CELLS: usize = 100;

/// Icon and color key for one category's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub icon: char,
    pub color: &'static str,
}

/// Pure icon/color lookup keyed by category name.
///
/// Injected into [`build_grid`] so allocation stays deterministic and
/// independently testable; unrecognized category names get the fallback
/// style. Lookup is case-insensitive.
#[derive(Debug, Clone)]
pub struct GridTheme {
    styles: HashMap<String, CellStyle>,
    fallback: CellStyle,
}

impl GridTheme {
    pub fn new(fallback: CellStyle) -> Self {
        Self {
            styles: HashMap::new(),
            fallback,
        }
    }

    /// Register a style for a category name.
    pub fn with_style(mut self, category: &str, icon: char, color: &'static str) -> Self {
        self.styles
            .insert(category.to_ascii_lowercase(), CellStyle { icon, color });
        self
    }

    pub fn style_for(&self, category: &str) -> CellStyle {
        self.styles
            .get(&category.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for GridTheme {
    /// Styles for the category names the hosted CLI currently prints.
    fn default() -> Self {
        Self::new(CellStyle {
            icon: '■',
            color: "muted",
        })
        .with_style("System prompt", '■', "violet")
        .with_style("System tools", '■', "blue")
        .with_style("MCP tools", '■', "cyan")
        .with_style("Custom agents", '■', "yellow")
        .with_style("Memory files", '■', "green")
        .with_style("Messages", '■', "orange")
        .with_style("Free space", '□', "gray")
    }
}

/// Allocate the 100-cell grid for a context report.
///
/// Every category except the last gets `round(percentage)` cells, forced up
/// to 1 when a nonzero percentage rounds to 0 so small categories stay
/// visible. The last category gets `100 − allocated`. A pathological input
/// (many forced-to-1 categories) can drive that remainder negative; it is
/// left unclamped and the last category simply emits no cells.
///
/// Empty `categories` yields an empty grid.
pub fn build_grid(report: &ContextReport, theme: &GridTheme) -> Vec<GridCell> {
    let categories = &report.categories;
    if categories.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::with_capacity(GRID_CELLS);
    let mut allocated: i64 = 0;
    let last = categories.len() - 1;

    for (i, category) in categories.iter().enumerate() {
        let count: i64 = if i == last {
            GRID_CELLS as i64 - allocated
        } else {
            let rounded = category.percentage.round() as i64;
            if rounded == 0 && category.percentage > 0.0 {
                1
            } else {
                rounded
            }
        };
        allocated += count;

        let style = theme.style_for(&category.name);
        for _ in 0..count {
            cells.push(GridCell {
                icon: style.icon,
                color: style.color.to_string(),
                category: category.name.clone(),
            });
        }
    }

    cells
}

/// Slice the flat cell sequence into display rows of [`GRID_COLS`].
///
/// The final row may be shorter than a full row; it is not padded.
pub fn to_rows(cells: &[GridCell]) -> Vec<Vec<GridCell>> {
    cells.chunks(GRID_COLS).map(|row| row.to_vec()).collect()
}
