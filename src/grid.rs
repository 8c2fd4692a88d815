//! The 4x4 color grid
//!
//! Cells are stored row-major as 16 color codes. Group boundaries (4 cells
//! each) only matter when formatting; they coincide with the grid rows.

use serde::Serialize;

use crate::codec;

/// Cells per row (and rows per grid).
pub const GRID_SIDE: usize = 4;

/// Total number of cells in a grid.
pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

/// A complete 16-cell grid. Always holds exactly [`GRID_CELLS`] codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<String>,
}

impl Grid {
    /// Build a grid from the first 16 codes, or `None` if there are fewer.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Option<Self> {
        if codes.len() < GRID_CELLS {
            return None;
        }
        Some(Self {
            cells: codes[..GRID_CELLS]
                .iter()
                .map(|c| c.as_ref().to_string())
                .collect(),
        })
    }

    /// A grid with every cell set to `code`.
    pub fn filled(code: &str) -> Self {
        Self {
            cells: vec![code.to_string(); GRID_CELLS],
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Replace a single cell. Returns `false` (and changes nothing) when out of range.
    pub(crate) fn set(&mut self, index: usize, code: String) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = code;
                true
            }
            None => false,
        }
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.chunks(GRID_SIDE)
    }

    /// All codes concatenated, e.g. `RDRDRD...`.
    pub fn concat(&self) -> String {
        codec::join(&self.cells)
    }

    /// The canonical order code for this grid.
    pub fn canonical_code(&self) -> String {
        codec::format(&self.concat())
    }
}
