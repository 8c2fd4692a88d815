//! Grid state manager
//!
//! Owns the current grid together with the values derived from it: the
//! canonical order code and the active label (a preset name or `"Custom"`).
//! Every mutation either replaces the whole selection consistently or leaves
//! it untouched.
//!
//! The editor starts by applying the first catalog preset; [`GridState::new`]
//! performs that transition, so a constructed `GridState` is always ready.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Preset, PresetCatalog};
use crate::codec::{self, CODE_SEPARATOR, CODE_WIDTH, GROUP_SEPARATOR};
use crate::grid::{Grid, GRID_CELLS};

/// Label shown when the grid matches no preset.
pub const CUSTOM_LABEL: &str = "Custom";

/// Errors from grid state operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The catalog has no preset to start from
    #[error("preset catalog is empty")]
    EmptyCatalog,
    /// The first catalog preset does not decode to a full grid
    #[error("starting preset '{0}' does not contain 16 color codes")]
    MalformedStartPreset(String),
    /// Custom code decoded to too few color codes.
    ///
    /// The message is the user-facing alert text, shown verbatim.
    #[error("Invalid code format. Please provide at least {required} color codes (found {found}).")]
    TooFewCodes { found: usize, required: usize },
    /// Cell index outside the grid
    #[error("cell index {0} out of range (0-15)")]
    CellOutOfRange(usize),
    /// Cell code is not exactly two non-delimiter characters
    #[error("color code '{0}' must be exactly 2 characters and contain no '_' or '/'")]
    InvalidCode(String),
}

/// Snapshot of what the editor is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSelection {
    pub grid: Grid,
    pub label: String,
    #[serde(rename = "code")]
    pub canonical_code: String,
}

impl ActiveSelection {
    /// Whether the grid matches no preset.
    pub fn is_custom(&self) -> bool {
        self.label == CUSTOM_LABEL
    }
}

/// The editor's grid state.
#[derive(Debug, Clone)]
pub struct GridState {
    catalog: PresetCatalog,
    selection: ActiveSelection,
}

impl GridState {
    /// Create the state by applying the first preset of `catalog`.
    pub fn new(catalog: PresetCatalog) -> Result<Self, StateError> {
        let first = catalog.first().ok_or(StateError::EmptyCatalog)?;
        let grid = Grid::from_codes(&first.codes())
            .ok_or_else(|| StateError::MalformedStartPreset(first.name.clone()))?;

        let selection = ActiveSelection {
            grid,
            label: first.name.clone(),
            canonical_code: first.code.clone(),
        };
        tracing::debug!("Starting from preset '{}'", selection.label);

        Ok(Self { catalog, selection })
    }

    /// The catalog this state matches against.
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// The current selection.
    pub fn current_view(&self) -> &ActiveSelection {
        &self.selection
    }

    /// Apply a preset. Presets that decode to fewer than 16 codes are ignored.
    ///
    /// The stored code is kept as given, without re-normalizing it. Returns
    /// whether the preset was applied.
    pub fn apply_preset(&mut self, preset: &Preset) -> bool {
        let Some(grid) = Grid::from_codes(&preset.codes()) else {
            tracing::debug!("Ignoring preset '{}': fewer than {} color codes", preset.name, GRID_CELLS);
            return false;
        };

        self.selection = ActiveSelection {
            grid,
            label: preset.name.clone(),
            canonical_code: preset.code.clone(),
        };
        tracing::debug!("Applied preset '{}'", preset.name);
        true
    }

    /// Look up a preset by name and apply it. Returns `false` if it is unknown
    /// or malformed.
    pub fn select_preset(&mut self, name: &str) -> bool {
        match self.catalog.match_by_name(name).cloned() {
            Some(preset) => self.apply_preset(&preset),
            None => {
                tracing::debug!("No preset named '{}'", name);
                false
            }
        }
    }

    /// Apply a user-supplied order code.
    ///
    /// The text may use any delimiter placement. On success the grid takes the
    /// first 16 decoded codes, the code is re-normalized, and the label becomes
    /// the matching preset's name or `"Custom"`.
    pub fn apply_custom_text(&mut self, text: &str) -> Result<(), StateError> {
        let codes = codec::parse(text);
        let grid = Grid::from_codes(&codes).ok_or(StateError::TooFewCodes {
            found: codes.len(),
            required: GRID_CELLS,
        })?;

        self.replace_grid(grid);
        Ok(())
    }

    /// Set one cell's color code.
    ///
    /// The code must be exactly two characters, neither of them a delimiter.
    /// Unregistered codes are accepted and render gray.
    pub fn set_cell(&mut self, index: usize, code: impl Into<String>) -> Result<(), StateError> {
        let code = code.into();
        if code.chars().count() != CODE_WIDTH
            || code.contains(&[CODE_SEPARATOR, GROUP_SEPARATOR][..])
        {
            return Err(StateError::InvalidCode(code));
        }

        let mut grid = self.selection.grid.clone();
        if !grid.set(index, code) {
            return Err(StateError::CellOutOfRange(index));
        }

        self.replace_grid(grid);
        Ok(())
    }

    /// Install a new grid, re-deriving the code and label from it.
    fn replace_grid(&mut self, grid: Grid) {
        let canonical_code = grid.canonical_code();
        let label = match self.catalog.match_by_code(&canonical_code) {
            Some(preset) => preset.name.clone(),
            None => CUSTOM_LABEL.to_string(),
        };
        tracing::debug!("Grid is now '{}' ({})", label, canonical_code);

        self.selection = ActiveSelection {
            grid,
            label,
            canonical_code,
        };
    }
}
