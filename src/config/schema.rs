//! Configuration schema types for `cgrid.toml`
//!
//! Defines the structure and validation rules for the editor configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::clipboard::ClipboardBackend;
use crate::codec::{self, CODE_WIDTH};
use crate::color::parse_color;
use crate::grid::GRID_CELLS;
use crate::output::{image_side, ExportFormat, MAX_IMAGE_SIDE};
use crate::state::CUSTOM_LABEL;

/// Largest accepted `export.cell_size`.
pub const MAX_CELL_SIZE: u32 = 1024;

/// Largest accepted `export.gap` and `export.padding`.
pub const MAX_SPACING: u32 = 1024;

/// An extra palette color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorDef {
    /// 2-character color code
    pub code: String,
    /// Display name shown in the legend
    pub name: String,
    /// Any color string accepted by `color::parse_color`
    pub color: String,
}

/// An extra preset appended to the built-in catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDef {
    pub name: String,
    pub code: String,
}

/// Image export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Cell edge length in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Space between cells in pixels
    #[serde(default = "default_gap")]
    pub gap: u32,
    /// Border around the grid in pixels
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Background color
    #[serde(default = "default_background")]
    pub background: String,
    /// Integer scale factor
    #[serde(default = "default_scale")]
    pub scale: u8,
    /// `png` or `jpg`
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for exports without `-o`
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            gap: default_gap(),
            padding: default_padding(),
            background: default_background(),
            scale: default_scale(),
            format: default_format(),
            out: default_out(),
        }
    }
}

fn default_cell_size() -> u32 {
    64
}

fn default_gap() -> u32 {
    8
}

fn default_padding() -> u32 {
    20
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_scale() -> u8 {
    1
}

fn default_format() -> String {
    "png".to_string()
}

fn default_out() -> PathBuf {
    PathBuf::from(".")
}

/// Clipboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// `auto`, `command` or `osc52`
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
        }
    }
}

fn default_backend() -> String {
    "auto".to_string()
}

/// Complete `cgrid.toml` configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridConfig {
    /// Extra palette colors, registered after the built-ins
    #[serde(default)]
    pub palette: Vec<ColorDef>,
    /// Extra presets, appended after the built-ins
    #[serde(default)]
    pub presets: Vec<PresetDef>,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

impl GridConfig {
    /// Check the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for def in &self.palette {
            if def.code.chars().count() != CODE_WIDTH {
                errors.push(format!(
                    "palette code '{}' must be exactly {} characters",
                    def.code, CODE_WIDTH
                ));
            }
            if let Err(e) = parse_color(&def.color) {
                errors.push(format!("palette '{}': invalid color '{}': {}", def.code, def.color, e));
            }
        }

        for preset in &self.presets {
            if preset.name == CUSTOM_LABEL {
                errors.push(format!(
                    "preset name '{}' is reserved for grids that match no preset",
                    CUSTOM_LABEL
                ));
            }
            let found = codec::parse(&preset.code).len();
            if found < GRID_CELLS {
                errors.push(format!(
                    "preset '{}' has {} color codes, need at least {}",
                    preset.name, found, GRID_CELLS
                ));
            }
        }

        let export = &self.export;
        let mut layout_ok = true;
        if !(1..=MAX_CELL_SIZE).contains(&export.cell_size) {
            errors.push(format!(
                "export.cell_size must be 1-{}, got {}",
                MAX_CELL_SIZE, export.cell_size
            ));
            layout_ok = false;
        }
        for (field, value) in [("gap", export.gap), ("padding", export.padding)] {
            if value > MAX_SPACING {
                errors.push(format!("export.{} must be at most {}, got {}", field, MAX_SPACING, value));
                layout_ok = false;
            }
        }
        if !(1..=16).contains(&export.scale) {
            errors.push(format!("export.scale must be 1-16, got {}", export.scale));
            layout_ok = false;
        }
        if layout_ok {
            let side = image_side(export.cell_size, export.gap, export.padding)
                .map(|side| side * u32::from(export.scale));
            if side.map_or(true, |side| side > MAX_IMAGE_SIDE) {
                errors.push(format!(
                    "export layout at scale {} exceeds {} pixels per side",
                    export.scale, MAX_IMAGE_SIDE
                ));
            }
        }
        if ExportFormat::from_name(&self.export.format).is_none() {
            errors.push(format!("export.format '{}' is not png or jpg", self.export.format));
        }
        if let Err(e) = parse_color(&self.export.background) {
            errors.push(format!("export.background '{}': {}", self.export.background, e));
        }

        if ClipboardBackend::from_name(&self.clipboard.backend).is_none() {
            errors.push(format!(
                "clipboard.backend '{}' must be auto, command or osc52",
                self.clipboard.backend
            ));
        }

        errors
    }
}
