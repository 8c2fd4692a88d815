//! Construction of the process-wide registries from configuration
//!
//! The palette and the preset catalog are assembled once at startup from the
//! built-ins plus whatever `cgrid.toml` adds, and are read-only afterwards.

use crate::catalog::{Preset, PresetCatalog};
use crate::clipboard::ClipboardBackend;
use crate::color::parse_color;
use crate::output::{ExportFormat, RenderOptions};
use crate::palette::PaletteRegistry;

use super::loader::ConfigError;
use super::schema::{ExportConfig, GridConfig};

/// Built-in palette plus configured colors.
///
/// A configured color that reuses a built-in code replaces it in place.
pub fn build_palette(config: &GridConfig) -> Result<PaletteRegistry, ConfigError> {
    let mut registry = PaletteRegistry::builtin();
    for def in &config.palette {
        let rgb = parse_color(&def.color).map_err(|e| {
            ConfigError::Validation(vec![format!("palette '{}': {}", def.code, e)])
        })?;
        registry.register(&def.code, &def.name, rgb[0], rgb[1], rgb[2]);
    }
    Ok(registry)
}

/// Built-in presets followed by configured ones.
pub fn build_catalog(config: &GridConfig) -> PresetCatalog {
    let mut catalog = PresetCatalog::builtin();
    catalog.extend(
        config
            .presets
            .iter()
            .map(|p| Preset::new(p.name.clone(), p.code.clone())),
    );
    catalog
}

/// Image layout from the export section.
pub fn render_options(export: &ExportConfig) -> Result<RenderOptions, ConfigError> {
    let background = parse_color(&export.background).map_err(|e| {
        ConfigError::Validation(vec![format!("export.background '{}': {}", export.background, e)])
    })?;
    Ok(RenderOptions {
        cell_size: export.cell_size,
        gap: export.gap,
        padding: export.padding,
        background,
    })
}

/// Export format from the export section.
pub fn export_format(export: &ExportConfig) -> Result<ExportFormat, ConfigError> {
    ExportFormat::from_name(&export.format).ok_or_else(|| {
        ConfigError::Validation(vec![format!("export.format '{}' is not png or jpg", export.format)])
    })
}

/// Clipboard backend from the clipboard section.
pub fn clipboard_backend(config: &GridConfig) -> Result<ClipboardBackend, ConfigError> {
    ClipboardBackend::from_name(&config.clipboard.backend).ok_or_else(|| {
        ConfigError::Validation(vec![format!(
            "clipboard.backend '{}' must be auto, command or osc52",
            config.clipboard.backend
        )])
    })
}
