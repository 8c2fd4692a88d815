//! Shared editor setup for CLI commands

use std::path::Path;

use crate::config::{build_catalog, build_palette, load_config, merge_cli_overrides, CliOverrides, GridConfig};
use crate::palette::PaletteRegistry;
use crate::state::GridState;

use super::StartArgs;

/// Everything a command needs: configuration, palette and grid state.
pub struct Editor {
    pub config: GridConfig,
    pub palette: PaletteRegistry,
    pub state: GridState,
}

impl Editor {
    /// Load configuration and build the registries and the starting state.
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, String> {
        let mut config = load_config(config_path).map_err(|e| e.to_string())?;
        merge_cli_overrides(&mut config, overrides).map_err(|e| e.to_string())?;
        Self::from_config(config)
    }

    /// Build the registries and the starting state from a loaded configuration.
    pub fn from_config(config: GridConfig) -> Result<Self, String> {
        let palette = build_palette(&config).map_err(|e| e.to_string())?;
        let state = GridState::new(build_catalog(&config)).map_err(|e| e.to_string())?;
        Ok(Self {
            config,
            palette,
            state,
        })
    }

    /// Move to the grid a command asked to start from.
    pub fn start_from(&mut self, start: &StartArgs) -> Result<(), String> {
        if let Some(name) = &start.preset {
            if !self.state.select_preset(name) {
                return Err(format!("Unknown preset '{}'", name));
            }
        }
        if let Some(code) = &start.code {
            self.state.apply_custom_text(code).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::from_config(GridConfig::default()).unwrap()
    }

    #[test]
    fn test_default_start() {
        let mut editor = editor();
        editor.start_from(&StartArgs::default()).unwrap();
        assert_eq!(editor.state.current_view().label, "ImPOstor");
    }

    #[test]
    fn test_start_from_preset() {
        let mut editor = editor();
        let start = StartArgs {
            preset: Some("MERICA".to_string()),
            code: None,
        };
        editor.start_from(&start).unwrap();
        assert_eq!(editor.state.current_view().label, "MERICA");
    }

    #[test]
    fn test_start_from_unknown_preset() {
        let mut editor = editor();
        let start = StartArgs {
            preset: Some("Nope".to_string()),
            code: None,
        };
        assert!(editor.start_from(&start).unwrap_err().contains("Nope"));
    }

    #[test]
    fn test_start_from_short_code() {
        let mut editor = editor();
        let start = StartArgs {
            preset: None,
            code: Some("RD_RD".to_string()),
        };
        let err = editor.start_from(&start).unwrap_err();
        assert!(err.contains("at least 16"));
        assert_eq!(editor.state.current_view().label, "ImPOstor");
    }
}
