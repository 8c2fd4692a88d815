//! Info command implementations (presets, palette)

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::catalog::Preset;
use crate::config::CliOverrides;
use crate::palette::PaletteEntryView;
use crate::terminal::render_legend;

use super::context::Editor;
use super::{use_color, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Print a value as pretty JSON.
fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: Cannot serialize output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// One line per preset; the starting preset is marked with `*`.
pub(crate) fn format_preset_list(presets: &[Preset], active: &str) -> String {
    let width = presets.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let mut output = String::new();
    for preset in presets {
        let marker = if preset.name == active { '*' } else { ' ' };
        output.push_str(&format!(
            "{} {:<width$}  {}\n",
            marker,
            preset.name,
            preset.code,
            width = width
        ));
    }
    output
}

/// Execute the presets command
pub fn run_presets(config: Option<&Path>, json: bool) -> ExitCode {
    let editor = match Editor::load(config, &CliOverrides::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let presets = editor.state.catalog().presets();
    if json {
        return print_json(presets);
    }
    print!(
        "{}",
        format_preset_list(presets, &editor.state.current_view().label)
    );
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the palette command
pub fn run_palette(config: Option<&Path>, json: bool, no_color: bool) -> ExitCode {
    let editor = match Editor::load(config, &CliOverrides::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if json {
        let views: Vec<PaletteEntryView<'_>> = editor.palette.entries().iter().map(|e| e.view()).collect();
        return print_json(&views);
    }
    print!("{}", render_legend(&editor.palette, use_color(no_color)));
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PresetCatalog;

    #[test]
    fn test_preset_list_marks_active() {
        let catalog = PresetCatalog::builtin();
        let text = format_preset_list(catalog.presets(), "ImPOstor");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("* ImPOstor "));
        assert!(lines[1].starts_with("  Linn LM-1(1980) "));
        assert!(lines[1].ends_with("DG_DG_DG_DG/"));
    }

    #[test]
    fn test_preset_list_aligns_codes() {
        let presets = vec![
            Preset::new("A", "RD_RD_RD_RD/RD_RD_RD_RD/RD_RD_RD_RD/RD_RD_RD_RD"),
            Preset::new("Longer", "WH_WH_WH_WH/WH_WH_WH_WH/WH_WH_WH_WH/WH_WH_WH_WH"),
        ];
        let text = format_preset_list(&presets, "none");
        let columns: Vec<usize> = text.lines().map(|l| l.find("_").unwrap()).collect();
        assert_eq!(columns[0], columns[1]);
    }
}
