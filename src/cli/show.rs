//! Show command implementation (terminal display)

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::palette::PaletteRegistry;
use crate::state::ActiveSelection;
use crate::terminal::render_selection;

use super::context::Editor;
use super::{use_color, StartArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the show command
pub fn run_show(config: Option<&Path>, start: &StartArgs, json: bool, no_color: bool) -> ExitCode {
    let mut editor = match Editor::load(config, &CliOverrides::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Err(e) = editor.start_from(start) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    print_selection(editor.state.current_view(), &editor.palette, json, no_color)
}

/// Print a selection as JSON or as a (possibly colored) grid.
pub(crate) fn print_selection(
    selection: &ActiveSelection,
    palette: &PaletteRegistry,
    json: bool,
    no_color: bool,
) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(selection) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: Cannot serialize view: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", render_selection(selection, palette, use_color(no_color)));
    }
    ExitCode::from(EXIT_SUCCESS)
}
