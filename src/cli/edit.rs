//! Apply, set and format command implementations

use std::path::Path;
use std::process::ExitCode;

use crate::codec;
use crate::config::CliOverrides;

use super::context::Editor;
use super::show::print_selection;
use super::{StartArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the apply command - apply a custom order code
pub fn run_apply(config: Option<&Path>, code: &str, json: bool, no_color: bool) -> ExitCode {
    let mut editor = match Editor::load(config, &CliOverrides::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if let Err(e) = editor.state.apply_custom_text(code) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    print_selection(editor.state.current_view(), &editor.palette, json, no_color)
}

/// Parse a cell edit of the form `INDEX=CODE`.
pub(crate) fn parse_edit(edit: &str) -> Result<(usize, String), String> {
    let (index, code) = edit
        .split_once('=')
        .ok_or_else(|| format!("Invalid edit '{}', expected INDEX=CODE", edit))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| format!("Invalid cell index '{}' in '{}'", index.trim(), edit))?;
    let code = code.trim();
    if code.chars().count() != codec::CODE_WIDTH {
        return Err(format!(
            "Color code '{}' must be exactly {} characters",
            code,
            codec::CODE_WIDTH
        ));
    }
    Ok((index, code.to_string()))
}

/// Execute the set command - apply cell edits in order
pub fn run_set(
    config: Option<&Path>,
    start: &StartArgs,
    edits: &[String],
    json: bool,
    no_color: bool,
) -> ExitCode {
    let parsed: Result<Vec<(usize, String)>, String> = edits.iter().map(|e| parse_edit(e)).collect();
    let parsed = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

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

    for (index, code) in parsed {
        if let Err(e) = editor.state.set_cell(index, code) {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    print_selection(editor.state.current_view(), &editor.palette, json, no_color)
}

/// Execute the format command - print the canonical form of a code
pub fn run_format(text: &str) -> ExitCode {
    let result = codec::parse_lenient(text);
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning.message);
    }
    if result.codes.is_empty() {
        eprintln!("Error: No color codes found in '{}'", text);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("{}", codec::format_codes(&result.codes));
    ExitCode::from(EXIT_SUCCESS)
}
