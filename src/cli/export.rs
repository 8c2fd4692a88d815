//! Copy and export command implementations
//!
//! Both are boundary effects: they read the current view and report their own
//! failures without touching grid state.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::clipboard::ClipboardSink;
use crate::config::{clipboard_backend, export_format, render_options, CliOverrides};
use crate::output::{export_grid, generate_output_path, ExportFormat};

use super::context::Editor;
use super::{StartArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Copy the current order code into `sink`.
pub(crate) fn copy_current(editor: &Editor, sink: &mut dyn ClipboardSink) -> Result<String, String> {
    let code = editor.state.current_view().canonical_code.clone();
    sink.copy_text(&code)
        .map_err(|e| format!("Could not copy to clipboard: {}", e))?;
    Ok(code)
}

/// Export the current grid, returning the written path.
///
/// The format comes from `format_arg`, then the output extension, then config.
pub(crate) fn export_current(
    editor: &Editor,
    output: Option<&Path>,
    format_arg: Option<&str>,
) -> Result<PathBuf, String> {
    let format = match format_arg {
        Some(name) => ExportFormat::from_name(name)
            .ok_or_else(|| format!("Unknown image format '{}', expected png or jpg", name))?,
        None => match output.and_then(ExportFormat::from_path) {
            Some(format) => format,
            None => export_format(&editor.config.export).map_err(|e| e.to_string())?,
        },
    };
    let options = render_options(&editor.config.export).map_err(|e| e.to_string())?;
    let view = editor.state.current_view();
    let path = generate_output_path(&view.label, output, &editor.config.export.out, format);

    export_grid(
        &view.grid,
        &editor.palette,
        &options,
        editor.config.export.scale,
        &path,
        format,
    )
    .map_err(|e| format!("Error generating the image '{}': {}", path.display(), e))?;
    Ok(path)
}

/// Execute the copy command
pub fn run_copy(config: Option<&Path>, start: &StartArgs, backend: Option<String>) -> ExitCode {
    let overrides = CliOverrides {
        clipboard: backend,
        ..Default::default()
    };
    let mut editor = match Editor::load(config, &overrides) {
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

    let sink = clipboard_backend(&editor.config)
        .map_err(|e| e.to_string())
        .and_then(|backend| backend.sink().map_err(|e| e.to_string()));
    let mut sink = match sink {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match copy_current(&editor, sink.as_mut()) {
        Ok(code) => {
            eprintln!("Copied {} to clipboard", code);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the export command
pub fn run_export(
    config: Option<&Path>,
    start: &StartArgs,
    output: Option<&Path>,
    scale: Option<u8>,
    format: Option<String>,
) -> ExitCode {
    let overrides = CliOverrides {
        scale,
        ..Default::default()
    };
    let mut editor = match Editor::load(config, &overrides) {
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

    match export_current(&editor, output, format.as_deref()) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
