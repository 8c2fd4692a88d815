//! Interactive editing session
//!
//! Reads one command per line and keeps a single grid state alive between
//! them. Failed commands are reported and the session carries on with the
//! grid unchanged.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::clipboard::ClipboardSink;
use crate::config::{clipboard_backend, CliOverrides};
use crate::terminal::{render_legend, render_selection};

use super::context::Editor;
use super::edit::parse_edit;
use super::export::{copy_current, export_current};
use super::info::format_preset_list;
use super::{use_color, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

const HELP: &str = "\
Commands:
  show              Show the grid, its label and its order code
  presets           List presets
  palette           List palette colors
  preset <name>     Apply a preset
  code <text>       Apply an order code
  set <index> <XX>  Set cell 0-15 to a color code
  copy              Copy the order code to the clipboard
  export [path]     Export the grid as an image
  help              Show this help
  quit              Leave the session
";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Show,
    Presets,
    Palette,
    Preset(String),
    Code(String),
    Set { index: usize, code: String },
    Copy,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "show" => Ok(SessionCommand::Show),
            "presets" => Ok(SessionCommand::Presets),
            "palette" => Ok(SessionCommand::Palette),
            "preset" if !rest.is_empty() => Ok(SessionCommand::Preset(rest.to_string())),
            "preset" => Err("Usage: preset <name>".to_string()),
            "code" if !rest.is_empty() => Ok(SessionCommand::Code(rest.to_string())),
            "code" => Err("Usage: code <text>".to_string()),
            "set" => {
                let (index, code) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "Usage: set <index> <code>".to_string())?;
                let (index, code) = parse_edit(&format!("{}={}", index, code))?;
                Ok(SessionCommand::Set { index, code })
            }
            "copy" => Ok(SessionCommand::Copy),
            "export" if rest.is_empty() => Ok(SessionCommand::Export(None)),
            "export" => Ok(SessionCommand::Export(Some(PathBuf::from(rest)))),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
        }
    }
}

/// An editor bound to a clipboard for the length of a session.
pub struct Session {
    editor: Editor,
    clipboard: Box<dyn ClipboardSink>,
    color: bool,
}

impl Session {
    pub fn new(editor: Editor, clipboard: Box<dyn ClipboardSink>, color: bool) -> Self {
        Self {
            editor,
            clipboard,
            color,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Execute one command, writing its output to `out`.
    ///
    /// Returns `Ok(false)` when the session should end. Command failures are
    /// written to `err`; only I/O errors on the streams are returned.
    pub fn execute<W: Write, E: Write>(
        &mut self,
        command: SessionCommand,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<bool> {
        match command {
            SessionCommand::Show => self.show(out)?,
            SessionCommand::Presets => {
                let view = self.editor.state.current_view();
                write!(
                    out,
                    "{}",
                    format_preset_list(self.editor.state.catalog().presets(), &view.label)
                )?;
            }
            SessionCommand::Palette => write!(out, "{}", render_legend(&self.editor.palette, self.color))?,
            SessionCommand::Preset(name) => {
                if self.editor.state.select_preset(&name) {
                    self.show(out)?;
                } else {
                    writeln!(err, "Error: Unknown preset '{}'", name)?;
                }
            }
            SessionCommand::Code(text) => match self.editor.state.apply_custom_text(&text) {
                Ok(()) => self.show(out)?,
                Err(e) => writeln!(err, "Error: {}", e)?,
            },
            SessionCommand::Set { index, code } => match self.editor.state.set_cell(index, code) {
                Ok(()) => self.show(out)?,
                Err(e) => writeln!(err, "Error: {}", e)?,
            },
            SessionCommand::Copy => match copy_current(&self.editor, self.clipboard.as_mut()) {
                Ok(code) => writeln!(out, "Copied {}", code)?,
                Err(e) => writeln!(err, "Error: {}", e)?,
            },
            SessionCommand::Export(path) => match export_current(&self.editor, path.as_deref(), None) {
                Ok(path) => writeln!(out, "Saved {}", path.display())?,
                Err(e) => writeln!(err, "Error: {}", e)?,
            },
            SessionCommand::Help => write!(out, "{}", HELP)?,
            SessionCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let view = self.editor.state.current_view();
        write!(out, "{}", render_selection(view, &self.editor.palette, self.color))
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead, W: Write, E: Write>(&mut self, input: R, out: &mut W, err: &mut E) -> io::Result<()> {
        self.show(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let keep_going = match SessionCommand::parse(&line) {
                Ok(command) => self.execute(command, out, err)?,
                Err(e) => {
                    writeln!(err, "Error: {}", e)?;
                    true
                }
            };
            out.flush()?;
            if !keep_going {
                break;
            }
        }
        Ok(())
    }
}

/// Execute the session command
pub fn run_session(config: Option<&Path>) -> ExitCode {
    let editor = match Editor::load(config, &CliOverrides::default()) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let sink = clipboard_backend(&editor.config)
        .map_err(|e| e.to_string())
        .and_then(|backend| backend.sink().map_err(|e| e.to_string()));
    let clipboard = match sink {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut session = Session::new(editor, clipboard, use_color(false));
    let stdin = io::stdin();
    let result = session.run(stdin.lock(), &mut io::stdout(), &mut io::stderr());
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
