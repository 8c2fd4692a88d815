//! Clipboard sinks for the order code
//!
//! Copying never touches grid state; callers report failures and move on.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard tool is available for this platform
    #[error("no clipboard backend available")]
    NoBackend,
    /// Writing to the tool or terminal failed
    #[error("clipboard I/O error: {0}")]
    Io(#[from] io::Error),
    /// The clipboard tool exited unsuccessfully
    #[error("'{program}' exited with {status}")]
    CommandFailed { program: String, status: String },
}

/// Something that can receive text for the clipboard.
pub trait ClipboardSink {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into a platform clipboard tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The clipboard tool for the current platform.
    pub fn detect() -> Result<Self, ClipboardError> {
        if cfg!(target_os = "macos") {
            Ok(Self::new("pbcopy", &[]))
        } else if cfg!(target_os = "windows") {
            Ok(Self::new("clip", &[]))
        } else if cfg!(unix) {
            if env::var_os("WAYLAND_DISPLAY").is_some() {
                Ok(Self::new("wl-copy", &[]))
            } else {
                Ok(Self::new("xclip", &["-selection", "clipboard"]))
            }
        } else {
            Err(ClipboardError::NoBackend)
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ClipboardSink for CommandClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Dropping stdin closes the pipe so the tool sees end of input
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        if let Err(e) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e.into());
        }

        let status = child.wait()?;
        if status.success() {
            tracing::debug!("Copied {} bytes via {}", text.len(), self.program);
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Asks the terminal to set the clipboard with an OSC 52 sequence.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The OSC 52 sequence that places `text` on the system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> ClipboardSink for Osc52Clipboard<W> {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Which clipboard sink to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardBackend {
    /// Platform tool, falling back to OSC 52 when none is known
    #[default]
    Auto,
    Command,
    Osc52,
}

impl ClipboardBackend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(ClipboardBackend::Auto),
            "command" => Some(ClipboardBackend::Command),
            "osc52" => Some(ClipboardBackend::Osc52),
            _ => None,
        }
    }

    /// Build a sink writing OSC 52 sequences to stdout when needed.
    pub fn sink(self) -> Result<Box<dyn ClipboardSink>, ClipboardError> {
        match self {
            ClipboardBackend::Command => Ok(Box::new(CommandClipboard::detect()?)),
            ClipboardBackend::Osc52 => Ok(Box::new(Osc52Clipboard::new(io::stdout()))),
            ClipboardBackend::Auto => {
                // OSC 52 only reaches a clipboard when stdout is a terminal
                let fallback =
                    atty::is(atty::Stream::Stdout).then(|| Osc52Clipboard::new(io::stdout()));
                Ok(Box::new(AutoClipboard::new(CommandClipboard::detect().ok(), fallback)))
            }
        }
    }
}

/// Tries the platform tool first and falls back to OSC 52 when the tool is
/// missing. Without a fallback, a missing tool is [`ClipboardError::NoBackend`].
pub struct AutoClipboard<W: Write> {
    command: Option<CommandClipboard>,
    fallback: Option<Osc52Clipboard<W>>,
}

impl<W: Write> AutoClipboard<W> {
    pub fn new(command: Option<CommandClipboard>, fallback: Option<Osc52Clipboard<W>>) -> Self {
        Self { command, fallback }
    }
}

impl<W: Write> ClipboardSink for AutoClipboard<W> {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(command) = &mut self.command {
            match command.copy_text(text) {
                Err(ClipboardError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("'{}' not found", command.program());
                }
                result => return result,
            }
        }
        match &mut self.fallback {
            Some(fallback) => fallback.copy_text(text),
            None => Err(ClipboardError::NoBackend),
        }
    }
}
