//! Clipboard device with an ordered fallback chain.
//!
//! # Responsibility
//! - Copy template content to the system clipboard.
//! - Try the configured strategies in order; the first success wins.
//!
//! # Invariants
//! - Exhausting every strategy surfaces as a boolean, never as a panic or
//!   a propagated error.
//! - Strategies receive the full text and must not partially write.

use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Error produced by one clipboard strategy attempt.
#[derive(Debug)]
pub enum ClipboardError {
    /// The helper process could not be spawned or piped to.
    Io(io::Error),
    /// The helper process ran but exited unsuccessfully.
    CommandFailed { program: String, status: String },
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "clipboard io error: {err}"),
            Self::CommandFailed { program, status } => {
                write!(f, "clipboard command `{program}` failed: {status}")
            }
        }
    }
}

impl Error for ClipboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::CommandFailed { .. } => None,
        }
    }
}

impl From<io::Error> for ClipboardError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// One way of reaching a clipboard; tried in order by [`Clipboard`].
pub trait ClipboardStrategy {
    /// Stable name used in log events.
    fn name(&self) -> &str;

    /// Copies `text`, replacing any previous clipboard content.
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Strategy spawning an external copy tool with the text piped to stdin.
pub struct CommandStrategy {
    program: String,
    args: Vec<String>,
}

impl CommandStrategy {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| (*arg).to_string()).collect(),
        }
    }
}

impl ClipboardStrategy for CommandStrategy {
    fn name(&self) -> &str {
        &self.program
    }

    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // The scoped handle drops after the write, closing the pipe so the
        // tool sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Err(io::Error::new(io::ErrorKind::Other, "stdin not piped")),
        };

        // Reap the child even when the write failed partway through.
        let status = child.wait();
        written?;
        let status = status?;
        if !status.success() {
            return Err(ClipboardError::CommandFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Ordered clipboard strategy chain.
pub struct Clipboard {
    strategies: Vec<Box<dyn ClipboardStrategy>>,
}

impl Clipboard {
    /// Builds a chain from explicit strategies, tried front to back.
    pub fn with_strategies(strategies: Vec<Box<dyn ClipboardStrategy>>) -> Self {
        Self { strategies }
    }

    /// Builds the platform chain of external copy tools.
    ///
    /// `pbcopy` leads on macOS; the Wayland and X11 tools cover Linux and
    /// the BSDs; `clip.exe` picks up WSL sessions.
    pub fn system() -> Self {
        let mut strategies: Vec<Box<dyn ClipboardStrategy>> = Vec::new();
        if cfg!(target_os = "macos") {
            strategies.push(Box::new(CommandStrategy::new("pbcopy", &[])));
        }
        strategies.push(Box::new(CommandStrategy::new("wl-copy", &[])));
        strategies.push(Box::new(CommandStrategy::new(
            "xclip",
            &["-selection", "clipboard"],
        )));
        strategies.push(Box::new(CommandStrategy::new(
            "xsel",
            &["--clipboard", "--input"],
        )));
        strategies.push(Box::new(CommandStrategy::new("clip.exe", &[])));
        Self::with_strategies(strategies)
    }

    /// Copies `text` using the first strategy that succeeds.
    ///
    /// Returns false when every strategy fails or the chain is empty.
    pub fn copy(&mut self, text: &str) -> bool {
        for strategy in &mut self.strategies {
            match strategy.copy(text) {
                Ok(()) => {
                    debug!(
                        "event=clipboard_copy module=clipboard status=ok strategy={}",
                        strategy.name()
                    );
                    return true;
                }
                Err(err) => {
                    warn!(
                        "event=clipboard_copy module=clipboard status=retry strategy={} error={err}",
                        strategy.name()
                    );
                }
            }
        }
        warn!(
            "event=clipboard_copy module=clipboard status=error attempts={}",
            self.strategies.len()
        );
        false
    }
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::system()
    }
}
