use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::DomainError;

/// System clipboard write access. A port so controller tests don't touch the
/// real clipboard.
pub trait Clipboard: Send + Sync {
    fn write(&self, text: &str) -> Result<(), DomainError>;
}

/// Candidate OS utilities, tried in order: macOS, X11, Wayland.
const TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("wl-copy", &[]),
];

/// [`Clipboard`] piping text into the platform's copy utility.
#[derive(Default)]
pub struct OsClipboard;

impl OsClipboard {
    pub fn new() -> Self {
        Self
    }

    fn try_tool(tool: &str, args: &[&str], text: &str) -> Result<bool, DomainError> {
        let child = Command::new(tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            // Tool not installed; let the caller try the next one.
            Err(_) => return Ok(false),
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| DomainError::clipboard(format!("{tool}: {e}")))?;
        }

        let status = child
            .wait()
            .map_err(|e| DomainError::clipboard(format!("{tool}: {e}")))?;
        if !status.success() {
            return Err(DomainError::clipboard(format!("{tool} exited with {status}")));
        }

        Ok(true)
    }
}

impl Clipboard for OsClipboard {
    fn write(&self, text: &str) -> Result<(), DomainError> {
        for (tool, args) in TOOLS {
            if Self::try_tool(tool, args, text)? {
                return Ok(());
            }
        }

        Err(DomainError::clipboard(
            "no clipboard utility found (tried pbcopy, xclip, wl-copy)",
        ))
    }
}
