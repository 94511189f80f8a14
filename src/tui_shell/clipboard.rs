use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// A clipboard program and the arguments that make it read stdin.
type ClipboardCommand = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const CANDIDATES: &[ClipboardCommand] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CANDIDATES: &[ClipboardCommand] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const CANDIDATES: &[ClipboardCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Copies `text` with the first clipboard program that works here. Returns
/// the program used.
pub(in crate::tui_shell) fn copy(text: &str) -> Result<&'static str> {
    copy_with(CANDIDATES, text)
}

fn copy_with(candidates: &[ClipboardCommand], text: &str) -> Result<&'static str> {
    let mut last_err = None;
    for &(program, args) in candidates {
        match pipe_into(program, args, text) {
            Ok(()) => return Ok(program),
            Err(err) => {
                tracing::debug!(program, "clipboard command failed: {:#}", err);
                last_err = Some(err);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no clipboard command for this platform")))
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> Result<()> {
    // Output would draw over the alternate screen.
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("start {}", program))?;

    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child
        .wait()
        .with_context(|| format!("wait for {}", program))?;
    written.with_context(|| format!("write to {}", program))?;
    if !status.success() {
        anyhow::bail!("{} exited with {}", program, status);
    }
    Ok(())
}
