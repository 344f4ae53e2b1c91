//! System clipboard access through the platform's command-line tools.
//!
//! | Platform | Copy | Paste |
//! |----------|------|-------|
//! | macOS | `pbcopy` | `pbpaste` |
//! | Linux | `wl-copy`, `xclip`, `xsel` | `wl-paste`, `xclip`, `xsel` |
//! | Windows | `clip` | `powershell Get-Clipboard` |
//!
//! Tools are tried in order; the first one that runs successfully wins.

use crate::error::{CardboxError, Result};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

type Tool = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const COPY_TOOLS: &[Tool] = &[("pbcopy", &[])];
#[cfg(target_os = "macos")]
const PASTE_TOOLS: &[Tool] = &[("pbpaste", &[])];

#[cfg(target_os = "linux")]
const COPY_TOOLS: &[Tool] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];
#[cfg(target_os = "linux")]
const PASTE_TOOLS: &[Tool] = &[
    ("wl-paste", &["--no-newline"]),
    ("xclip", &["-selection", "clipboard", "-o"]),
    ("xsel", &["--clipboard", "--output"]),
];

#[cfg(target_os = "windows")]
const COPY_TOOLS: &[Tool] = &[("clip", &[])];
#[cfg(target_os = "windows")]
const PASTE_TOOLS: &[Tool] = &[("powershell", &["-command", "Get-Clipboard"])];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const COPY_TOOLS: &[Tool] = &[];
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const PASTE_TOOLS: &[Tool] = &[];

fn tool_names(tools: &[Tool]) -> String {
    tools
        .iter()
        .map(|(program, _)| *program)
        .collect::<Vec<_>>()
        .join(", ")
}

fn unavailable(tools: &[Tool]) -> CardboxError {
    if tools.is_empty() {
        CardboxError::Api("Clipboard not supported on this platform".to_string())
    } else {
        CardboxError::Api(format!(
            "No clipboard tool worked. Install one of: {}",
            tool_names(tools)
        ))
    }
}

fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    Ok(child.wait()?.success())
}

/// Copies text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in COPY_TOOLS {
        match pipe_into(program, args, text) {
            Ok(true) => return Ok(()),
            Ok(false) => debug!("{} exited with error", program),
            Err(e) => debug!("{} unavailable: {}", program, e),
        }
    }
    Err(unavailable(COPY_TOOLS))
}

/// Reads text from the system clipboard.
pub fn read_clipboard() -> Result<String> {
    for (program, args) in PASTE_TOOLS {
        match Command::new(program).args(*args).stderr(Stdio::null()).output() {
            Ok(output) if output.status.success() => {
                return String::from_utf8(output.stdout)
                    .map_err(|e| CardboxError::Api(format!("Invalid UTF-8 in clipboard: {}", e)));
            }
            Ok(_) => debug!("{} exited with error", program),
            Err(e) => debug!("{} unavailable: {}", program, e),
        }
    }
    Err(unavailable(PASTE_TOOLS))
}
