//! External converter executables (`wkhtmltopdf`, `wkhtmltoimage`).

use crate::utils::error::{FakeFileError, Result};
use std::io::ErrorKind;
use std::process::Command;

/// Runs `command` to completion. A missing executable and a non-zero exit
/// both become a `ConverterError` naming `tool`.
pub fn run(tool: &str, command: &mut Command) -> Result<()> {
    tracing::debug!("Running {:?}", command);
    let result = command.output().map_err(|e| match e.kind() {
        ErrorKind::NotFound => FakeFileError::converter(tool, "executable not found"),
        _ => FakeFileError::converter(tool, e.to_string()),
    })?;

    if !result.status.success() {
        return Err(FakeFileError::converter(
            tool,
            format!(
                "exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            ),
        ));
    }
    Ok(())
}
