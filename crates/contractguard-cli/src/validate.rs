//! Client-side checks that run before anything is sent.

use crate::error::{CliError, Result};
use contractguard_documents::DocumentKind;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Minimum contract length accepted by the server, in characters
pub const MIN_CONTRACT_CHARS: usize = 100;

/// A file that passed the upload checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFile {
    /// Detected format
    pub kind: DocumentKind,
    /// Size in bytes
    pub size: u64,
    /// File name sent to the server
    pub filename: String,
}

/// Check that a file exists, has an allowed extension and fits the limit.
pub fn check_upload(path: &Path, max_bytes: u64) -> Result<CheckedFile> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::InvalidInput(format!("File not found: {}", path.display())),
        _ => CliError::Io(e),
    })?;
    if !metadata.is_file() {
        return Err(CliError::InvalidInput(format!(
            "Not a file: {}",
            path.display()
        )));
    }

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = DocumentKind::from_extension(&filename)
        .ok_or_else(|| CliError::UnsupportedFile(filename.clone()))?;

    let size = metadata.len();
    if size > max_bytes {
        return Err(CliError::FileTooLarge {
            path: path.display().to_string(),
            size,
            limit: max_bytes,
        });
    }

    Ok(CheckedFile {
        kind,
        size,
        filename,
    })
}

/// Check that a contract text is long enough to analyze.
pub fn check_contract_text(text: &str) -> Result<()> {
    if text.trim().chars().count() < MIN_CONTRACT_CHARS {
        return Err(CliError::InvalidInput(
            "Contract text is too short. Please provide a complete contract.".to_string(),
        ));
    }
    Ok(())
}

/// Read a plain-text contract for comparison, applying every check.
pub fn read_contract_text(path: &Path, max_bytes: u64) -> Result<String> {
    let checked = check_upload(path, max_bytes)?;
    if checked.kind != DocumentKind::PlainText {
        return Err(CliError::InvalidInput(format!(
            "Comparison needs plain-text files, got {} ({})",
            checked.filename, checked.kind
        )));
    }
    let text = fs::read_to_string(path)?;
    check_contract_text(&text)?;
    Ok(text)
}
