use thiserror::Error;

/// Report rendering errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Unknown report format: {0} (expected \"text\" or \"html\")")]
    UnknownFormat(String),
}
