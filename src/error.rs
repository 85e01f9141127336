use thiserror::Error;

/// Errors from report generation and PDF output.
///
/// Formatting itself never fails; see [`crate::format`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot compare the same user: {0}")]
    SameUser(String),

    #[error("Invalid profile data: {0}")]
    Profile(#[from] serde_json::Error),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, Error>;
