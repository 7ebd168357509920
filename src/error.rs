//! Error types shared by the statement pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while turning a [`crate::model::StatementDocument`] into PDF bytes.
#[derive(Debug, Error)]
pub enum PdfBuildError {
    /// No usable font family could be loaded.
    #[error("failed to load fonts")]
    FontLoad(#[source] genpdf::error::Error),

    /// The logo image is missing or could not be decoded.
    #[error("failed to load logo {}", path.display())]
    Logo {
        path: PathBuf,
        #[source]
        source: genpdf::error::Error,
    },

    /// `genpdf` failed while laying out or serializing the document.
    #[error("failed to render document")]
    Render(#[source] genpdf::error::Error),
}

/// Every fatal condition of the statement pipeline.
#[derive(Debug, Error)]
pub enum StatementError {
    #[error("error opening JSON file {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding account statement {}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Build(#[from] PdfBuildError),

    #[error("error creating PDF file {}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("error opening PDF with {program}")]
    ProcessLaunch {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StatementError>;
