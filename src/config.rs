//! Runtime configuration of the statement pipeline.

use std::path::PathBuf;

use crate::fonts::FontOptions;

pub const DEFAULT_INPUT_FILE: &str = "account_statement.json";
pub const DEFAULT_LOGO_FILE: &str = "logo.png";
pub const DEFAULT_OUTPUT_FILE: &str = "account_statement.pdf";

/// Paths and switches for one pipeline run.
///
/// The defaults resolve every file relative to the current working directory
/// and open the generated PDF in the platform viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementConfig {
    pub input: PathBuf,
    pub logo: PathBuf,
    pub output: PathBuf,
    pub fonts: FontOptions,
    /// Launch the platform viewer once the PDF is written.
    pub open_viewer: bool,
    /// Platform name overriding the detected operating system.
    pub platform: Option<String>,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_FILE),
            logo: PathBuf::from(DEFAULT_LOGO_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            fonts: FontOptions::default(),
            open_viewer: true,
            platform: None,
        }
    }
}

impl StatementConfig {
    /// Resolves all three default file names inside `directory`.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        Self {
            input: directory.join(DEFAULT_INPUT_FILE),
            logo: directory.join(DEFAULT_LOGO_FILE),
            output: directory.join(DEFAULT_OUTPUT_FILE),
            ..Self::default()
        }
    }
}
