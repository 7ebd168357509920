//! Font discovery and loading for statement documents.
//!
//! `genpdf` needs TrueType files for glyph metrics, so a font family has to be
//! found on disk.  The search covers an explicit directory, the
//! `STATEMENT_FONTS_DIR` environment variable, `assets/fonts` next to the
//! executable and in the package, and the common system locations of
//! Liberation Sans.  When none of them holds the family the loader falls back
//! to the platform's Arial files.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Family loaded when no other family is configured.  Its metrics match Arial.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable pointing at a directory with the configured family.
pub const FONTS_DIR_ENV: &str = "STATEMENT_FONTS_DIR";

/// Environment variable pointing at a directory with the Arial fallback files.
pub const SYSTEM_FONTS_DIR_ENV: &str = "STATEMENT_SYSTEM_FONTS_DIR";

const FONT_STYLES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

const SYSTEM_FAMILY_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

const FALLBACK_FAMILY_NAME: &str = "Arial";

struct FallbackFontFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

#[cfg(not(target_os = "macos"))]
const FALLBACK_FONT_FILES: FallbackFontFiles = FallbackFontFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

#[cfg(target_os = "macos")]
const FALLBACK_FONT_FILES: FallbackFontFiles = FallbackFontFiles {
    regular: "Arial.ttf",
    bold: "Arial Bold.ttf",
    italic: "Arial Italic.ttf",
    bold_italic: "Arial Bold Italic.ttf",
};

/// Where and under which name the statement font family is looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontOptions {
    /// Directory searched before any other candidate.
    pub directory: Option<PathBuf>,
    /// Family name; files are expected as `<family>-Regular.ttf` and so on.
    pub family: String,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            directory: None,
            family: DEFAULT_FONT_FAMILY_NAME.to_owned(),
        }
    }
}

impl FontOptions {
    /// Restricts the search to `directory` first.
    pub fn with_directory(mut self, directory: impl Into<Option<PathBuf>>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Sets the family name.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        let mut push = |candidate: PathBuf| {
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        };

        if let Some(directory) = &self.directory {
            push(directory.clone());
        }

        if let Some(path) = env_path(FONTS_DIR_ENV) {
            push(path);
        }

        if let Ok(current_exe) = env::current_exe() {
            if let Some(bin_dir) = current_exe.parent() {
                push(bin_dir.join("assets/fonts"));
            }
        }

        push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));

        for directory in SYSTEM_FAMILY_DIRECTORIES {
            push(PathBuf::from(directory));
        }

        candidates
    }

    fn missing_files(&self, directory: &Path) -> Vec<PathBuf> {
        FONT_STYLES
            .iter()
            .map(|style| directory.join(format!("{}-{}.ttf", self.family, style)))
            .filter(|candidate| !candidate.is_file())
            .collect()
    }

    fn resolve_directory(&self) -> Result<PathBuf, Error> {
        let mut attempts = Vec::new();

        for candidate in self.candidates() {
            let exists = candidate.is_dir();
            let missing = self.missing_files(&candidate);

            if exists && missing.is_empty() {
                return Ok(candidate);
            }

            let reason = if !exists {
                "directory missing".to_owned()
            } else {
                let missing_list = missing
                    .iter()
                    .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("missing files [{}]", missing_list)
            };

            attempts.push(format!("{} ({})", candidate.display(), reason));
        }

        Err(Error::new(
            format!(
                "Unable to locate the '{}' font family. Checked: {}. Set {} to a font directory.",
                self.family,
                attempts.join(", "),
                FONTS_DIR_ENV
            ),
            io::Error::new(io::ErrorKind::NotFound, "font family not found"),
        ))
    }

    fn load_family(&self) -> Result<FontFamily<FontData>, Error> {
        let directory = self.resolve_directory()?;
        debug!("Loading font family '{}' from {}", self.family, directory.display());

        fonts::from_files(&directory, &self.family, None).map_err(|err| {
            Error::new(
                format!(
                    "Failed to load font family '{}' from {}: {}",
                    self.family,
                    directory.display(),
                    err
                ),
                io::Error::new(io::ErrorKind::Other, err.to_string()),
            )
        })
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn fallback_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(SYSTEM_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate = PathBuf::from("/System/Library/Fonts/Supplemental");
        if candidate.is_dir() {
            return Some(candidate);
        }
    }

    None
}

fn load_fallback_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = fallback_font_directory().ok_or_else(|| {
        Error::new(
            "System font directory not found for fallback",
            io::Error::new(io::ErrorKind::NotFound, "system fonts directory not found"),
        )
    })?;

    Ok(FontFamily {
        regular: load_fallback_font(&directory, FALLBACK_FONT_FILES.regular, "regular")?,
        bold: load_fallback_font(&directory, FALLBACK_FONT_FILES.bold, "bold")?,
        italic: load_fallback_font(&directory, FALLBACK_FONT_FILES.italic, "italic")?,
        bold_italic: load_fallback_font(
            &directory,
            FALLBACK_FONT_FILES.bold_italic,
            "bold italic",
        )?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Loads the configured font family, falling back to the system Arial files
/// when the family cannot be found.
pub fn load_font_family(options: &FontOptions) -> Result<FontFamily<FontData>, Error> {
    match options.load_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match fallback_font_family() {
            Ok(fallback) => {
                warn!(
                    "Font family unavailable ({}); falling back to system '{}' family.",
                    err, FALLBACK_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Font family unavailable ({}); system fallback failed: {}",
                    err, fallback_err
                );
                Err(Error::new(
                    format!(
                        "Font family '{}' unavailable and system fallback failed: {}",
                        options.family, fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "statement fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether the configured family can be found without the fallback.
pub fn fonts_available(options: &FontOptions) -> bool {
    options.resolve_directory().is_ok()
}
