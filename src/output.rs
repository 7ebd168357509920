//! Writes rendered statements to disk and hands them to the platform viewer.

use std::env;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Result, StatementError};

/// Operating systems with a known "open with default application" command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
}

/// Program and leading arguments used to open a file on one platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchTemplate {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const LAUNCHERS: &[(Platform, LaunchTemplate)] = &[
    (
        Platform::Linux,
        LaunchTemplate {
            program: "xdg-open",
            args: &[],
        },
    ),
    (
        Platform::Windows,
        LaunchTemplate {
            program: "rundll32",
            args: &["url.dll,FileProtocolHandler"],
        },
    ),
    (
        Platform::MacOs,
        LaunchTemplate {
            program: "open",
            args: &[],
        },
    ),
];

const PLATFORM_NAMES: &[(&str, Platform)] = &[
    ("linux", Platform::Linux),
    ("windows", Platform::Windows),
    ("macos", Platform::MacOs),
    ("darwin", Platform::MacOs),
];

impl Platform {
    /// Detects the platform the binary was compiled for.
    pub fn current() -> Result<Self> {
        env::consts::OS.parse()
    }

    /// Resolves an explicit override, or the current platform when none is given.
    pub fn resolve(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => name.parse(),
            None => Self::current(),
        }
    }

    /// Returns the launch template registered for this platform.
    pub fn launcher(self) -> Result<LaunchTemplate> {
        LAUNCHERS
            .iter()
            .find(|(platform, _)| *platform == self)
            .map(|(_, template)| *template)
            .ok_or_else(|| StatementError::UnsupportedPlatform(self.to_string()))
    }

    /// Builds the command that opens `path` in the default viewer.
    pub fn open_command(self, path: &Path) -> Result<Command> {
        let template = self.launcher()?;
        let mut command = Command::new(template.program);
        command.args(template.args).arg(path);
        Ok(command)
    }
}

impl FromStr for Platform {
    type Err = StatementError;

    fn from_str(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        PLATFORM_NAMES
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, platform)| *platform)
            .ok_or_else(|| StatementError::UnsupportedPlatform(name.to_owned()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
        };
        f.write_str(name)
    }
}

/// Writes `bytes` to `path`, replacing any existing file.
///
/// The data goes to a temporary file next to `path` that is renamed into place
/// once complete, so a failed write never leaves a partial PDF behind.
pub fn write_pdf(path: impl AsRef<Path>, bytes: &[u8]) -> Result<PathBuf> {
    let path = path.as_ref();
    let write_error = |source: std::io::Error| StatementError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
    file.write_all(bytes).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}

/// Launches the platform viewer for `path` without waiting for it to exit.
pub fn open_in_viewer(platform: Platform, path: &Path) -> Result<()> {
    let program = platform.launcher()?.program;
    let mut command = platform.open_command(path)?;
    debug!("Opening {} with {:?}", path.display(), command);
    command
        .spawn()
        .map(drop)
        .map_err(|source| StatementError::ProcessLaunch { program, source })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::fs;

    use super::*;

    fn command_line(platform: Platform) -> (String, Vec<String>) {
        let command = platform
            .open_command(Path::new("account_statement.pdf"))
            .unwrap();
        let program = command.get_program().to_string_lossy().into_owned();
        let args = command
            .get_args()
            .map(OsStr::to_string_lossy)
            .map(|arg| arg.into_owned())
            .collect();
        (program, args)
    }

    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(
            command_line(Platform::Linux),
            ("xdg-open".to_owned(), vec!["account_statement.pdf".to_owned()])
        );
    }

    #[test]
    fn windows_uses_rundll32_protocol_handler() {
        assert_eq!(
            command_line(Platform::Windows),
            (
                "rundll32".to_owned(),
                vec![
                    "url.dll,FileProtocolHandler".to_owned(),
                    "account_statement.pdf".to_owned()
                ]
            )
        );
    }

    #[test]
    fn macos_uses_open() {
        assert_eq!(
            command_line(Platform::MacOs),
            ("open".to_owned(), vec!["account_statement.pdf".to_owned()])
        );
    }

    #[test]
    fn parses_platform_names() {
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!("Darwin".parse::<Platform>().unwrap(), Platform::MacOs);
        assert_eq!(
            Platform::resolve(Some("windows")).unwrap(),
            Platform::Windows
        );
    }

    #[test]
    fn rejects_unknown_platforms() {
        let err = "plan9".parse::<Platform>().unwrap_err();
        assert!(matches!(
            err,
            StatementError::UnsupportedPlatform(name) if name == "plan9"
        ));
    }

    #[test]
    fn display_round_trips() {
        for (platform, _) in LAUNCHERS {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), *platform);
        }
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account_statement.pdf");
        fs::write(&path, b"old contents that are longer").unwrap();

        write_pdf(&path, b"%PDF-1.3").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.3");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("account_statement.pdf");

        let err = write_pdf(&path, b"%PDF-1.3").unwrap_err();
        assert!(matches!(err, StatementError::FileWrite { .. }), "{err:?}");
        assert!(!path.exists());
    }
}
