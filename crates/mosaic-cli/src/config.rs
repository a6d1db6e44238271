//! Settings file discovery for the CLI.
//!
//! A settings file holds the [`AppConfig`] (wash override, stroke defaults,
//! interaction mode). It is looked up in this order, and the first hit wins:
//!
//! 1. the path given with `--config`, which must exist
//! 2. `mosaic/config.toml` under the working directory
//! 3. `config.toml` in the platform config directory
//!
//! With no file anywhere, the defaults apply.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use mosaic::{MosaicError, config::AppConfig};

const LOCAL_SETTINGS: &str = "mosaic/config.toml";
const SETTINGS_FILE: &str = "config.toml";

/// Where a settings file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Explicit,
    Local,
    Platform,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "command line",
            Self::Local => "working directory",
            Self::Platform => "platform config directory",
        })
    }
}

/// Finds the settings file to load, if any.
///
/// An explicit path is returned even when it does not exist, so the caller
/// can report it instead of silently falling back to the defaults.
fn locate(explicit: Option<&Path>, platform_dir: Option<&Path>) -> Option<(PathBuf, Origin)> {
    if let Some(path) = explicit {
        return Some((path.to_path_buf(), Origin::Explicit));
    }

    let local = Path::new(LOCAL_SETTINGS);
    if local.is_file() {
        return Some((local.to_path_buf(), Origin::Local));
    }

    let Some(dir) = platform_dir else {
        debug!("No platform config directory");
        return None;
    };
    let platform = dir.join(SETTINGS_FILE);
    if platform.is_file() {
        return Some((platform, Origin::Platform));
    }
    debug!(path = platform.display().to_string(); "No settings in platform config directory");
    None
}

/// Loads the application settings.
///
/// # Errors
///
/// Returns [`MosaicError::Settings`] if an explicit path does not exist or a
/// settings file is not valid TOML for [`AppConfig`], and
/// [`MosaicError::Io`] if a file exists but cannot be read.
pub fn load_config(explicit: Option<impl AsRef<Path>>) -> Result<AppConfig, MosaicError> {
    let project = ProjectDirs::from("com", "mosaic", "mosaic");
    let platform_dir = project.as_ref().map(ProjectDirs::config_dir);

    let explicit: Option<&Path> = explicit.as_ref().map(|path| path.as_ref());

    match locate(explicit, platform_dir) {
        Some((path, origin)) => {
            info!(path = path.display().to_string(), origin:% = origin; "Loading settings");
            read_settings(&path)
        }
        None => {
            debug!("No settings file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<AppConfig, MosaicError> {
    if !path.is_file() {
        return Err(MosaicError::new_settings_error(path, "file does not exist", None, ""));
    }

    let source = fs::read_to_string(path)?;
    toml::from_str(&source)
        .map_err(|err| MosaicError::new_settings_error(path, err.message(), err.span(), source))
}
