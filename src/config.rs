//! User defaults for the command line, read from `config.yaml`.
//!
//! ```yaml
//! mode: both       # lyrics | both | chords
//! layout: inline   # above | inline
//! color: false
//! ```
//!
//! The file lives in `<config dir>/spiewnik/config.yaml`, or wherever
//! `SPIEWNIK_CONFIG` points. Missing keys keep their defaults.

use crate::error::SongbookError;
use crate::presentation::{ChordLayout, ViewMode};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SPIEWNIK_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: ViewMode,
    pub layout: ChordLayout,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ViewMode::default(),
            layout: ChordLayout::default(),
            color: true,
        }
    }
}

/// Location of the config file, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("spiewnik").join("config.yaml"))
}

impl Config {
    /// Read the config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SongbookError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SongbookError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&source).map_err(|e| {
            SongbookError::MetadataError(format!("{}: {}", path.display(), e))
        })
    }

    pub fn load() -> Result<Self, SongbookError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.color);
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "layout: inline\ncolor: false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mode, ViewMode::Lyrics);
        assert_eq!(config.layout, ChordLayout::Inline);
        assert!(!config.color);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "mode: karaoke\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, SongbookError::MetadataError(_)));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "colour: true\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, SongbookError::Io { .. }));
    }
}
