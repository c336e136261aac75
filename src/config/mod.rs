use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::editor::{DEFAULT_STICKER_CAP, EMOJI_PALETTE};

const APP_DIR: &str = "kiosk-editor";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Editor policy settings from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditorConfig {
    /// Maximum stickers per photo; further additions are ignored.
    #[serde(default = "default_sticker_cap")]
    pub sticker_cap: usize,
    /// Whether the transform panel offers a vertical flip.
    #[serde(default = "default_flip_vertical")]
    pub flip_vertical: bool,
    #[serde(default)]
    pub emoji_palette: Vec<String>,
}

fn default_sticker_cap() -> usize {
    DEFAULT_STICKER_CAP
}

fn default_flip_vertical() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            sticker_cap: DEFAULT_STICKER_CAP,
            flip_vertical: true,
            emoji_palette: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Configured palette, or the built-in one when none is configured.
    pub fn palette(&self) -> Vec<String> {
        if self.emoji_palette.is_empty() {
            EMOJI_PALETTE.iter().map(|glyph| glyph.to_string()).collect()
        } else {
            self.emoji_palette.clone()
        }
    }

    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn load_editor_config() -> EditorConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_editor_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_editor_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> EditorConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(err) => {
            tracing::warn!(?err, "cannot resolve config directory; using defaults");
            return EditorConfig::default();
        }
    };
    if !path.exists() {
        return EditorConfig::default();
    }
    match EditorConfig::read_from(&path) {
        Ok(config) => {
            tracing::debug!(?path, ?config, "loaded editor config");
            config
        }
        Err(err) => {
            tracing::warn!(%err, "invalid editor config; using defaults");
            EditorConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            APP_DIR,
            APP_CONFIG_FILE,
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(
            path,
            PathBuf::from("/tmp/config-root/kiosk-editor/config.json")
        );
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/kiosk-editor/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path(APP_DIR, APP_CONFIG_FILE, None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn defaults_cap_stickers_at_three_with_builtin_palette() {
        let config = EditorConfig::default();
        assert_eq!(config.sticker_cap, 3);
        assert!(config.flip_vertical);
        assert_eq!(config.palette().len(), EMOJI_PALETTE.len());
        assert_eq!(config.palette()[3], "🔥");
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config = EditorConfig::from_json_str(r#"{"flip_vertical": false}"#)
            .expect("partial config should parse");
        assert_eq!(config.sticker_cap, 3);
        assert!(!config.flip_vertical);
        assert!(config.emoji_palette.is_empty());
    }

    #[test]
    fn load_reads_config_from_xdg_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(
            root.path(),
            r#"{"sticker_cap": 5, "emoji_palette": ["🐶", "🐱"]}"#,
        );

        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config.sticker_cap, 5);
        assert_eq!(config.palette(), vec!["🐶".to_string(), "🐱".to_string()]);
    }

    #[test]
    fn load_falls_back_to_defaults_on_invalid_json() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), "{ not json");

        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn load_falls_back_to_defaults_when_file_missing() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = load_editor_config_with(Some(root.path()), None);
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn read_from_reports_parse_errors_with_path() {
        let root = tempfile::tempdir().expect("tempdir");
        write_config(root.path(), "[]");
        let path = root.path().join(APP_DIR).join(APP_CONFIG_FILE);

        let err = EditorConfig::read_from(&path).expect_err("array is not a config object");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
