use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::OffdutyConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "offduty.toml",
    "offduty.yaml",
    "offduty.yml",
    "offduty.json",
];

/// Error loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<OffdutyConfig, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Parse config text, picking the format from the file extension.
fn parse_config(raw: &str, path: &Path) -> Result<OffdutyConfig, LoadError> {
    let parse_error = |message: String| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(raw).map_err(|e| parse_error(e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(raw).map_err(|e| parse_error(e.to_string()))
        },
        Some("json") => serde_json::from_str(raw).map_err(|e| parse_error(e.to_string())),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./offduty.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/offduty/offduty.{toml,yaml,yml,json}` (user-global)
///
/// Returns `OffdutyConfig::default()` if no config file is found.
pub fn discover_and_load() -> OffdutyConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(config) => return config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    OffdutyConfig::default()
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/offduty/
    if let Some(dir) = config_dir() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/offduty/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "offduty").map(|d| d.config_dir().to_path_buf())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EnforcementMode;

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.toml");
        std::fs::write(&path, "[enforcement]\nmode = \"strict\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.enforcement.mode, EnforcementMode::Strict);
    }

    #[test]
    fn loads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.yaml");
        std::fs::write(&path, "enforcement:\n  suppression_text: busy\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.enforcement.suppression_text, "busy");
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.json");
        std::fs::write(&path, r#"{"replies": {"clock_in": "hi"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.replies.clock_in, "hi");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.ini");
        std::fs::write(&path, "mode = strict").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(LoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.toml");
        std::fs::write(&path, "not [ valid = toml").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("offduty.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offduty.toml");
        assert!(matches!(load_config(&path), Err(LoadError::Read { .. })));
    }
}
