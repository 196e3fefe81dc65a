use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "telescope.config.json";

/// Telescope configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,

    /// Print hidden annotation lines in `show`
    pub show_annotations: bool,

    /// Maximum undo levels kept by an edit session
    pub undo_depth: usize,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_annotations: false,
            undo_depth: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "logLevel": "debug",
            "showAnnotations": true,
            "undoDepth": 20
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.show_annotations);
        assert_eq!(config.undo_depth, 20);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "showAnnotations": true }"#).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.undo_depth, 100);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "undoDepth": 5 }"#).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().undo_depth, 5);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "not json").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
