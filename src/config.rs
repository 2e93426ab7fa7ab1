// Configuration for rusty-census
// Loaded from ~/.config/rusty-census/config.toml; every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn default_label_column() -> Option<String> {
    Some("Survived".to_string())
}

fn default_source_column() -> String {
    "Source".to_string()
}

fn default_histogram_columns() -> Vec<String> {
    vec!["Age".to_string(), "Fare".to_string()]
}

fn default_bar_columns() -> Vec<String> {
    vec!["Sex".to_string(), "Pclass".to_string(), "Embarked".to_string()]
}

fn default_preview_rows() -> usize {
    5
}

/// Analysis defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Column that categorical counts are cross-tabulated against when the
    /// dataset has it. Set to `""` to disable.
    #[serde(default = "default_label_column")]
    pub label_column: Option<String>,
    /// Column written by "merge with source tags".
    #[serde(default = "default_source_column")]
    pub source_column: String,
    /// Numeric columns drawn as histograms after each load.
    #[serde(default = "default_histogram_columns")]
    pub histogram_columns: Vec<String>,
    /// Columns drawn as value-count bar charts after each load.
    #[serde(default = "default_bar_columns")]
    pub bar_columns: Vec<String>,
    /// Rows in the initial preview table.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            label_column: default_label_column(),
            source_column: default_source_column(),
            histogram_columns: default_histogram_columns(),
            bar_columns: default_bar_columns(),
            preview_rows: default_preview_rows(),
        }
    }
}

impl AppConfig {
    /// The label column, unless it was configured empty.
    pub fn label_column(&self) -> Option<&str> {
        self.label_column.as_deref().filter(|l| !l.is_empty())
    }
}

/// Result of loading configuration
pub struct ConfigResult {
    pub config: AppConfig,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/rusty-census/config.toml
/// Returns defaults if the file doesn't exist or on read/parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&get_config_path())
}

pub fn load_config_from(path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", path);

    if !path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: AppConfig::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", path, e);
            return ConfigResult {
                config: AppConfig::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", path, e);
            ConfigResult {
                config: AppConfig::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("rusty-census")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_match_passenger_manifest() {
        let config = AppConfig::default();
        assert_eq!(config.label_column(), Some("Survived"));
        assert_eq!(config.source_column, "Source");
        assert_eq!(config.histogram_columns, vec!["Age", "Fare"]);
        assert_eq!(config.bar_columns, vec!["Sex", "Pclass", "Embarked"]);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
label_column = "Outcome"
histogram_columns = ["Weight"]
"#,
        )
        .unwrap();
        assert_eq!(config.label_column(), Some("Outcome"));
        assert_eq!(config.histogram_columns, vec!["Weight"]);
        assert_eq!(config.bar_columns, default_bar_columns());
    }

    #[test]
    fn empty_label_disables_cross_tab() {
        let config: AppConfig = toml::from_str(r#"label_column = """#).unwrap();
        assert_eq!(config.label_column(), None);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(&dir.path().join("config.toml"));
        assert_eq!(result.config, AppConfig::default());
        assert!(result.warning.is_none());
    }

    #[test]
    fn invalid_file_warns_and_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "preview_rows = \"many\"").unwrap();
        let result = load_config_from(&path);
        assert_eq!(result.config, AppConfig::default());
        assert!(result.warning.unwrap().starts_with("Invalid config"));
    }

    #[test]
    fn config_path_ends_with_app_dir() {
        let path = get_config_path();
        assert!(path.ends_with("rusty-census/config.toml"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_unknown_keys_are_rejected(key in "[a-z]{3,10}".prop_filter(
            "not a known field",
            |k| ![
                "label_column",
                "source_column",
                "histogram_columns",
                "bar_columns",
                "preview_rows",
            ]
            .contains(&k.as_str())
        )) {
            let toml_content = format!("{key} = 1\n");
            let config: Result<AppConfig, _> = toml::from_str(&toml_content);
            prop_assert!(config.is_err());
        }
    }
}
