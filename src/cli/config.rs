// FILE: src/cli/config.rs

use crate::error::{Result, UtilitiesError};
use crate::PluginOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub options: Option<PluginOptions>,
    pub prefix: Option<String>,
    /// Theme overrides; sections under `extend` merge into the defaults.
    pub theme: Option<Value>,
    pub disabled_core_plugins: Option<Vec<String>>,
    /// Class candidates always included in `build`.
    pub content: Option<Vec<String>>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| {
        UtilitiesError::file_not_found(format!("Config file {}: {}", config_path, e))
    })?;

    let config: ConfigFile = if config_path.ends_with(".json") {
        serde_json::from_str(&config_content)
            .map_err(|e| UtilitiesError::invalid_format(format!("Invalid JSON config: {}", e)))?
    } else if config_path.ends_with(".toml") {
        let table: toml::Value = toml::from_str(&config_content).map_err(|e| {
            UtilitiesError::invalid_format(format!("Invalid TOML config: {}", e))
        })?;
        // Round-trip through JSON so the free-form theme lands as a JSON value.
        let json = serde_json::to_value(table)
            .map_err(|e| UtilitiesError::invalid_format(format!("Invalid TOML config: {}", e)))?;
        serde_json::from_value(json)
            .map_err(|e| UtilitiesError::invalid_format(format!("Invalid TOML config: {}", e)))?
    } else {
        return Err(UtilitiesError::InvalidFormat {
            message: "Config file must be .json or .toml format".to_string(),
        });
    };

    if let Some(options) = &config.options {
        options.validate()?;
    }

    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utility;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_config(
            ".json",
            r#"{
                "options": { "variableNamespace": "ui", "except": ["ring"] },
                "prefix": "tw-",
                "theme": { "extend": { "dimension": { "half": "50v%" } } },
                "disabledCorePlugins": ["ringOpacity"],
                "content": ["center", "d-half"]
            }"#,
        );

        let config = load(file.path().to_str().unwrap()).unwrap();
        let options = config.options.unwrap();
        assert_eq!(options.variable_namespace, "ui");
        assert_eq!(options.except, vec![Utility::Ring]);
        assert_eq!(config.prefix.as_deref(), Some("tw-"));
        assert_eq!(config.theme.unwrap()["extend"]["dimension"]["half"], "50v%");
        assert_eq!(config.disabled_core_plugins.unwrap(), vec!["ringOpacity"]);
        assert_eq!(config.content.unwrap().len(), 2);
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_config(
            ".toml",
            r#"
prefix = "tw-"
content = ["flex/4"]

[options]
maxGridTemplate = 6
only = ["layout", "center"]

[theme.extend.stretchWidth]
narrow = "40rem"
"#,
        );

        let config = load(file.path().to_str().unwrap()).unwrap();
        let options = config.options.unwrap();
        assert_eq!(options.max_grid_template, 6);
        assert_eq!(options.only, vec![Utility::Layout, Utility::Center]);
        assert_eq!(options.variable_namespace, "baleada");
        assert_eq!(config.theme.unwrap()["extend"]["stretchWidth"]["narrow"], "40rem");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let file = write_config(".yaml", "prefix: tw-");
        assert!(matches!(
            load(file.path().to_str().unwrap()),
            Err(UtilitiesError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_rejects_invalid_options() {
        let file = write_config(".json", r#"{ "options": { "variableNamespace": "" } }"#);
        assert!(matches!(
            load(file.path().to_str().unwrap()),
            Err(UtilitiesError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load("/definitely/not/here.json"),
            Err(UtilitiesError::FileNotFound { .. })
        ));
    }
}
