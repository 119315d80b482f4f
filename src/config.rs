use crate::fiql::{EntityKind, ParseContext};
use crate::schema::AttrSchemaType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "fiqlc";
const CONFIG_FILE: &str = "config.json";

/// CLI configuration stored in the app data directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Entity kind queries target unless overridden on the command line
    #[serde(default)]
    pub entity: EntityKind,

    /// Attribute name to value type, used for typed comparisons
    #[serde(default)]
    pub schema_types: BTreeMap<String, AttrSchemaType>,

    /// Plain properties accepted when decoding; absent accepts any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeSet<String>>,
}

impl AppConfig {
    /// Load config from `path`, or from the app data directory when `None`.
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => get_config_path()?,
        };

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            log::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Merge schema types read from a separate JSON file; file entries win
    pub fn merge_schema_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file {}", path.display()))?;
        let types: BTreeMap<String, AttrSchemaType> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse schema file {}", path.display()))?;
        self.schema_types.extend(types);
        Ok(())
    }

    /// Grammar context for decoding
    pub fn parse_context(&self) -> ParseContext {
        ParseContext {
            properties: self.properties.clone(),
            ..ParseContext::default()
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    Ok(base.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("absent.json"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.entity, EntityKind::User);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = AppConfig {
            entity: EntityKind::Group,
            ..AppConfig::default()
        };
        config.schema_types.insert("age".to_string(), AttrSchemaType::Long);
        config.save(&path).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"entity": "ANY_OBJECT"}"#).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.entity, EntityKind::AnyObject);
        assert!(config.schema_types.is_empty());
        assert!(config.parse_context().allows("anything"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_merge_schema_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"age": {"type": "LONG"}}"#).unwrap();

        let mut config = AppConfig::default();
        config.schema_types.insert("age".to_string(), AttrSchemaType::String);
        config.merge_schema_file(&path).unwrap();
        assert_eq!(config.schema_types["age"], AttrSchemaType::Long);
    }

    #[test]
    fn test_parse_context_restricts() {
        let config = AppConfig {
            properties: Some(BTreeSet::from(["email".to_string()])),
            ..AppConfig::default()
        };
        let ctx = config.parse_context();
        assert!(ctx.allows("email"));
        assert!(!ctx.allows("surname"));
    }
}
