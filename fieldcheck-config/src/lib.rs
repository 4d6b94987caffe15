//! Layered configuration for fieldcheck
//!
//! A [`ConfigManager`] holds a flat map of keys to JSON values. Sources are
//! applied in the order they are loaded, later sources overriding earlier ones:
//!
//! ```
//! use fieldcheck_config::{ConfigManager, FileFormat};
//!
//! let manager = ConfigManager::new();
//! manager.load_str(r#"length_unit = "chars""#, FileFormat::Toml).unwrap();
//! manager.set("strict_rules", true).unwrap();
//!
//! assert_eq!(manager.get_string("length_unit").unwrap(), "chars");
//! assert!(manager.get_bool("strict_rules").unwrap());
//! ```

pub mod env;
pub mod error;
pub mod loader;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Main configuration store
#[derive(Clone, Default)]
pub struct ConfigManager {
    values: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager whose environment loads only see `PREFIX_*` variables.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            values: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let vars = loader.load()?;

        let mut values = self.values.write();
        for (key, value) in vars {
            values.insert(key, serde_json::Value::String(value));
        }

        Ok(())
    }

    /// Load a `.env` file into the process environment, then load the environment.
    ///
    /// Without a path, a missing `.env` in the working directory is not an error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Load a file, detecting the format from its extension.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::auto(path)?.load_file(path)?;
        self.merge_value(data)
    }

    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).parse(content)?;
        self.merge_value(data)
    }

    fn merge_value(&self, data: serde_json::Value) -> Result<()> {
        let serde_json::Value::Object(map) = data else {
            return Err(ConfigError::ParseError(
                "configuration root must be a table/object".to_string(),
            ));
        };

        let mut values = self.values.write();
        for (key, value) in map {
            values.insert(key, value);
        }
        Ok(())
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.values.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .raw(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// The stored value as-is, without deserialization.
    pub fn raw(&self, key: &str) -> Option<serde_json::Value> {
        self.values.read().get(key).cloned()
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    /// Read a boolean, accepting JSON booleans and the strings
    /// `true`/`false`/`1`/`0` that environment variables produce.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.raw(key) {
            None => Err(ConfigError::KeyNotFound(key.to_string())),
            Some(serde_json::Value::Bool(b)) => Ok(b),
            Some(serde_json::Value::String(s)) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::invalid_value(key, format!("'{}' is not a boolean", s))),
            },
            Some(other) => Err(ConfigError::invalid_value(
                key,
                format!("expected a boolean, found {}", other),
            )),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    /// Copy every key of `other` into this manager, overriding existing keys.
    pub fn merge(&self, other: &ConfigManager) {
        if Arc::ptr_eq(&self.values, &other.values) {
            return;
        }
        let theirs = other.values.read();
        let mut ours = self.values.write();
        for (key, value) in theirs.iter() {
            ours.insert(key.clone(), value.clone());
        }
    }
}
