// Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Reads process environment variables, optionally scoped to a prefix.
///
/// With prefix `FIELDCHECK`, the variable `FIELDCHECK_LENGTH_UNIT` is exposed
/// under the key `length_unit`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Collect every matching variable, keys lowercased and stripped of the prefix.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        let mut vars = HashMap::new();

        for (key, value) in env::vars() {
            match self.prefix.as_deref() {
                Some(prefix) => {
                    if let Some(rest) = key.strip_prefix(prefix)
                        && let Some(rest) = rest.strip_prefix('_')
                        && !rest.is_empty()
                    {
                        vars.insert(rest.to_lowercase(), value);
                    }
                }
                None => {
                    vars.insert(key.to_lowercase(), value);
                }
            }
        }

        Ok(vars)
    }

    /// Read one variable by its unprefixed key.
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match self.prefix.as_deref() {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
