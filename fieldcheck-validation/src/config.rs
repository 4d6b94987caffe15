// Validator configuration

use crate::LengthUnit;
use fieldcheck_config::{ConfigError, ConfigManager};
use std::path::Path;

/// Settings applied by [`Validator::from_config`](crate::Validator::from_config).
///
/// Keys, as read from a [`ConfigManager`]:
///
/// | key | values | default |
/// |---|---|---|
/// | `length_unit` | `bytes`, `chars` | `bytes` |
/// | `strict_rules` | boolean | `false` |
/// | `email_pattern` | regular expression | built-in pattern |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub length_unit: LengthUnit,
    /// Reject unknown rule tokens and malformed bounds where an error can be
    /// returned (JSON validation) instead of ignoring them.
    pub strict_rules: bool,
    /// Replaces the email checker with one matching this pattern.
    pub email_pattern: Option<String>,
}

impl ValidatorConfig {
    /// Prefix of the environment variables read by [`ValidatorConfig::from_env`].
    pub const ENV_PREFIX: &'static str = "FIELDCHECK";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    pub fn with_strict_rules(mut self, strict: bool) -> Self {
        self.strict_rules = strict;
        self
    }

    pub fn with_email_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.email_pattern = Some(pattern.into());
        self
    }

    /// Read the settings from a manager. Absent keys keep their defaults.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if manager.has("length_unit") {
            let raw = manager.get_string("length_unit")?;
            config.length_unit = LengthUnit::parse(&raw).ok_or_else(|| {
                ConfigError::invalid_value("length_unit", format!("'{}' is not bytes or chars", raw))
            })?;
        }

        if manager.has("strict_rules") {
            config.strict_rules = manager.get_bool("strict_rules")?;
        }

        if manager.has("email_pattern") {
            config.email_pattern = Some(manager.get_string("email_pattern")?);
        }

        Ok(config)
    }

    /// Read `FIELDCHECK_LENGTH_UNIT`, `FIELDCHECK_STRICT_RULES` and
    /// `FIELDCHECK_EMAIL_PATTERN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let manager = ConfigManager::with_prefix(Self::ENV_PREFIX);
        manager.load_env()?;
        Self::from_manager(&manager)
    }

    /// Read a JSON, TOML or env file, picked by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let manager = ConfigManager::new();
        manager.load_file(path)?;
        Self::from_manager(&manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldcheck_config::FileFormat;

    #[test]
    fn test_defaults_when_empty() {
        let config = ValidatorConfig::from_manager(&ConfigManager::new()).unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.length_unit, LengthUnit::Bytes);
    }

    #[test]
    fn test_reads_toml_values() {
        let manager = ConfigManager::new();
        manager
            .load_str(
                r#"
                length_unit = "chars"
                strict_rules = true
                email_pattern = '^.+@corp\.example$'
            "#,
                FileFormat::Toml,
            )
            .unwrap();

        let config = ValidatorConfig::from_manager(&manager).unwrap();
        assert_eq!(config.length_unit, LengthUnit::Chars);
        assert!(config.strict_rules);
        assert_eq!(config.email_pattern.as_deref(), Some(r"^.+@corp\.example$"));
    }

    #[test]
    fn test_env_style_strings() {
        let manager = ConfigManager::new();
        manager.load_str("STRICT_RULES=1\nLENGTH_UNIT=bytes", FileFormat::Env).unwrap();

        let config = ValidatorConfig::from_manager(&manager).unwrap();
        assert!(config.strict_rules);
        assert_eq!(config.length_unit, LengthUnit::Bytes);
    }

    #[test]
    fn test_bad_length_unit() {
        let manager = ConfigManager::new();
        manager.set("length_unit", "words").unwrap();
        assert!(matches!(
            ValidatorConfig::from_manager(&manager),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
