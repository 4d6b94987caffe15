// Record walker and rule dispatch

use crate::{
    DefaultPasswordChecker, EmailChecker, ExactLength, Field, FieldValue, MaxLength, MinLength,
    PasswordChecker, RegexEmailChecker, Required, Rule, RuleError, RuleSet, Validate,
    ValidationError, ValidationErrors, ValidatorConfig,
};
use fieldcheck_config::ConfigError;
use std::fmt;
use std::sync::Arc;

/// Validates records against the rule specifications of their fields.
///
/// A `Validator` never changes after construction. Swapping a checker
/// produces a new validator, so validations running on a clone are never
/// affected by a later swap.
///
/// ```
/// use fieldcheck_validation::Validator;
///
/// let validator = Validator::new();
/// assert_eq!(
///     validator.check("", "name", "required,max:20"),
///     vec!["Field 'name' is required"]
/// );
/// ```
#[derive(Clone)]
pub struct Validator {
    password: Arc<dyn PasswordChecker>,
    email: Arc<dyn EmailChecker>,
    config: ValidatorConfig,
}

impl Validator {
    /// A validator with the default checkers and configuration.
    pub fn new() -> Self {
        Self {
            password: Arc::new(DefaultPasswordChecker),
            email: Arc::new(RegexEmailChecker::default()),
            config: ValidatorConfig::default(),
        }
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Build a validator from configuration.
    ///
    /// A configured `email_pattern` installs a [`RegexEmailChecker`] for it.
    pub fn from_config(config: ValidatorConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn with_password_checker(mut self, checker: impl PasswordChecker + 'static) -> Self {
        self.password = Arc::new(checker);
        self
    }

    pub fn with_email_checker(mut self, checker: impl EmailChecker + 'static) -> Self {
        self.email = Arc::new(checker);
        self
    }

    /// Restore [`DefaultPasswordChecker`].
    pub fn reset_password_checker(self) -> Self {
        self.with_password_checker(DefaultPasswordChecker)
    }

    /// Restore the built-in [`RegexEmailChecker`], whatever `email_pattern`
    /// the validator was configured with.
    pub fn reset_email_checker(self) -> Self {
        self.with_email_checker(RegexEmailChecker::default())
    }

    /// Walk `record` and return every violation message in traversal order.
    ///
    /// Fields are visited in declaration order; nested records are walked
    /// depth-first where they appear. An empty result means the record is
    /// valid.
    pub fn validate(&self, record: &dyn Validate) -> Vec<String> {
        self.validate_errors(record).into_messages()
    }

    /// Like [`Validator::validate`], keeping field, constraint and value.
    pub fn validate_errors(&self, record: &dyn Validate) -> ValidationErrors {
        let mut errors = Vec::new();
        self.walk(record, &mut errors);
        ValidationErrors::new(errors)
    }

    fn walk(&self, record: &dyn Validate, errors: &mut Vec<ValidationError>) {
        for field in record.fields() {
            match field.value {
                FieldValue::Record(nested) => self.walk(nested, errors),
                FieldValue::Text { value, rules } => {
                    let Some(spec) = rules.filter(|spec| !spec.is_empty()) else {
                        continue;
                    };
                    self.apply(value, field.label(), &RuleSet::parse(spec), errors);
                }
            }
        }
    }

    /// Check one value against a rule specification, parsed leniently.
    pub fn check(&self, value: &str, field: &str, spec: &str) -> Vec<String> {
        let mut errors = Vec::new();
        self.apply(value, field, &RuleSet::parse(spec), &mut errors);
        errors.into_iter().map(|e| e.message).collect()
    }

    /// Check one value against already parsed rules.
    pub fn check_rules(&self, value: &str, field: &str, rules: &RuleSet) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.apply(value, field, rules, &mut errors);
        errors
    }

    pub(crate) fn apply(
        &self,
        value: &str,
        field: &str,
        rules: &RuleSet,
        errors: &mut Vec<ValidationError>,
    ) {
        let unit = self.config.length_unit;

        for rule in rules {
            let outcome = match *rule {
                Rule::Required => Required::validate(value, field),
                Rule::Min(n) => MinLength(n).validate(value, field, unit),
                Rule::Max(n) => MaxLength(n).validate(value, field, unit),
                Rule::Len(n) => ExactLength(n).validate(value, field, unit),
                Rule::Password => {
                    errors.extend(self.password.check(value, field).into_iter().map(|message| {
                        ValidationError::new(field, message).with_constraint("password")
                    }));
                    continue;
                }
                Rule::Email => match self.email.check(value, field) {
                    Some(message) => Err(ValidationError::new(field, message)
                        .with_constraint("email")
                        .with_value(value)),
                    None => Ok(()),
                },
            };

            if let Err(error) = outcome {
                errors.push(error);
            }
        }
    }

    /// Strictly parse every rule specification reachable from `record`.
    ///
    /// Returns the first unknown token or malformed bound, located by the
    /// dotted path of declared field names. Meant for startup checks and
    /// tests; [`Validator::validate`] itself stays lenient. Independent of
    /// any validator's checkers or configuration.
    pub fn audit(record: &dyn Validate) -> Result<(), RuleError> {
        audit_fields(record, "")
    }
}

fn audit_fields(record: &dyn Validate, prefix: &str) -> Result<(), RuleError> {
    for Field { name, value, .. } in record.fields() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };

        match value {
            FieldValue::Record(nested) => audit_fields(nested, &path)?,
            FieldValue::Text {
                rules: Some(spec), ..
            } => {
                RuleSet::parse_strict(spec).map_err(|e| e.at(&path))?;
            }
            FieldValue::Text { rules: None, .. } => {}
        }
    }
    Ok(())
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    password: Option<Arc<dyn PasswordChecker>>,
    email: Option<Arc<dyn EmailChecker>>,
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    pub fn password_checker(mut self, checker: impl PasswordChecker + 'static) -> Self {
        self.password = Some(Arc::new(checker));
        self
    }

    /// Takes precedence over a configured `email_pattern`.
    pub fn email_checker(mut self, checker: impl EmailChecker + 'static) -> Self {
        self.email = Some(Arc::new(checker));
        self
    }

    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Validator, ConfigError> {
        let email: Arc<dyn EmailChecker> = match (self.email, &self.config.email_pattern) {
            (Some(checker), _) => checker,
            (None, Some(pattern)) => Arc::new(
                RegexEmailChecker::new(pattern)
                    .map_err(|e| ConfigError::invalid_value("email_pattern", e.to_string()))?,
            ),
            (None, None) => Arc::new(RegexEmailChecker::default()),
        };

        Ok(Validator {
            password: self.password.unwrap_or_else(|| Arc::new(DefaultPasswordChecker)),
            email,
            config: self.config,
        })
    }
}
