// fieldcheck - declarative field validation for Rust records
//
// A facade over the member crates: the validation engine and its derive
// macro, logging, and the optional configuration and HTTP helper crates.

// Re-export the engine
pub use fieldcheck_validation::*;

pub use fieldcheck_log as log;

// Re-export optional crates
#[cfg(feature = "config")]
pub use fieldcheck_config;

#[cfg(feature = "http-client")]
pub use fieldcheck_http_client;

/// Common imports.
///
/// ```
/// use fieldcheck::prelude::*;
///
/// #[derive(Validate)]
/// #[validate(crate = "fieldcheck")]
/// struct Login {
///     #[validate(rules = "required,email")]
///     email: String,
/// }
///
/// let login = Login { email: String::new() };
/// assert_eq!(Validator::new().validate(&login).len(), 2);
/// ```
pub mod prelude {
    pub use fieldcheck_validation::{
        EmailChecker, Field, FieldValue, LengthUnit, PasswordChecker, RecordSchema, RuleError,
        RuleSet, Validate, ValidationError, ValidationErrors, Validator, ValidatorConfig,
        WalkError, global,
    };

    #[cfg(feature = "config")]
    pub use fieldcheck_config::ConfigManager;

    #[cfg(feature = "http-client")]
    pub use fieldcheck_http_client::{HttpClient, HttpClientConfig, HttpClientError, make_request};
}
