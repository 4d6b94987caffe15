//! Declarative field validation for fieldcheck
//!
//! Each field of a record may carry a rule specification: a comma-separated
//! list of tokens such as `"required,min:8,max:64,password"`. Validating a
//! record walks its fields in declaration order, descends into nested records
//! and returns one human-readable message per failed rule. An empty list means
//! the record is valid.
//!
//! | token | fails when |
//! |---|---|
//! | `required` | the value is empty |
//! | `min:N` | length < N |
//! | `max:N` | length > N |
//! | `len:N` | length != N |
//! | `password` | the password checker objects (default: missing digit, special character, upper or lower case letter) |
//! | `email` | the email checker objects (default: regular expression) |
//!
//! Unknown tokens are ignored and a missing or non-numeric bound counts as
//! `0`. [`RuleSet::parse_strict`], [`Validator::audit`] and
//! [`RecordSchemaBuilder::try_build`] reject both instead.
//!
//! # Examples
//!
//! ## Deriving a descriptor
//!
//! ```
//! # #[cfg(feature = "derive")]
//! # {
//! use fieldcheck_validation::{Validate, Validator};
//!
//! #[derive(Validate)]
//! struct Address {
//!     #[validate(rules = "required,len:5", name = "ZIP code")]
//!     zip: String,
//! }
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[validate(rules = "required,email")]
//!     email: String,
//!     #[validate(rules = "required,min:8,password")]
//!     password: String,
//!     #[validate(nested)]
//!     address: Address,
//! }
//!
//! let signup = Signup {
//!     email: "ana@example.com".to_string(),
//!     password: "Passw0rd!".to_string(),
//!     address: Address { zip: "123".to_string() },
//! };
//!
//! assert_eq!(
//!     Validator::new().validate(&signup),
//!     vec!["Field 'ZIP code' must be exactly 5 characters long"]
//! );
//! # }
//! ```
//!
//! ## Replacing a checker
//!
//! ```
//! use fieldcheck_validation::Validator;
//!
//! let validator = Validator::new().with_email_checker(|value: &str, field: &str| {
//!     value
//!         .ends_with("@mailinator.com")
//!         .then(|| format!("Field '{}' uses a disposable address", field))
//! });
//!
//! assert_eq!(
//!     validator.check("x@mailinator.com", "email", "email"),
//!     vec!["Field 'email' uses a disposable address"]
//! );
//! ```

mod checkers;
mod config;
mod errors;
pub mod global;
mod rules;
mod schema;
mod traits;
mod validator;
mod validators;

pub use checkers::*;
pub use config::*;
pub use errors::*;
pub use rules::*;
pub use schema::*;
pub use traits::*;
pub use validator::*;
pub use validators::*;

pub use fieldcheck_config::ConfigError;

#[cfg(feature = "derive")]
pub use fieldcheck_derive::Validate;
