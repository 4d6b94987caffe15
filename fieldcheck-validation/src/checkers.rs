//! Replaceable checkers for the `password` and `email` rules.
//!
//! Both rules delegate to a checker held by the [`Validator`](crate::Validator).
//! Any closure with the right signature is a checker:
//!
//! ```
//! use fieldcheck_validation::{EmailChecker, PasswordChecker};
//!
//! let deny_example = |value: &str, field: &str| {
//!     value
//!         .ends_with("@example.com")
//!         .then(|| format!("Field '{}' uses a blocked domain", field))
//! };
//! assert!(EmailChecker::check(&deny_example, "a@example.com", "email").is_some());
//!
//! let long_enough = |value: &str, field: &str| {
//!     if value.len() < 12 {
//!         vec![format!("Field '{}' requires at least 12 characters", field)]
//!     } else {
//!         Vec::new()
//!     }
//! };
//! assert_eq!(PasswordChecker::check(&long_enough, "short", "password").len(), 1);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// The pattern used by the default email checker.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern compiles"));

/// Checks the `password` rule. May report several violations.
pub trait PasswordChecker: Send + Sync {
    fn check(&self, value: &str, field: &str) -> Vec<String>;
}

/// Checks the `email` rule. Reports at most one violation.
pub trait EmailChecker: Send + Sync {
    fn check(&self, value: &str, field: &str) -> Option<String>;
}

impl<F> PasswordChecker for F
where
    F: Fn(&str, &str) -> Vec<String> + Send + Sync,
{
    fn check(&self, value: &str, field: &str) -> Vec<String> {
        self(value, field)
    }
}

impl<F> EmailChecker for F
where
    F: Fn(&str, &str) -> Option<String> + Send + Sync,
{
    fn check(&self, value: &str, field: &str) -> Option<String> {
        self(value, field)
    }
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Printable ASCII punctuation and symbols: `!`-`/`, `:`-`@`, `[`-`^`, `{`-`~`.
///
/// Backtick and underscore (`_`, `` ` ``) sit outside these ranges and do not count.
pub fn is_special_character(c: u8) -> bool {
    matches!(c, b'!'..=b'/' | b':'..=b'@' | b'['..=b'^' | b'{'..=b'~')
}

/// Requires one digit, one special character, one upper case and one lower
/// case ASCII letter.
///
/// Bytes outside those classes (including every byte of a non-ASCII
/// character) are ignored. Violations are reported in the order digit,
/// special character, upper case, lower case.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPasswordChecker;

impl PasswordChecker for DefaultPasswordChecker {
    fn check(&self, value: &str, field: &str) -> Vec<String> {
        let mut digit = false;
        let mut special = false;
        let mut upper = false;
        let mut lower = false;

        for c in value.bytes() {
            if is_digit(c) {
                digit = true;
            } else if is_special_character(c) {
                special = true;
            } else if c.is_ascii_lowercase() {
                lower = true;
            } else if c.is_ascii_uppercase() {
                upper = true;
            }
        }

        [
            (digit, "digit"),
            (special, "special character"),
            (upper, "upper case letter"),
            (lower, "lower case letter"),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, class)| format!("Field '{}' requires at least one {}", field, class))
        .collect()
    }
}

/// Matches the value against a regular expression.
#[derive(Debug, Clone)]
pub struct RegexEmailChecker {
    regex: Regex,
}

impl RegexEmailChecker {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for RegexEmailChecker {
    /// Uses [`DEFAULT_EMAIL_PATTERN`], compiled once per process.
    fn default() -> Self {
        Self {
            regex: EMAIL_REGEX.clone(),
        }
    }
}

impl EmailChecker for RegexEmailChecker {
    fn check(&self, value: &str, field: &str) -> Option<String> {
        if self.regex.is_match(value) {
            None
        } else {
            Some(format!("Field '{}' is not a valid email", field))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Vec<String> {
        DefaultPasswordChecker.check(value, "Field")
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(password("Passwo1!").is_empty());
        assert!(password("AAAAAAAa1!").is_empty());
    }

    #[test]
    fn test_each_missing_class_is_reported_once() {
        assert_eq!(password("Passwor!"), vec!["Field 'Field' requires at least one digit"]);
        assert_eq!(
            password("Passwor1"),
            vec!["Field 'Field' requires at least one special character"]
        );
        assert_eq!(
            password("PASSWO1!"),
            vec!["Field 'Field' requires at least one lower case letter"]
        );
        assert_eq!(
            password("passwo1!"),
            vec!["Field 'Field' requires at least one upper case letter"]
        );
    }

    #[test]
    fn test_empty_password_misses_everything_in_order() {
        assert_eq!(
            password(""),
            vec![
                "Field 'Field' requires at least one digit",
                "Field 'Field' requires at least one special character",
                "Field 'Field' requires at least one upper case letter",
                "Field 'Field' requires at least one lower case letter",
            ]
        );
    }

    #[test]
    fn test_non_ascii_is_uncategorized() {
        // 'É' and 'ß' are letters, but not ASCII ones.
        let violations = password("Éß1!");
        assert_eq!(violations.len(), 2);
        assert!(violations[0].ends_with("upper case letter"));
        assert!(violations[1].ends_with("lower case letter"));
    }

    #[test]
    fn test_special_character_ranges() {
        for c in b"!/:@[^{~".iter().copied() {
            assert!(is_special_character(c), "{}", c as char);
        }
        for c in b"_`09azAZ ".iter().copied() {
            assert!(!is_special_character(c), "{}", c as char);
        }
    }

    #[test]
    fn test_default_email() {
        let checker = RegexEmailChecker::default();
        for valid in ["test@test.com", "test@test.co", "first.last+tag@mail.example.org"] {
            assert_eq!(checker.check(valid, "Field"), None, "{}", valid);
        }
        for invalid in ["test@test.c", "@test.com", "test@.com", "test.com", ""] {
            assert_eq!(
                checker.check(invalid, "Field").as_deref(),
                Some("Field 'Field' is not a valid email"),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn test_custom_email_pattern() {
        let checker = RegexEmailChecker::new(r"^[a-z]+@corp\.example$").unwrap();
        assert_eq!(checker.pattern(), r"^[a-z]+@corp\.example$");
        assert!(checker.check("ana@corp.example", "email").is_none());
        assert!(checker.check("ana@test.com", "email").is_some());
        assert!(RegexEmailChecker::new("(").is_err());
    }

    #[test]
    fn test_closures_are_checkers() {
        let never = |_: &str, _: &str| -> Option<String> { None };
        assert!(EmailChecker::check(&never, "not an email", "email").is_none());

        let always = |_: &str, field: &str| vec![format!("{} rejected", field)];
        assert_eq!(PasswordChecker::check(&always, "x", "pw"), vec!["pw rejected"]);
    }
}
