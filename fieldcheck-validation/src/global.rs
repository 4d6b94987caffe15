//! Process-wide validator.
//!
//! [`Validate::validate`](crate::Validate::validate) and [`validate`] use a
//! validator shared by the whole process. Its checkers can be replaced and
//! reset at any time; every validation takes a snapshot of the current
//! validator when it starts, so a swap made while a validation is running
//! applies to the next validation, never to half of the current one.
//!
//! Prefer passing a [`Validator`] explicitly where the caller controls
//! construction. These functions exist for code that configures checkers
//! once at startup or in test setup.

use crate::{EmailChecker, PasswordChecker, Validate, Validator};
use fieldcheck_log::debug;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

static GLOBAL: Lazy<RwLock<Validator>> = Lazy::new(|| RwLock::new(Validator::new()));

/// A snapshot of the process-wide validator.
pub fn current() -> Validator {
    GLOBAL.read().clone()
}

/// Validate with the process-wide validator.
pub fn validate(record: &dyn Validate) -> Vec<String> {
    current().validate(record)
}

/// Replace the whole process-wide validator, e.g. one built from configuration.
pub fn install(validator: Validator) {
    debug!(target: "fieldcheck::global", "installing validator {:?}", validator);
    *GLOBAL.write() = validator;
}

fn update(f: impl FnOnce(Validator) -> Validator) {
    let mut slot = GLOBAL.write();
    let next = f(slot.clone());
    *slot = next;
}

pub fn set_password_checker(checker: impl PasswordChecker + 'static) {
    debug!(target: "fieldcheck::global", "password checker replaced");
    update(|v| v.with_password_checker(checker));
}

pub fn reset_password_checker() {
    debug!(target: "fieldcheck::global", "password checker reset to default");
    update(Validator::reset_password_checker);
}

pub fn set_email_checker(checker: impl EmailChecker + 'static) {
    debug!(target: "fieldcheck::global", "email checker replaced");
    update(|v| v.with_email_checker(checker));
}

pub fn reset_email_checker() {
    debug!(target: "fieldcheck::global", "email checker reset to default");
    update(Validator::reset_email_checker);
}
