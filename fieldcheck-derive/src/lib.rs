//! `#[derive(Validate)]` for fieldcheck
//!
//! Generates the field descriptor of a struct with named fields so it can be
//! handed to a `fieldcheck_validation::Validator`.
//!
//! ## Field attributes
//!
//! - `#[validate(rules = "required,min:2")]` - rule specification of a
//!   string field (any `AsRef<str>` type)
//! - `#[validate(name = "E-mail")]` - name used in violation messages
//! - `#[validate(nested)]` - walk this field as a record of its own
//!
//! Without `name`, a field-level `#[serde(rename = "...")]` supplies the
//! display name, then the field identifier. Fields without a `validate`
//! attribute are not validated.
//!
//! Nested records are only walked when marked. A record-typed field that
//! lacks `#[validate(nested)]` is left out of the descriptor entirely, so
//! none of its violations are reported and nothing warns about it.
//! `Validator::audit` cannot catch this either; it only sees the
//! descriptor.
//!
//! ## Container attributes
//!
//! - `#[validate(crate = "path::to::fieldcheck_validation")]` - path used by
//!   the generated code, for crates that re-export the engine
//!
//! ```ignore
//! #[derive(Validate, Deserialize)]
//! struct Signup {
//!     #[validate(rules = "required,email")]
//!     #[serde(rename = "emailAddress")]
//!     email: String,
//!     #[validate(nested)]
//!     address: Address,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod expand;

#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand::derive_validate_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
