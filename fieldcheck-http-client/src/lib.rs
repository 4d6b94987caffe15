//! # fieldcheck HTTP client
//!
//! One call, one request: send it, read the whole body, decode it as JSON and
//! return it with the status code. A decoded record can then go straight to
//! the validator.
//!
//! ```rust,no_run
//! use fieldcheck_http_client::{HttpClient, HttpClientConfig};
//! use serde::Deserialize;
//! use std::time::Duration;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     email: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(
//!         HttpClientConfig::builder().timeout(Duration::from_secs(5)).build(),
//!     )?;
//!
//!     let (user, status): (User, u16) = client
//!         .make_request(
//!             "https://api.example.com/users/1",
//!             "GET",
//!             [("Accept", "application/json")],
//!             Vec::new(),
//!         )
//!         .await?;
//!
//!     println!("{} {}", status, user.email);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use client::{HttpClient, make_request};
pub use config::{HttpClientConfig, HttpClientConfigBuilder};
pub use error::{HttpClientError, Result};

pub use http::{Method, StatusCode};
