//! Typed HTTP client for the Volvo Cars vehicle API.
//!
//! Wraps the connected-vehicle, energy and location endpoints as typed
//! operations on top of a token source implementing
//! [`AccessTokenManager`] (usually `volvocars_auth::VolvoCarsAuth`).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use volvocars_auth::{AuthConfig, VolvoCarsAuth};
//! use volvocars_client::VolvoCarsApi;
//!
//! # async fn example() -> volvocars_client::Result<()> {
//! let http = reqwest::Client::new();
//! let auth = VolvoCarsAuth::new(
//!     http.clone(),
//!     AuthConfig::new("client-id", "client-secret", vec!["openid".into()], "https://example.com/cb"),
//! )?;
//!
//! // Send the user to auth.get_auth_uri(None), then:
//! auth.request_token("authorization-code").await?;
//!
//! let api = VolvoCarsApi::builder()
//!     .token_manager(Arc::new(auth))
//!     .api_key("vcc-api-key")
//!     .vin("YV1ABCDEFG1234567")
//!     .build()?;
//!
//! let odometer = api.vehicles().odometer().await?;
//! println!("{:?}", odometer.get("odometer"));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod scopes;
pub mod types;

pub use client::{API_URL, VolvoCarsApi, VolvoCarsApiBuilder};
pub use types::*;
pub use volvocars_auth::{AccessTokenManager, Error, Result};
