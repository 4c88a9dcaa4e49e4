//! OAuth 2.0 PKCE authentication for the Volvo Cars API.
//!
//! Implements the Volvo ID authorization-code flow with PKCE (RFC 7636):
//! verifier/challenge generation, the authorization URL, the code
//! exchange, and refresh-before-expiry with a single in-flight refresh
//! regardless of concurrent demand.
//!
//! # Components
//!
//! - [`pkce`] — code verifier and challenge generation
//! - [`auth`] — [`VolvoCarsAuth`] token manager and the [`AccessTokenManager`] trait
//! - [`redact`] — masking of sensitive values before logging
//! - [`error`] — the shared [`Error`] taxonomy for auth and resource calls

pub mod auth;
pub mod error;
pub mod pkce;
pub mod redact;

pub use auth::{AccessTokenManager, AuthConfig, TokenResponse, VolvoCarsAuth};
pub use error::{Error, Result};
pub use redact::{REDACTED, redact_data, redact_url};
