//! PKCE (Proof Key for Code Exchange) verifier and challenge generation.
//!
//! Per RFC 7636: the verifier is a URL-safe random string of 43 to 128
//! characters, the challenge is its SHA-256 hash encoded as base64url
//! without padding.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Minimum code verifier length allowed by RFC 7636.
pub const MIN_CODE_VERIFIER_LENGTH: usize = 43;

/// Maximum code verifier length allowed by RFC 7636.
pub const MAX_CODE_VERIFIER_LENGTH: usize = 128;

/// Default length for generated code verifiers.
pub const DEFAULT_CODE_VERIFIER_LENGTH: usize = 128;

/// Generate a random code verifier of exactly `length` characters.
///
/// The verifier is drawn from a CSPRNG and uses only the base64url
/// alphabet. Fails with [`Error::InvalidParameter`] when `length` is
/// outside `[43, 128]`.
pub fn generate_code_verifier(length: usize) -> Result<String> {
    if !(MIN_CODE_VERIFIER_LENGTH..=MAX_CODE_VERIFIER_LENGTH).contains(&length) {
        return Err(Error::InvalidParameter(format!(
            "code verifier length must be between {MIN_CODE_VERIFIER_LENGTH} and {MAX_CODE_VERIFIER_LENGTH}, got {length}"
        )));
    }

    // 96 random bytes encode to exactly 128 base64url characters,
    // enough for any allowed length.
    let mut bytes = [0u8; 96];
    rand::rng().fill_bytes(&mut bytes);
    let encoded = URL_SAFE_NO_PAD.encode(bytes);

    Ok(encoded[..length].to_string())
}

/// Compute the S256 code challenge for a verifier.
///
/// Pure function: the same verifier always yields the same challenge.
/// Fails with [`Error::InvalidParameter`] when the verifier length is
/// outside `[43, 128]`.
pub fn compute_code_challenge(verifier: &str) -> Result<String> {
    if !(MIN_CODE_VERIFIER_LENGTH..=MAX_CODE_VERIFIER_LENGTH).contains(&verifier.len()) {
        return Err(Error::InvalidParameter(format!(
            "code verifier must be between {MIN_CODE_VERIFIER_LENGTH} and {MAX_CODE_VERIFIER_LENGTH} characters, got {}",
            verifier.len()
        )));
    }

    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifier_has_requested_length() {
        for length in [43, 64, 128] {
            let verifier = generate_code_verifier(length).unwrap();
            assert_eq!(verifier.len(), length);
        }
    }

    #[test]
    fn verifier_uses_url_safe_alphabet() {
        let verifier = generate_code_verifier(128).unwrap();
        assert!(
            verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn verifier_length_out_of_bounds() {
        assert!(matches!(
            generate_code_verifier(42),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_code_verifier(129),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn verifiers_are_unique() {
        let a = generate_code_verifier(128).unwrap();
        let b = generate_code_verifier(128).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn challenge_is_deterministic() {
        let verifier = generate_code_verifier(64).unwrap();
        let first = compute_code_challenge(&verifier).unwrap();
        let second = compute_code_challenge(&verifier).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn challenge_matches_known_vector() {
        // Verifier from RFC 7636 appendix B.
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        let challenge = compute_code_challenge(verifier).unwrap();
        assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
    }

    #[test]
    fn challenge_rejects_bad_verifier_length() {
        assert!(matches!(
            compute_code_challenge("too-short"),
            Err(Error::InvalidParameter(_))
        ));
        let long = "a".repeat(129);
        assert!(matches!(
            compute_code_challenge(&long),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn challenge_is_base64url_no_padding() {
        let verifier = generate_code_verifier(43).unwrap();
        let challenge = compute_code_challenge(&verifier).unwrap();
        assert_eq!(challenge.len(), 43);
        assert!(!challenge.contains('='));
        assert!(!challenge.contains('+'));
        assert!(!challenge.contains('/'));
    }
}
