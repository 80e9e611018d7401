//! Access Token Issue and Verification
//!
//! Stateless HS256 JWTs carrying `{sub, exp}`. Validity is purely a function
//! of the signature and the expiry claim, recomputed on every request; there
//! is no revocation list, so compromise recovery is secret rotation.
//!
//! Expiry is checked with zero leeway: no clock skew is tolerated beyond the
//! verifying process's own clock.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(120 * 60);

/// Token verification errors, distinguishable by failure mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is not a structurally valid JWT
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the process secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Expiry claim is in the past
    #[error("Token has expired")]
    Expired,

    /// Subject claim is absent or empty
    #[error("Token is missing a subject")]
    MissingSubject,

    /// Signing failed (should not happen with an HMAC key)
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// JWT claim set
///
/// `sub` is optional at the serde level so that a missing subject surfaces as
/// [`TokenError::MissingSubject`] instead of a generic parse failure.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    exp: i64,
}

/// Stateless token issuer/verifier bound to a process-wide secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: ChronoDuration,
}

impl TokenIssuer {
    /// Create an issuer from a shared secret and a token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::minutes(120)),
        }
    }

    /// Issue a token for `subject`, expiring at issue-time plus the
    /// configured lifetime
    ///
    /// The expiry is fixed at mint time and never extended; callers wanting a
    /// longer session must obtain a fresh token.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue with an explicit issue instant; lets tests mint tokens around
    /// the expiry boundary without sleeping
    fn issue_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        match data.claims.sub {
            Some(sub) if !sub.is_empty() => Ok(sub),
            _ => Err(TokenError::MissingSubject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-test-secret-test-secret!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::from_secs(120 * 60))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_verify_just_inside_ttl() {
        // Minted 119 minutes ago with a 120-minute lifetime: still valid
        let issuer = issuer();
        let token = issuer
            .issue_at("alice", Utc::now() - ChronoDuration::minutes(119))
            .unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_verify_just_past_ttl() {
        // Minted 121 minutes ago with a 120-minute lifetime: expired
        let issuer = issuer();
        let token = issuer
            .issue_at("alice", Utc::now() - ChronoDuration::minutes(121))
            .unwrap();
        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_malformed() {
        let issuer = issuer();
        assert_eq!(issuer.verify("not-a-jwt"), Err(TokenError::Malformed));
        assert_eq!(issuer.verify(""), Err(TokenError::Malformed));
        assert_eq!(
            issuer.verify("aaaa.bbbb.cccc"),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = issuer().issue("alice").unwrap();
        let other = TokenIssuer::new(b"a-different-secret", Duration::from_secs(7200));
        assert_eq!(other.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_verify_missing_subject() {
        // Hand-mint a claim set without `sub`
        let claims = Claims {
            sub: None,
            exp: (Utc::now() + ChronoDuration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(issuer().verify(&token), Err(TokenError::MissingSubject));
    }

    #[test]
    fn test_verify_empty_subject() {
        let claims = Claims {
            sub: Some(String::new()),
            exp: (Utc::now() + ChronoDuration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert_eq!(issuer().verify(&token), Err(TokenError::MissingSubject));
    }
}
