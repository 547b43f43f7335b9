//! Issuing and verifying signed session tokens.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use crate::error::TokenError;
use crate::session::SessionClaims;

/// Issues and verifies signed session tokens.
///
/// Tokens are HS256 JWTs whose payload is [`SessionClaims`]. Verification
/// enforces the signature and the `exp` claim with zero leeway; a token
/// that fails verification for any reason must be treated by callers
/// exactly like an absent token.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec signing and verifying with the given shared secret.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Signs the claim set into a compact token string.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if serialization or signing fails.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding).map_err(|e| TokenError::Encoding {
            reason: e.to_string(),
        })
    }

    /// Verifies a raw token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for a token past its `exp`,
    /// [`TokenError::BadSignature`] for a signature mismatch, and
    /// [`TokenError::Invalid`] for anything else (malformed token,
    /// missing claims, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Invalid {
                    reason: e.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleClaim;
    use chrono::{Duration, Utc};

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-at-least-this-long")
    }

    #[test]
    fn issue_then_verify_preserves_claims() {
        let codec = codec();
        let claims = SessionClaims::new("usr_123", RoleClaim::Student, Duration::hours(8));

        let token = codec.issue(&claims).expect("issue");
        let verified = codec.verify(&token).expect("verify");

        assert_eq!(verified.subject(), "usr_123");
        assert_eq!(verified.role(), RoleClaim::Student);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        let claims = SessionClaims::new("usr_123", RoleClaim::Admin, Duration::seconds(-60));

        let token = codec.issue(&claims).expect("issue");
        let err = codec.verify(&token).expect_err("should reject");

        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let claims = SessionClaims::new("usr_123", RoleClaim::Admin, Duration::hours(1));
        let token = TokenCodec::new("some-other-secret-entirely")
            .issue(&claims)
            .expect("issue");

        let err = codec().verify(&token).expect_err("should reject");
        assert_eq!(err, TokenError::BadSignature);
    }

    #[test]
    fn garbage_token_is_rejected() {
        let err = codec()
            .verify("definitely.not.a-token")
            .expect_err("should reject");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[test]
    fn legacy_mahasiswa_token_verifies_as_student() {
        // Tokens minted by earlier releases carry the original wire value
        // for the student role.
        let secret = "test-secret-at-least-this-long";
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "sub": "usr_legacy",
            "role": "mahasiswa",
            "iat": now,
            "exp": now + 3600,
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode");

        let verified = TokenCodec::new(secret).verify(&token).expect("verify");
        assert_eq!(verified.role(), RoleClaim::Student);
    }

    #[test]
    fn foreign_role_claim_verifies_as_unknown() {
        let secret = "test-secret-at-least-this-long";
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "sub": "usr_foreign",
            "role": "superuser",
            "iat": now,
            "exp": now + 3600,
        });
        let token = encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode");

        let verified = TokenCodec::new(secret).verify(&token).expect("verify");
        assert_eq!(verified.role(), RoleClaim::Unknown);
        assert_eq!(verified.resolved_role(), None);
    }
}
