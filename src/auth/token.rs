use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Token lifetime: one hour from issuance.
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Rejection message for any token that fails decoding for a reason other
/// than expiry. Part of the public contract; a token with a flipped signature
/// bit and a token that is not a JWT at all are intentionally
/// indistinguishable.
pub const MSG_TOKEN_MALFORMED: &str =
    "Authorization token is invalid: The token is malformed.";

/// Rejection message for a well-formed, correctly signed token whose expiry
/// has passed.
pub const MSG_TOKEN_EXPIRED: &str = "Authorization token expired";

/// Represents the claims encoded within a session token.
///
/// The user id is the only application claim; `iat`/`exp` are standard expiry
/// metadata. The token is stateless: nothing else is needed to validate it
/// besides the signing secret and a user lookup.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identifier of the owning user.
    pub id: Uuid,
    /// Issuance timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and validates stateless session tokens (HS256).
///
/// The signing secret is handed in at construction, distinct from the vault's
/// encryption key. Cloning is cheap; the keys are shared, immutable state.
#[derive(Clone)]
pub struct SessionAuth {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionAuth {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generates a signed token for a given user ID, expiring in one hour.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::seconds(TOKEN_TTL_SECS))
            .expect("valid timestamp");

        let claims = Claims {
            id: user_id,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token's signature and expiry and decodes its claims.
    ///
    /// Expiry gets its own rejection message; every other failure (garbage
    /// input, tampered signature, payload missing the id claim) is reported
    /// as malformed.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized(MSG_TOKEN_EXPIRED.into()),
                _ => AppError::Unauthorized(MSG_TOKEN_MALFORMED.into()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionAuth {
        SessionAuth::new("test_secret_for_sessions")
    }

    fn assert_rejected_with(result: Result<Claims, AppError>, expected_msg: &str) {
        match result {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, expected_msg),
            Ok(_) => panic!("token should have been rejected"),
            Err(e) => panic!("unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let session = session();
        let user_id = Uuid::new_v4();

        let token = session.issue(user_id).unwrap();
        let claims = session.decode(&token).unwrap();

        assert_eq!(claims.id, user_id);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS as usize);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        assert_rejected_with(session().decode("invalid-token"), MSG_TOKEN_MALFORMED);
    }

    #[test]
    fn test_tampered_signature_is_malformed() {
        let session = session();
        let mut token = session.issue(Uuid::new_v4()).unwrap();

        // Flip the last character of the signature segment.
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        assert_rejected_with(session.decode(&token), MSG_TOKEN_MALFORMED);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_malformed() {
        let token = SessionAuth::new("a_completely_different_secret")
            .issue(Uuid::new_v4())
            .unwrap();

        assert_rejected_with(session().decode(&token), MSG_TOKEN_MALFORMED);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let session = session();
        let expiration = Utc::now()
            .checked_sub_signed(Duration::hours(2))
            .expect("valid timestamp");

        let claims = Claims {
            id: Uuid::new_v4(),
            iat: expiration.timestamp() as usize - TOKEN_TTL_SECS as usize,
            exp: expiration.timestamp() as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_for_sessions".as_bytes()),
        )
        .unwrap();

        assert_rejected_with(session.decode(&expired_token), MSG_TOKEN_EXPIRED);
    }
}
