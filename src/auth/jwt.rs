use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{UserIdentity, UserRole, UserStatus};

/// Session claim: the identity projection plus expiry. Tokens stay valid
/// until `exp` elapses; there is no revocation list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub mail: String,
    pub username: String,
    pub status: UserStatus,
    pub role: UserRole,
    pub exp: i64,
}

impl Claims {
    pub fn new(identity: &UserIdentity, ttl_minutes: i64) -> Self {
        Self {
            sub: identity.id,
            mail: identity.mail.clone(),
            username: identity.username.clone(),
            status: identity.status,
            role: identity.role,
            exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> UserIdentity {
        UserIdentity {
            id: 7,
            mail: "a@x.com".to_string(),
            username: "ax".to_string(),
            status: UserStatus::Active,
            role: UserRole::Member,
        }
    }

    #[test]
    fn round_trips_identity() {
        let token = encode_token(&Claims::new(&identity(), 15), "secret").unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.mail, "a@x.com");
        assert_eq!(claims.username, "ax");
        assert_eq!(claims.status, UserStatus::Active);
        assert_eq!(claims.role, UserRole::Member);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = encode_token(&Claims::new(&identity(), 15), "secret").unwrap();
        assert!(decode_token(&token, "other").is_err());
    }
}
