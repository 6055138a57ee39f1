use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the session was opened with.
    pub sub: String,
    /// Server-side session id; the session must still be live in the
    /// store for the token to be honored.
    pub sid: String,
    pub exp: usize,
    pub jti: String,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs() as usize
}

pub fn generate_session_token(
    username: &str,
    session_id: &str,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        sub: username.to_string(),
        sid: session_id.to_string(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("HS256 encoding cannot fail with a valid secret")
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_session_claims() {
        let token = generate_session_token("annielyn", "sid-123", "secret", 60);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "annielyn");
        assert_eq!(claims.sid, "sid-123");
    }

    #[test]
    fn rejects_wrong_secret_and_garbage() {
        let token = generate_session_token("annielyn", "sid-123", "secret", 60);
        assert!(verify_token(&token, "other-secret").is_err());
        assert!(verify_token("not-a-token", "secret").is_err());
    }
}
