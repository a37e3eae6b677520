use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::user::User;

pub const TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Bearer-token claims: identity plus role, expiring after 24 hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        let exp = chrono::Utc::now().timestamp() + TOKEN_TTL_SECONDS;
        Self {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            exp: exp as usize,
        }
    }

    /// The `requireRole` gate: 403 when the authenticated role differs.
    pub fn require_role(&self, expected: crate::models::user::Role) -> Result<()> {
        if self.role == expected.as_str() {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ))
        }
    }
}

pub fn issue_token(claims: &Claims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn claims(role: &str) -> Claims {
        Claims {
            sub: 7,
            email: "x@example.com".into(),
            role: role.into(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        }
    }

    #[test]
    fn issue_and_decode_round_trip() {
        let token = issue_token(&claims("club"), "test-secret").unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret".as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, 7);
        assert_eq!(decoded.claims.role, "club");
    }

    #[test]
    fn expired_token_is_rejected_on_decode() {
        let mut expired = claims("club");
        expired.exp = (chrono::Utc::now().timestamp() - 120) as usize;
        let token = issue_token(&expired, "test-secret").unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret".as_bytes()),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[test]
    fn require_role_enforces_equality() {
        assert!(claims("club").require_role(Role::Club).is_ok());
        assert!(claims("club").require_role(Role::Demandante).is_err());
        assert!(claims("demandante").require_role(Role::Club).is_err());
    }
}
