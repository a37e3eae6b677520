use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Role, User};

/// Registration payload. The role-exclusive profile is a tagged union:
/// the `role` tag picks exactly one of the two profile shapes, so a user
/// can never be created with both or neither.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub surname: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub profile: RegisterProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RegisterProfile {
    Club(RegisterClub),
    Demandante(RegisterDemandante),
}

impl RegisterProfile {
    pub fn role(&self) -> Role {
        match self {
            RegisterProfile::Club(_) => Role::Club,
            RegisterProfile::Demandante(_) => Role::Demandante,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClub {
    #[validate(length(min = 1))]
    pub club_name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDemandante {
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub english_level: String,
    #[serde(default)]
    pub other_languages: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub can_travel: bool,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub photo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_profile_tag_selects_variant() {
        let payload: RegisterPayload = serde_json::from_value(json!({
            "email": "club@example.com",
            "password": "secret-pass",
            "name": "Ana",
            "surname": "García",
            "phone": "600111222",
            "profile": {
                "role": "club",
                "clubName": "CD Ejemplo",
                "address": "Calle Mayor 1",
                "city": "Madrid"
            }
        }))
        .unwrap();
        assert_eq!(payload.profile.role(), Role::Club);

        let payload: RegisterPayload = serde_json::from_value(json!({
            "email": "coach@example.com",
            "password": "secret-pass",
            "name": "Luis",
            "surname": "Pérez",
            "phone": "600333444",
            "profile": {
                "role": "demandante",
                "birthDate": "1995-04-12"
            }
        }))
        .unwrap();
        assert_eq!(payload.profile.role(), Role::Demandante);
    }

    #[test]
    fn register_profile_rejects_unknown_role() {
        let result = serde_json::from_value::<RegisterProfile>(json!({
            "role": "admin"
        }));
        assert!(result.is_err());
    }
}
