use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

/// The two mutually exclusive account roles. Stored as TEXT; parsed at the
/// service boundary so role-gated logic never string-compares twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Club,
    Demandante,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Club => "club",
            Role::Demandante => "demandante",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "club" => Ok(Role::Club),
            "demandante" => Ok(Role::Demandante),
            other => Err(Error::BadRequest(format!(
                "Role must be \"club\" or \"demandante\", got \"{}\"",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub role: String,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Result<Role, Error> {
        self.role.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Club {
    pub id: i64,
    pub user_id: i64,
    pub club_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub region: String,
    pub country: String,
    pub description: String,
    pub website: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Demandante {
    pub id: i64,
    pub user_id: i64,
    pub birth_date: NaiveDate,
    pub experience: String,
    pub education: String,
    pub english_level: String,
    pub other_languages: String,
    pub availability: String,
    pub can_travel: bool,
    pub resume_url: String,
    pub photo_url: String,
}
