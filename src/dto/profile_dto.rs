use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::{Club, Demandante, Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub role: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&User> for ProfileUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            phone: user.phone.clone(),
            role: user.role.clone(),
            registered_at: user.registered_at,
        }
    }
}

/// Role-exclusive profile as a tagged union: a response carries exactly
/// one of the two shapes, matching the user's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileData {
    Club(ClubProfile),
    Demandante(DemandanteProfile),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfile {
    pub id: i64,
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

impl From<Club> for ClubProfile {
    fn from(club: Club) -> Self {
        Self {
            id: club.id,
            club_name: club.club_name,
            address: club.address,
            city: club.city,
            postal_code: club.postal_code,
            region: club.region,
            country: club.country,
            description: club.description,
            website: club.website,
            contact_phone: club.contact_phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandanteProfile {
    pub id: i64,
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

impl From<Demandante> for DemandanteProfile {
    fn from(d: Demandante) -> Self {
        Self {
            id: d.id,
            birth_date: d.birth_date,
            experience: d.experience,
            education: d.education,
            english_level: d.english_level,
            other_languages: d.other_languages,
            availability: d.availability,
            can_travel: d.can_travel,
            resume_url: d.resume_url,
            photo_url: d.photo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
    pub profile: ProfileData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    pub user: Option<UpdateUserBlock>,
    pub profile: Option<UpdateProfileBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBlock {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub surname: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Tagged like `ProfileData`; the tag must agree with the stored role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UpdateProfileBlock {
    Club(UpdateClubBlock),
    Demandante(UpdateDemandanteBlock),
}

impl UpdateProfileBlock {
    pub fn role(&self) -> Role {
        match self {
            UpdateProfileBlock::Club(_) => Role::Club,
            UpdateProfileBlock::Demandante(_) => Role::Demandante,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClubBlock {
    pub club_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDemandanteBlock {
    pub birth_date: Option<NaiveDate>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub english_level: Option<String>,
    pub other_languages: Option<String>,
    pub availability: Option<String>,
    pub can_travel: Option<bool>,
    pub resume_url: Option<String>,
    pub photo_url: Option<String>,
}
