use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Active,
    Closed,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Active => "active",
            OfferStatus::Closed => "closed",
        }
    }
}

impl std::str::FromStr for OfferStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(OfferStatus::Active),
            "closed" => Ok(OfferStatus::Closed),
            other => Err(Error::Internal(format!("Unknown offer status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: i64,
    pub club_id: i64,
    pub title: String,
    pub description: String,
    pub sport_type: String,
    pub contract_type: String,
    pub schedule: String,
    pub salary: Decimal,
    pub location: String,
    pub required_experience: String,
    pub required_education: String,
    pub required_languages: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub status: String,
}

/// List/detail row: the offer plus the owning club's public block.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferWithClub {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub offer: Offer,
    pub club_name: String,
    pub club_city: String,
    pub club_region: String,
}

/// Detail row: adds the contact fields the public listing omits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfferDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub offer: Offer,
    pub club_name: String,
    pub club_city: String,
    pub club_region: String,
    pub club_address: String,
    pub club_website: String,
    pub club_contact_phone: String,
}
