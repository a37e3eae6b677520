use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub sport_type: String,
    pub salary: Decimal,
    pub contract_type: Option<String>,
    pub schedule: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub required_experience: String,
    #[serde(default)]
    pub required_education: String,
    #[serde(default)]
    pub required_languages: String,
    pub deadline: Option<DateTime<Utc>>,
}
