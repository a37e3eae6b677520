use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

/// Lifecycle states. `Pending` is the only state with an outgoing
/// transition; accepted/rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(Error::Internal(format!(
                "Unknown application status: {}",
                other
            ))),
        }
    }
}

/// A club's answer to a pending application. Deliberately narrower than
/// `ApplicationStatus`: "pending" is not a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "accepted" => Ok(Decision::Accepted),
            "rejected" => Ok(Decision::Rejected),
            other => Err(Error::BadRequest(format!(
                "Decision must be \"accepted\" or \"rejected\", got \"{}\"",
                other
            ))),
        }
    }

    pub fn as_status(&self) -> ApplicationStatus {
        match self {
            Decision::Accepted => ApplicationStatus::Accepted,
            Decision::Rejected => ApplicationStatus::Rejected,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.as_status().as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i64,
    pub offer_id: i64,
    pub demandante_id: i64,
    pub applied_at: DateTime<Utc>,
    pub status: String,
    pub application_message: String,
    pub response_message: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn status(&self) -> Result<ApplicationStatus, Error> {
        self.status.parse()
    }
}

/// List row: application plus the offer summary both sides see, plus the
/// candidate block that is only populated (and only queried) for clubs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationListRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    pub offer_title: String,
    pub sport_type: String,
    pub salary: Decimal,
    pub location: String,
    pub club_name: String,
    pub club_city: String,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_name: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_surname: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_email: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_phone: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_experience: Option<String>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demandante_education: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_parses_only_terminal_states() {
        assert_eq!(Decision::parse("accepted").unwrap(), Decision::Accepted);
        assert_eq!(Decision::parse("rejected").unwrap(), Decision::Rejected);
        assert!(Decision::parse("pending").is_err());
        assert!(Decision::parse("").is_err());
        assert!(Decision::parse("ACCEPTED").is_err());
    }

    #[test]
    fn decision_maps_to_status() {
        assert_eq!(
            Decision::Accepted.as_status(),
            ApplicationStatus::Accepted
        );
        assert_eq!(Decision::Rejected.as_str(), "rejected");
    }

    #[test]
    fn status_round_trips() {
        for s in ["pending", "accepted", "rejected"] {
            assert_eq!(s.parse::<ApplicationStatus>().unwrap().as_str(), s);
        }
        assert!("cancelled".parse::<ApplicationStatus>().is_err());
    }
}
