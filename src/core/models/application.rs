use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub event_id: Uuid,
    #[serde(rename = "approvalStatus")]
    pub status: ApplicationStatus,
    pub date_applied: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ApplicationInsert {
    pub user_id: Uuid,
    pub event_id: Uuid,
}

/// Truncated applicant projection embedded in application listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantRef {
    pub name: String,
    pub email: String,
}

/// An application populated with its event and applicant. Either side may
/// be missing: submissions never validated the event reference, and a
/// listing must not fail because of such an orphan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: Uuid,
    #[serde(rename = "approvalStatus")]
    pub status: ApplicationStatus,
    pub date_applied: DateTime<Utc>,
    pub user: Option<ApplicantRef>,
    pub event: Option<super::event::Event>,
}
