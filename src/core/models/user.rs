use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder grade shown before the questionnaire has been taken.
pub const UNGRADED: &str = "-";

const DOT_TOKEN: &str = "[dot]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDetails {
    pub name: String,
    pub description: String,
    pub contact_email: String,
    pub website: String,
    #[serde(default)]
    pub events_count: i64,
    #[serde(default)]
    pub selected_candidates_count: i64,
    #[serde(default)]
    pub is_approved: bool,
}

/// Closed role variant: organization details are only constructible for the
/// `Organization` variant, so no other role can carry a half-filled
/// sub-record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "organizationDetails")]
pub enum Role {
    #[serde(rename = "user")]
    Volunteer,
    #[serde(rename = "admin")]
    Administrator,
    #[serde(rename = "organization")]
    Organization(OrganizationDetails),
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Volunteer => "user",
            Role::Administrator => "admin",
            Role::Organization(_) => "organization",
        }
    }

    /// Only admins and organizations may create events.
    pub fn can_organize(&self) -> bool {
        !matches!(self, Role::Volunteer)
    }

    pub fn organization(&self) -> Option<&OrganizationDetails> {
        match self {
            Role::Organization(details) => Some(details),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub onboarding_complete: bool,
    pub overall_grade: String,
    pub question_answers: BTreeMap<String, String>,
    #[serde(flatten)]
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub role: Role,
}

/// The store does not accept literal dots in map keys, so question text is
/// sanitized on write and restored on read.
pub fn sanitize_question(question: &str) -> String {
    question.replace('.', DOT_TOKEN)
}

pub fn restore_question(question: &str) -> String {
    question.replace(DOT_TOKEN, ".")
}
