use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_GRADE: &str = "F";

pub fn default_categories() -> Vec<String> {
    vec!["NGO".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub organizer_id: Uuid,
    /// Organizer email, denormalized at creation time.
    pub email: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub categories: Vec<String>,
    /// Minimum grade required of applicants.
    pub grade: String,
}

#[derive(Debug, Clone)]
pub struct EventInsert {
    pub organizer_id: Uuid,
    pub email: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: NaiveDate,
    pub categories: Vec<String>,
    pub grade: String,
}

/// Composable filters, combined with AND. Results are always ordered by
/// date ascending. The date range only applies when both bounds are given.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub organizer_email: Option<String>,
    pub organizer_id: Option<Uuid>,
}
