use std::collections::BTreeMap;

use uuid::Uuid;

use crate::core::models::application::{Application, ApplicationInsert, ApplicationStatus};
use crate::core::models::event::{Event, EventInsert, EventQuery};
use crate::core::models::user::{User, UserInsert};
use crate::error::Error;

#[allow(async_fn_in_trait)]
pub trait UserStore {
    async fn insert_user(&self, data: UserInsert) -> Result<Uuid, Error>;
    async fn user(&self, id: Uuid) -> Result<Option<User>, Error>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error>;
    /// Marks onboarding complete, replacing the answer map and grade.
    async fn complete_onboarding(&self, id: Uuid, answers: BTreeMap<String, String>, grade: &str) -> Result<(), Error>;
    /// Writes an organization's approval flag together with the onboarding
    /// flag (the two are deliberately coupled in the approval workflow).
    async fn set_organization_decision(&self, id: Uuid, approved: bool, onboarding_complete: bool) -> Result<(), Error>;
    async fn organizations(&self) -> Result<Vec<User>, Error>;
}

#[allow(async_fn_in_trait)]
pub trait EventStore {
    async fn insert_event(&self, data: EventInsert) -> Result<Uuid, Error>;
    async fn event(&self, id: Uuid) -> Result<Option<Event>, Error>;
    /// Filtered listing, ordered by date ascending.
    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error>;
}

#[allow(async_fn_in_trait)]
pub trait ApplicationStore {
    async fn insert_application(&self, data: ApplicationInsert) -> Result<Application, Error>;
    async fn application(&self, id: Uuid) -> Result<Option<Application>, Error>;
    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), Error>;
    /// Derived index replacing the old stored back-reference on the user.
    async fn applications_by_applicant(&self, user_id: Uuid) -> Result<Vec<Application>, Error>;
    async fn applications_by_events(&self, event_ids: &[Uuid]) -> Result<Vec<Application>, Error>;
}

pub trait Store: UserStore + EventStore + ApplicationStore {}

impl<T> Store for T where T: UserStore + EventStore + ApplicationStore {}
