use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::core::models::application::{Application, ApplicationInsert, ApplicationStatus};
use crate::core::models::event::{Event, EventInsert, EventQuery};
use crate::core::models::user::{Role, User, UserInsert, UNGRADED};
use crate::core::ports::repository::{ApplicationStore, EventStore, UserStore};
use crate::error::Error;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    events: HashMap<Uuid, Event>,
    applications: HashMap<Uuid, Application>,
}

/// Hash-map store behind a mutex. Backs the test suite and local runs
/// without a database; the Postgres adapter is the production store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, Error> {
        self.inner.lock().map_err(|_| Error::Server("store mutex poisoned".into()))
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl UserStore for MemoryStore {
    async fn insert_user(&self, data: UserInsert) -> Result<Uuid, Error> {
        let mut inner = self.lock()?;
        if inner.users.values().any(|u| u.email == data.email) {
            return Err(Error::Server(format!("duplicate email: {}", data.email)));
        }
        let id = Uuid::new_v4();
        inner.users.insert(
            id,
            User {
                id,
                name: data.name,
                email: data.email,
                picture: data.picture,
                onboarding_complete: false,
                overall_grade: UNGRADED.to_string(),
                question_answers: BTreeMap::new(),
                role: data.role,
            },
        );
        Ok(id)
    }

    async fn user(&self, id: Uuid) -> Result<Option<User>, Error> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(self.lock()?.users.values().find(|u| u.email == email).cloned())
    }

    async fn complete_onboarding(&self, id: Uuid, answers: BTreeMap<String, String>, grade: &str) -> Result<(), Error> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("User not found".into()))?;
        user.onboarding_complete = true;
        user.overall_grade = grade.to_string();
        user.question_answers = answers;
        Ok(())
    }

    async fn set_organization_decision(&self, id: Uuid, approved: bool, onboarding_complete: bool) -> Result<(), Error> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Organization not found".into()))?;
        match &mut user.role {
            Role::Organization(details) => details.is_approved = approved,
            _ => return Err(Error::NotFound("Organization not found".into())),
        }
        user.onboarding_complete = onboarding_complete;
        Ok(())
    }

    async fn organizations(&self) -> Result<Vec<User>, Error> {
        let mut organizations: Vec<User> = self
            .lock()?
            .users
            .values()
            .filter(|u| matches!(u.role, Role::Organization(_)))
            .cloned()
            .collect();
        organizations.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(organizations)
    }
}

impl EventStore for MemoryStore {
    async fn insert_event(&self, data: EventInsert) -> Result<Uuid, Error> {
        let mut inner = self.lock()?;
        let id = Uuid::new_v4();
        inner.events.insert(
            id,
            Event {
                id,
                organizer_id: data.organizer_id,
                email: data.email,
                title: data.title,
                description: data.description,
                location: data.location,
                date: data.date,
                categories: data.categories,
                grade: data.grade,
            },
        );
        Ok(id)
    }

    async fn event(&self, id: Uuid) -> Result<Option<Event>, Error> {
        Ok(self.lock()?.events.get(&id).cloned())
    }

    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        let mut events: Vec<Event> = self
            .lock()?
            .events
            .values()
            .filter(|e| {
                query
                    .search
                    .as_ref()
                    .map(|s| contains_ci(&e.title, s) || contains_ci(&e.description, s))
                    .unwrap_or(true)
                    && query
                        .location
                        .as_ref()
                        .map(|l| contains_ci(&e.location, l))
                        .unwrap_or(true)
                    && query.date_from.map(|from| e.date >= from).unwrap_or(true)
                    && query.date_to.map(|to| e.date <= to).unwrap_or(true)
                    && query
                        .organizer_email
                        .as_ref()
                        .map(|email| &e.email == email)
                        .unwrap_or(true)
                    && query.organizer_id.map(|id| e.organizer_id == id).unwrap_or(true)
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}

impl ApplicationStore for MemoryStore {
    async fn insert_application(&self, data: ApplicationInsert) -> Result<Application, Error> {
        let mut inner = self.lock()?;
        let application = Application {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            event_id: data.event_id,
            status: ApplicationStatus::Pending,
            date_applied: Utc::now(),
        };
        inner.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn application(&self, id: Uuid) -> Result<Option<Application>, Error> {
        Ok(self.lock()?.applications.get(&id).cloned())
    }

    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), Error> {
        let mut inner = self.lock()?;
        let application = inner
            .applications
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        application.status = status;
        Ok(())
    }

    async fn applications_by_applicant(&self, user_id: Uuid) -> Result<Vec<Application>, Error> {
        let mut applications: Vec<Application> = self
            .lock()?
            .applications
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        applications.sort_by_key(|a| a.date_applied);
        Ok(applications)
    }

    async fn applications_by_events(&self, event_ids: &[Uuid]) -> Result<Vec<Application>, Error> {
        let mut applications: Vec<Application> = self
            .lock()?
            .applications
            .values()
            .filter(|a| event_ids.contains(&a.event_id))
            .cloned()
            .collect();
        applications.sort_by_key(|a| a.date_applied);
        Ok(applications)
    }
}
