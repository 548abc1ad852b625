use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::core::models::application::{Application, ApplicationInsert, ApplicationStatus};
use crate::core::models::event::{Event, EventInsert, EventQuery};
use crate::core::models::user::{OrganizationDetails, Role, User, UserInsert};
use crate::core::ports::repository::{ApplicationStore, EventStore, UserStore};
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    picture: Option<String>,
    onboarding_complete: bool,
    overall_grade: String,
    question_answers: Json<BTreeMap<String, String>>,
    role: String,
    organization: Option<Json<OrganizationDetails>>,
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self, Error> {
        let role = match (row.role.as_str(), row.organization) {
            ("user", _) => Role::Volunteer,
            ("admin", _) => Role::Administrator,
            ("organization", Some(Json(details))) => Role::Organization(details),
            (other, _) => {
                return Err(Error::Server(format!(
                    "corrupt role for user {}: {}",
                    row.id, other
                )))
            }
        };
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            picture: row.picture,
            onboarding_complete: row.onboarding_complete,
            overall_grade: row.overall_grade,
            question_answers: row.question_answers.0,
            role,
        })
    }
}

const USER_COLUMNS: &str =
    "id, name, email, picture, onboarding_complete, overall_grade, question_answers, role, organization";

#[derive(sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    organizer_id: Uuid,
    email: String,
    title: String,
    description: String,
    location: String,
    date: NaiveDate,
    categories: Vec<String>,
    grade: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            organizer_id: row.organizer_id,
            email: row.email,
            title: row.title,
            description: row.description,
            location: row.location,
            date: row.date,
            categories: row.categories,
            grade: row.grade,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: Uuid,
    user_id: Uuid,
    event_id: Uuid,
    status: String,
    date_applied: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = Error;

    fn try_from(row: ApplicationRow) -> Result<Self, Error> {
        let status = ApplicationStatus::parse(&row.status)
            .ok_or_else(|| Error::Server(format!("corrupt status for application {}: {}", row.id, row.status)))?;
        Ok(Application {
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            status,
            date_applied: row.date_applied,
        })
    }
}

impl UserStore for PgStore {
    async fn insert_user(&self, data: UserInsert) -> Result<Uuid, Error> {
        let id = Uuid::new_v4();
        let organization = data.role.organization().cloned().map(Json);
        sqlx::query(
            "INSERT INTO users (id, name, email, picture, role, organization) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.picture)
        .bind(data.role.as_str())
        .bind(organization)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn user(&self, id: Uuid) -> Result<Option<User>, Error> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn complete_onboarding(&self, id: Uuid, answers: BTreeMap<String, String>, grade: &str) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET onboarding_complete = TRUE, overall_grade = $2, question_answers = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(grade)
        .bind(Json(answers))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_organization_decision(&self, id: Uuid, approved: bool, onboarding_complete: bool) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET organization = jsonb_set(organization, '{isApproved}', to_jsonb($2::boolean)), onboarding_complete = $3 WHERE id = $1 AND role = 'organization'",
        )
        .bind(id)
        .bind(approved)
        .bind(onboarding_complete)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn organizations(&self) -> Result<Vec<User>, Error> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE role = 'organization' ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(User::try_from).collect()
    }
}

impl EventStore for PgStore {
    async fn insert_event(&self, data: EventInsert) -> Result<Uuid, Error> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO events (id, organizer_id, email, title, description, location, date, categories, grade) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(data.organizer_id)
        .bind(&data.email)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.date)
        .bind(&data.categories)
        .bind(&data.grade)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn event(&self, id: Uuid) -> Result<Option<Event>, Error> {
        let row: Option<EventRow> = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Event::from))
    }

    async fn query_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("SELECT * FROM events WHERE TRUE");
        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            builder.push(" AND (title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(location) = &query.location {
            builder.push(" AND location ILIKE ");
            builder.push_bind(format!("%{location}%"));
        }
        if let Some(from) = query.date_from {
            builder.push(" AND date >= ");
            builder.push_bind(from);
        }
        if let Some(to) = query.date_to {
            builder.push(" AND date <= ");
            builder.push_bind(to);
        }
        if let Some(email) = &query.organizer_email {
            builder.push(" AND email = ");
            builder.push_bind(email.clone());
        }
        if let Some(id) = query.organizer_id {
            builder.push(" AND organizer_id = ");
            builder.push_bind(id);
        }
        builder.push(" ORDER BY date");
        let rows: Vec<EventRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }
}

impl ApplicationStore for PgStore {
    async fn insert_application(&self, data: ApplicationInsert) -> Result<Application, Error> {
        let application = Application {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            event_id: data.event_id,
            status: ApplicationStatus::Pending,
            date_applied: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO applications (id, user_id, event_id, status, date_applied) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(application.event_id)
        .bind(application.status.as_str())
        .bind(application.date_applied)
        .execute(&self.pool)
        .await?;
        Ok(application)
    }

    async fn application(&self, id: Uuid) -> Result<Option<Application>, Error> {
        let row: Option<ApplicationRow> = sqlx::query_as("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Application::try_from).transpose()
    }

    async fn set_application_status(&self, id: Uuid, status: ApplicationStatus) -> Result<(), Error> {
        sqlx::query("UPDATE applications SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn applications_by_applicant(&self, user_id: Uuid) -> Result<Vec<Application>, Error> {
        let rows: Vec<ApplicationRow> =
            sqlx::query_as("SELECT * FROM applications WHERE user_id = $1 ORDER BY date_applied")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Application::try_from).collect()
    }

    async fn applications_by_events(&self, event_ids: &[Uuid]) -> Result<Vec<Application>, Error> {
        let rows: Vec<ApplicationRow> =
            sqlx::query_as("SELECT * FROM applications WHERE event_id = ANY($1) ORDER BY date_applied")
                .bind(event_ids.to_vec())
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(Application::try_from).collect()
    }
}
