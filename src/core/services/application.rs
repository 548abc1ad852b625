use std::collections::HashMap;

use itertools::Itertools;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::application::{ApplicantRef, Application, ApplicationInsert, ApplicationStatus, ApplicationView};
use crate::core::models::event::EventQuery;
use crate::core::models::user::Role;
use crate::core::ports::repository::Store;
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplication {
    pub user_email: String,
    pub event_id: Uuid,
}

/// Creates a pending application. The event reference is not validated and
/// duplicate applications for the same user/event pair are accepted, both
/// long-standing behaviors of this workflow.
pub async fn submit<S: Store>(store: &S, data: SubmitApplication) -> Result<Application, Error> {
    let user = store
        .user_by_email(&data.user_email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    store
        .insert_application(ApplicationInsert {
            user_id: user.id,
            event_id: data.event_id,
        })
        .await
}

/// Resolves a pending application. Only the organization that organizes
/// the referenced event may decide, and a decided application stays
/// decided: `pending` is the only state with outgoing transitions.
pub async fn decide<S: Store>(store: &S, id: Uuid, approve: bool) -> Result<Application, Error> {
    let application = store
        .application(id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".into()))?;
    let event = store
        .event(application.event_id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found".into()))?;
    let organizer = store
        .user(event.organizer_id)
        .await?
        .ok_or_else(|| Error::NotFound("Organizer not found".into()))?;
    if !matches!(organizer.role, Role::Organization(_)) {
        return Err(Error::Forbidden("Only organizations can approve applications".into()));
    }
    if application.status != ApplicationStatus::Pending {
        return Err(Error::Conflict(format!("Application already {}", application.status)));
    }
    let status = if approve {
        ApplicationStatus::Approved
    } else {
        ApplicationStatus::Rejected
    };
    store.set_application_status(id, status).await?;
    Ok(Application { status, ..application })
}

/// A volunteer's applications, each populated with its event and a
/// truncated applicant projection.
pub async fn for_user<S: Store>(store: &S, email: &str) -> Result<Vec<ApplicationView>, Error> {
    let user = store
        .user_by_email(email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    let applications = store.applications_by_applicant(user.id).await?;
    let mut views = Vec::with_capacity(applications.len());
    for application in applications {
        let event = store.event(application.event_id).await?;
        views.push(ApplicationView {
            id: application.id,
            status: application.status,
            date_applied: application.date_applied,
            user: Some(ApplicantRef {
                name: user.name.clone(),
                email: user.email.clone(),
            }),
            event,
        });
    }
    Ok(views)
}

/// Applications against every event an organization organizes.
pub async fn for_organization<S: Store>(store: &S, email: &str) -> Result<Vec<ApplicationView>, Error> {
    let organization = store
        .user_by_email(email)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".into()))?;
    let events = store
        .query_events(&EventQuery {
            organizer_id: Some(organization.id),
            ..Default::default()
        })
        .await?;
    let event_ids = events.iter().map(|e| e.id).collect_vec();
    let events_by_id: HashMap<Uuid, _> = events.iter().map(|e| (e.id, e)).collect();

    let applications = store.applications_by_events(&event_ids).await?;
    let mut views = Vec::with_capacity(applications.len());
    for application in applications {
        let applicant = store.user(application.user_id).await?.map(|u| ApplicantRef {
            name: u.name,
            email: u.email,
        });
        views.push(ApplicationView {
            id: application.id,
            status: application.status,
            date_applied: application.date_applied,
            user: applicant,
            event: events_by_id.get(&application.event_id).map(|&e| e.clone()),
        });
    }
    Ok(views)
}
