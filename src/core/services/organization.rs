use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::user::{OrganizationDetails, Role, User, UserInsert};
use crate::core::notifier::{Notification, Outbox};
use crate::core::ports::repository::Store;
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganization {
    pub name: String,
    pub email: String,
    pub description: String,
    pub contact_email: String,
    pub website: String,
}

/// Registers an organization and queues the under-review mail. The
/// notification is published only after the user row exists, and its
/// delivery has no bearing on the response.
pub async fn register<S: Store>(store: &S, outbox: &Outbox, data: RegisterOrganization) -> Result<User, Error> {
    if store.user_by_email(&data.email).await?.is_some() {
        return Err(Error::AlreadyRegistered("Organization already registered.".into()));
    }
    let id = store
        .insert_user(UserInsert {
            name: data.name.clone(),
            email: data.email.clone(),
            picture: None,
            role: Role::Organization(OrganizationDetails {
                name: data.name.clone(),
                description: data.description,
                contact_email: data.contact_email,
                website: data.website,
                events_count: 0,
                selected_candidates_count: 0,
                is_approved: false,
            }),
        })
        .await?;
    outbox.publish(Notification::OrganizationRegistered {
        name: data.name,
        email: data.email,
    });
    store
        .user(id)
        .await?
        .ok_or_else(|| Error::Server("organization vanished right after registration".into()))
}

/// Admin approval decision. The onboarding flag is written together with
/// the approval flag, so a rejection also clears onboarding.
pub async fn decide<S: Store>(store: &S, outbox: &Outbox, id: Uuid, approve: bool) -> Result<User, Error> {
    let user = store
        .user(id)
        .await?
        .filter(|u| matches!(u.role, Role::Organization(_)))
        .ok_or_else(|| Error::NotFound("Organization not found".into()))?;
    store.set_organization_decision(id, approve, approve).await?;
    outbox.publish(Notification::OrganizationDecision {
        name: user.name,
        email: user.email,
        approved: approve,
    });
    store
        .user(id)
        .await?
        .ok_or_else(|| Error::NotFound("Organization not found".into()))
}

pub async fn list<S: Store>(store: &S) -> Result<Vec<User>, Error> {
    store.organizations().await
}

pub async fn by_email<S: Store>(store: &S, email: &str) -> Result<User, Error> {
    store
        .user_by_email(email)
        .await?
        .filter(|u| matches!(u.role, Role::Organization(_)))
        .ok_or_else(|| Error::NotFound("Organization not found".into()))
}
