use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::user::User;
use crate::core::notifier::Outbox;
use crate::core::ports::repository::Store;
use crate::core::services::organization;
use crate::error::Error;
use crate::response::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct Decision {
    pub approve: bool,
}

pub async fn register<S: Store>(
    store: Data<S>,
    outbox: Data<Outbox>,
    body: Json<organization::RegisterOrganization>,
) -> Result<HttpResponse, Error> {
    organization::register(store.as_ref(), &outbox, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Organization registered successfully.")))
}

pub async fn decide<S: Store>(
    store: Data<S>,
    outbox: Data<Outbox>,
    id: Path<Uuid>,
    body: Json<Decision>,
) -> Result<Json<MessageResponse>, Error> {
    organization::decide(store.as_ref(), &outbox, *id, body.approve).await?;
    let outcome = if body.approve { "approved" } else { "rejected" };
    Ok(Json(MessageResponse::new(format!("Organization {outcome}"))))
}

pub async fn list<S: Store>(store: Data<S>) -> Result<Json<Vec<User>>, Error> {
    Ok(Json(organization::list(store.as_ref()).await?))
}

pub async fn by_email<S: Store>(store: Data<S>, email: Path<String>) -> Result<Json<User>, Error> {
    Ok(Json(organization::by_email(store.as_ref(), &email).await?))
}
