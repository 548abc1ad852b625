use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::core::models::application::ApplicationView;
use crate::core::ports::repository::Store;
use crate::core::services::application;
use crate::error::Error;
use crate::response::ApplicationResponse;

#[derive(Debug, Deserialize)]
pub struct Decision {
    pub approve: bool,
}

pub async fn submit<S: Store>(store: Data<S>, body: Json<application::SubmitApplication>) -> Result<HttpResponse, Error> {
    let submitted = application::submit(store.as_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApplicationResponse {
        message: "Application submitted".to_string(),
        application: submitted,
    }))
}

pub async fn decide<S: Store>(
    store: Data<S>,
    id: Path<Uuid>,
    body: Json<Decision>,
) -> Result<Json<ApplicationResponse>, Error> {
    let decided = application::decide(store.as_ref(), *id, body.approve).await?;
    let outcome = if body.approve { "approved" } else { "rejected" };
    Ok(Json(ApplicationResponse {
        message: format!("Application {outcome}"),
        application: decided,
    }))
}

pub async fn for_user<S: Store>(store: Data<S>, email: Path<String>) -> Result<Json<Vec<ApplicationView>>, Error> {
    Ok(Json(application::for_user(store.as_ref(), &email).await?))
}

pub async fn for_organization<S: Store>(store: Data<S>, email: Path<String>) -> Result<Json<Vec<ApplicationView>>, Error> {
    Ok(Json(application::for_organization(store.as_ref(), &email).await?))
}
