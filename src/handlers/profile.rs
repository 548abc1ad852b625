use actix_web::web::{Data, Json, Path};

use crate::core::models::user::User;
use crate::core::ports::repository::Store;
use crate::core::services::profile;
use crate::error::Error;
use crate::response::{UserIdResponse, UserResponse};

pub async fn create<S: Store>(store: Data<S>, body: Json<profile::CreateProfile>) -> Result<Json<UserResponse>, Error> {
    let user = profile::create_or_fetch(store.as_ref(), body.into_inner()).await?;
    Ok(Json(UserResponse {
        message: "Profile created successfully".to_string(),
        user,
    }))
}

pub async fn user_id<S: Store>(store: Data<S>, email: Path<String>) -> Result<Json<UserIdResponse>, Error> {
    let user_id = profile::user_id(store.as_ref(), &email).await?;
    Ok(Json(UserIdResponse { user_id }))
}

pub async fn profile<S: Store>(store: Data<S>, email: Path<String>) -> Result<Json<User>, Error> {
    Ok(Json(profile::profile(store.as_ref(), &email).await?))
}

pub async fn update<S: Store>(store: Data<S>, body: Json<profile::OnboardingUpdate>) -> Result<Json<UserResponse>, Error> {
    let user = profile::complete_onboarding(store.as_ref(), body.into_inner()).await?;
    Ok(Json(UserResponse {
        message: "User profile updated successfully".to_string(),
        user,
    }))
}
