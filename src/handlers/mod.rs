pub mod application;
pub mod event;
pub mod organization;
pub mod profile;
pub mod questionnaire;
