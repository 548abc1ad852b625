pub mod application;
pub mod event;
pub mod user;
