pub mod grader;
pub mod mailer;
pub mod store;
