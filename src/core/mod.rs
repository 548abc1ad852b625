pub mod grader;
pub mod models;
pub mod notifier;
pub mod ports;
pub mod services;
