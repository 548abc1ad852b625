pub mod core;
pub mod error;
pub mod handlers;
pub mod impls;
pub mod response;
