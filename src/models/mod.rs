pub mod common;
pub mod health_data;
pub mod user;
