pub mod document_store;
pub mod health_data;
pub mod memory_store;
pub mod postgres_store;
pub mod query_builder;
pub mod users;
