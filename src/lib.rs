use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
pub mod models;
mod routes;
pub mod telemetry;
pub mod utils;
use crate::auth::jwt::TokenVerifier;
use crate::db::document_store::DocumentStore;
use crate::db::health_data::HealthRecordRepository;
use crate::db::users::UserRepository;
use crate::error::ApiError;
use crate::routes::init_routes;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn DocumentStore>,
    token_verifier: Arc<dyn TokenVerifier>,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let health_records = web::Data::new(HealthRecordRepository::new(store.clone()));
    let users = web::Data::new(UserRepository::new(store.clone()));
    let store_data: web::Data<dyn DocumentStore> = web::Data::from(store);
    let token_verifier: web::Data<dyn TokenVerifier> = web::Data::from(token_verifier);

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::CONTENT_TYPE,
            ])
            .max_age(3600);

        // Malformed bodies, query strings and paths use the same error envelope
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into());
        let query_config = web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into());
        let path_config = web::PathConfig::default()
            .error_handler(|err, _req| ApiError::validation(err.to_string()).into());

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            .app_data(query_config)
            .app_data(path_config)
            // Get a pointer copy and attach it to the application state
            .app_data(health_records.clone())
            .app_data(users.clone())
            .app_data(store_data.clone())
            .app_data(token_verifier.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
