use actix_web::web;

pub mod auth;
pub mod backend_health;
pub mod health_data;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(backend_health::backend_health)
            .service(
                web::scope("/auth")
                    .service(auth::verify)
                    .service(auth::user_data)
                    .service(auth::update_user)
            )
            .service(
                web::scope("/health")
                    .service(health_data::add_data)
                    .service(health_data::get_data)
                    .service(health_data::update_data)
                    .service(health_data::delete_data)
                    .service(health_data::get_summary)
            )
    );
}
