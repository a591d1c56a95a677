use actix_web::web;

use super::graphql::graphql_handlers;
use super::health::health_handlers;

pub fn health_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(health_handlers::ping));
}

pub fn graphql_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/graphql")
            .route(web::post().to(graphql_handlers::graphql_post))
            .route(web::get().to(graphql_handlers::graphql_get)),
    );
}
