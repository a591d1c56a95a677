use actix_web::{HttpResponse, Responder};
use log::debug;

use super::health_models::PingResponse;

pub async fn ping() -> impl Responder {
    debug!("Received request on /ping endpoint");
    HttpResponse::Ok().json(PingResponse {
        message: "pong".into(),
    })
}
