use actix_web::{http::header, web, HttpRequest, HttpResponse};
use async_graphql::http::{parse_query_string, GraphiQLSource};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use log::info;
use sqlx::SqlitePool;

use super::graphql_models::RejectedRequestResponse;
use crate::graph::{self, AppSchema};

fn operation_label(request: &async_graphql::Request) -> &str {
    request.operation_name.as_deref().unwrap_or("anonymous")
}

fn accepts_html(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

pub async fn graphql_post(
    schema: web::Data<AppSchema>,
    pool: web::Data<SqlitePool>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner();
    info!("Received GraphQL request: {}", operation_label(&request));
    graph::execute(schema.get_ref(), pool.get_ref(), request).await.into()
}

// Browsers get the GraphiQL page. Other clients send the request in the
// query string, or as a JSON body when the query string is empty.
pub async fn graphql_get(
    schema: web::Data<AppSchema>,
    pool: web::Data<SqlitePool>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    if accepts_html(&req) {
        return HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(GraphiQLSource::build().endpoint("/graphql").finish());
    }

    let parsed = if req.query_string().is_empty() && !body.is_empty() {
        serde_json::from_slice::<async_graphql::Request>(&body).map_err(|e| e.to_string())
    } else {
        parse_query_string(req.query_string()).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(request) => {
            info!("Received GraphQL request: {}", operation_label(&request));
            let response = graph::execute(schema.get_ref(), pool.get_ref(), request).await;
            HttpResponse::Ok().json(response)
        }
        Err(message) => {
            info!("Rejected GraphQL GET request: {}", message);
            HttpResponse::BadRequest().json(RejectedRequestResponse::new(message))
        }
    }
}
