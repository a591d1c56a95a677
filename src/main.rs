use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use scrumer_backend::config::Config;
use scrumer_backend::{db, graph, routes};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::other(e)
    })?;
    let pool = db::connect(&config).await.map_err(|e| {
        error!("Failed to set up database: {}", e);
        io::Error::other(e)
    })?;
    let schema = graph::build_schema(pool.clone());

    info!("Server running at http://{}", config.server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(schema.clone()))
            .configure(routes::routes::health_configure)
            .configure(routes::routes::graphql_configure)
    })
    .bind(config.server_address.as_str())?
    .run()
    .await
}
