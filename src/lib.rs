use actix_cors::Cors;
use actix_web::{dev::Server, http::header, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::relay::ContactRelay;

pub mod client;
pub mod configuration;
pub mod domain;
pub mod mailer;
pub mod relay;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utils;

pub fn run(
    listener: std::net::TcpListener,
    relay: ContactRelay,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    let relay = web::Data::new(relay);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .route("/healthz", web::get().to(routes::health_check))
            .service(
                web::resource("/api/contact")
                    .route(web::post().to(routes::contact))
                    .default_service(web::route().to(routes::method_not_allowed)),
            )
            .app_data(relay.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Only the listed frontend origins may post the form from a browser.
fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
