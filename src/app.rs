use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::controller::messages;
use crate::intake::Intake;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "Not Found",
    }))
}

/// A body that cannot be decoded gets the same envelope as a body with
/// fields missing, matching what the contact form expects.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": "Missing required fields",
        }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Run the application on a specified TCP listener
pub fn run(listener: TcpListener, intake: Intake) -> anyhow::Result<Server> {
    // Wrap application data
    let intake = web::Data::new(intake);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(intake.clone())
            .app_data(json_config())
            .service(health_check)
            .service(messages::routes())
            .default_service(web::route().to(not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
