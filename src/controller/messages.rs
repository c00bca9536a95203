use actix_cors::Cors;

use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::{web, HttpResponse};

use serde::{Deserialize, Serialize};

use crate::error::{RestError, RestResult};
use crate::intake::Intake;
use crate::model::{ContactForm, Message};
use crate::repo::StoreError;

#[derive(Debug, Serialize)]
struct StatusBody {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct MessageListBody {
    success: bool,
    messages: Vec<Message>,
}

#[tracing::instrument(name = "Submit a contact message", skip(intake))]
async fn send_message(
    form: web::Json<ContactForm>,
    intake: web::Data<Intake>,
) -> RestResult<HttpResponse> {
    intake.submit(form.into_inner()).await?;

    Ok(HttpResponse::Ok().json(StatusBody {
        success: true,
        message: "Message saved successfully",
    }))
}

#[tracing::instrument(name = "List contact messages", skip(intake))]
async fn get_messages(intake: web::Data<Intake>) -> RestResult<HttpResponse> {
    let messages = intake.list_messages().await.map_err(|error| {
        tracing::error!("Failed to load message collection: {:?}", error);
        RestError::InternalError("Failed to load messages".into())
    })?;

    Ok(HttpResponse::Ok().json(MessageListBody {
        success: true,
        messages,
    }))
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    id: Option<String>,
}

#[tracing::instrument(name = "Delete a contact message", skip(intake))]
async fn delete_message(
    body: web::Json<DeleteBody>,
    intake: web::Data<Intake>,
) -> RestResult<HttpResponse> {
    let id = body
        .into_inner()
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(RestError::MissingMessageId)?;

    // An id that matches nothing still deletes successfully; only a store
    // that was never created is reported as missing.
    match intake.delete_message(&id).await {
        Ok(_removed) => Ok(HttpResponse::Ok().json(StatusBody {
            success: true,
            message: "Message deleted successfully",
        })),
        Err(StoreError::CollectionMissing) => Err(RestError::NoMessages),
        Err(error) => {
            tracing::error!("Failed to delete contact message: {:?}", error);
            Err(RestError::InternalError("Failed to delete message".into()))
        }
    }
}

async fn method_not_allowed() -> RestResult<HttpResponse> {
    Err(RestError::MethodNotAllowed)
}

/// Contact message API endpoints
pub fn routes() -> impl HttpServiceFactory {
    // The portfolio page calls the submit endpoint cross-origin; the
    // preflight is answered by the CORS middleware itself.
    let cors = Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["POST", "GET", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE);

    (
        web::resource("/send-message")
            .route(web::post().to(send_message))
            .default_service(web::route().to(method_not_allowed))
            .wrap(cors),
        web::resource("/get-messages")
            .route(web::get().to(get_messages))
            .default_service(web::route().to(method_not_allowed)),
        web::resource("/delete-message")
            .route(web::post().to(delete_message))
            .default_service(web::route().to(method_not_allowed)),
    )
}
