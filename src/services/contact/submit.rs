use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContactService;
use crate::config::AppConfig;
use crate::mail::{self, templates};
use crate::models::contact::requests::CreateContactRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_failure, validation_failed};

fn already_contacted() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ContactAlreadyExists,
        "A message from this email has already been received",
    ))
}

/// 公开留言：每个邮箱仅一条，成功后通知管理员并回执给留言人
pub async fn submit_contact(
    service: &ContactService,
    mut req: CreateContactRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }
    req.name = req.name.trim().to_string();
    req.email = req.email.trim().to_lowercase();

    let storage = service.get_storage(request);

    match storage.get_contact_by_email(&req.email).await {
        Ok(None) => {}
        Ok(Some(_)) => return Ok(already_contacted()),
        Err(e) => return Ok(storage_failure("Failed to submit message", e)),
    }

    let contact = match storage.create_contact(req).await {
        Ok(contact) => contact,
        Err(e) if e.is_conflict() => return Ok(already_contacted()),
        Err(e) => return Ok(storage_failure("Failed to submit message", e)),
    };

    let config = AppConfig::get();
    let our_address = config.mail.reply_to.as_deref().unwrap_or(&config.mail.from);
    mail::dispatch(
        request,
        templates::contact_admin_notification(&contact, &config.mail.admin_email),
    );
    mail::dispatch(
        request,
        templates::contact_acknowledgement(&contact, our_address),
    );

    tracing::info!("Contact message {} received", contact.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        contact,
        "Thank you for your message. We will get back to you soon",
    )))
}
