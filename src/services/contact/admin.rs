use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContactService;
use crate::models::contact::requests::ContactListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure};

pub async fn list_contacts(
    service: &ContactService,
    query: ContactListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_contacts_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Messages retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list messages", e)),
    }
}

pub async fn get_contact(
    service: &ContactService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_contact_by_id(id).await {
        Ok(Some(contact)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            contact,
            "Message retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ContactNotFound, "Message not found")),
        Err(e) => Ok(storage_failure("Failed to load message", e)),
    }
}

pub async fn delete_contact(
    service: &ContactService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_contact(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Message deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ContactNotFound, "Message not found")),
        Err(e) => Ok(storage_failure("Failed to delete message", e)),
    }
}
