use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AboutService;
use crate::models::about::requests::{CreateCoreValueRequest, UpdateCoreValueRequest};
use crate::models::common::validation::{max_length, require_text};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};

fn core_value_not_found() -> HttpResponse {
    not_found(ErrorCode::CoreValueNotFound, "Core value not found")
}

fn duplicate_title() -> HttpResponse {
    validation_failed(FieldErrors::single(
        "title",
        "A core value with this title already exists.",
    ))
}

pub async fn list_core_values(
    service: &AboutService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_core_values().await {
        Ok(values) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            values,
            "Core values retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list core values", e)),
    }
}

pub async fn get_core_value(
    service: &AboutService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_core_value_by_id(id).await {
        Ok(Some(value)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            value,
            "Core value retrieved successfully",
        ))),
        Ok(None) => Ok(core_value_not_found()),
        Err(e) => Ok(storage_failure("Failed to load core value", e)),
    }
}

pub async fn create_core_value(
    service: &AboutService,
    req: CreateCoreValueRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_core_value(req).await {
        Ok(value) => Ok(HttpResponse::Created().json(ApiResponse::success(
            value,
            "Core value created successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(duplicate_title()),
        Err(e) => Ok(storage_failure("Failed to create core value", e)),
    }
}

pub async fn update_core_value(
    service: &AboutService,
    id: i64,
    req: UpdateCoreValueRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(title) = &req.title {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", title);
        max_length(&mut errors, "title", title, 255);
        if let Err(errors) = errors.into_result() {
            return Ok(validation_failed(errors));
        }
    }

    let storage = service.get_storage(request);
    match storage.update_core_value(id, req).await {
        Ok(Some(value)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            value,
            "Core value updated successfully",
        ))),
        Ok(None) => Ok(core_value_not_found()),
        Err(e) if e.is_conflict() => Ok(duplicate_title()),
        Err(e) => Ok(storage_failure("Failed to update core value", e)),
    }
}

pub async fn delete_core_value(
    service: &AboutService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_core_value(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Core value deleted successfully",
        ))),
        Ok(false) => Ok(core_value_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete core value", e)),
    }
}
