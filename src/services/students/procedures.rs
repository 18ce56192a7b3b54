use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::common::validation::{max_length, require_text};
use crate::models::students::requests::{
    CreateSelectionProcedureRequest, UpdateSelectionProcedureRequest,
};
use crate::models::{ApiResponse, ErrorCode, FieldErrors, PaginationQuery};
use crate::services::{not_found, storage_failure, validation_failed};

pub async fn list_procedures(
    service: &StudentService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_selection_procedures_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Selection procedures retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list selection procedures", e)),
    }
}

pub async fn get_procedure(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_selection_procedure_by_id(id).await {
        Ok(Some(step)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            step,
            "Selection procedure retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::SelectionStepNotFound,
            "Selection procedure not found",
        )),
        Err(e) => Ok(storage_failure("Failed to load selection procedure", e)),
    }
}

pub async fn create_procedure(
    service: &StudentService,
    req: CreateSelectionProcedureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_selection_procedure(req).await {
        Ok(step) => Ok(HttpResponse::Created().json(ApiResponse::success(
            step,
            "Selection procedure created successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to create selection procedure", e)),
    }
}

pub async fn update_procedure(
    service: &StudentService,
    id: i64,
    req: UpdateSelectionProcedureRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &req.step_name {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "step_name", name);
        max_length(&mut errors, "step_name", name, 100);
        if let Err(errors) = errors.into_result() {
            return Ok(validation_failed(errors));
        }
    }

    let storage = service.get_storage(request);
    match storage.update_selection_procedure(id, req).await {
        Ok(Some(step)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            step,
            "Selection procedure updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::SelectionStepNotFound,
            "Selection procedure not found",
        )),
        Err(e) => Ok(storage_failure("Failed to update selection procedure", e)),
    }
}

pub async fn delete_procedure(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_selection_procedure(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Selection procedure deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::SelectionStepNotFound,
            "Selection procedure not found",
        )),
        Err(e) => Ok(storage_failure("Failed to delete selection procedure", e)),
    }
}
