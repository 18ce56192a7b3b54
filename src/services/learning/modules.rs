use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LearningService;
use crate::models::common::validation::require_text;
use crate::models::learning::requests::{
    CreateModuleRequest, ModuleListQuery, UpdateModuleRequest,
};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};

fn order_taken() -> HttpResponse {
    validation_failed(FieldErrors::single(
        "order",
        "A module with this order already exists for this schedule.",
    ))
}

pub async fn list_modules(
    service: &LearningService,
    query: ModuleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_modules_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Modules retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list modules", e)),
    }
}

pub async fn get_module(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_module_by_id(id).await {
        Ok(Some(module)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            module,
            "Module retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => Ok(storage_failure("Failed to load module", e)),
    }
}

pub async fn create_module(
    service: &LearningService,
    req: CreateModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.get_schedule_by_id(req.schedule_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(validation_failed(FieldErrors::single(
                "schedule_id",
                "Schedule does not exist.",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to create module", e)),
    }

    match storage
        .module_order_taken(req.schedule_id, req.order, None)
        .await
    {
        Ok(false) => {}
        Ok(true) => return Ok(order_taken()),
        Err(e) => return Ok(storage_failure("Failed to create module", e)),
    }

    match storage.create_module(req).await {
        Ok(module) => Ok(HttpResponse::Created().json(ApiResponse::success(
            module,
            "Module created successfully",
        ))),
        // 并发插入时由唯一索引兜底
        Err(e) if e.is_conflict() => Ok(order_taken()),
        Err(e) => Ok(storage_failure("Failed to create module", e)),
    }
}

pub async fn update_module(
    service: &LearningService,
    id: i64,
    req: UpdateModuleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = FieldErrors::new();
    if let Some(title) = &req.title {
        require_text(&mut errors, "title", title);
    }
    if req.order.is_some_and(|order| order < 0) {
        errors.add("order", "Order must be zero or greater.");
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    let current = match storage.get_module_by_id(id).await {
        Ok(Some(module)) => module,
        Ok(None) => return Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => return Ok(storage_failure("Failed to update module", e)),
    };

    if let Some(order) = req.order {
        match storage
            .module_order_taken(current.schedule_id, order, Some(id))
            .await
        {
            Ok(false) => {}
            Ok(true) => return Ok(order_taken()),
            Err(e) => return Ok(storage_failure("Failed to update module", e)),
        }
    }

    match storage.update_module(id, req).await {
        Ok(Some(module)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            module,
            "Module updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) if e.is_conflict() => Ok(order_taken()),
        Err(e) => Ok(storage_failure("Failed to update module", e)),
    }
}

pub async fn delete_module(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_module(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Module deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ModuleNotFound, "Module not found")),
        Err(e) => Ok(storage_failure("Failed to delete module", e)),
    }
}
