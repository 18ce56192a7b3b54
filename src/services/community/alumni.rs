use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;

use super::{CommunityService, check_course_and_location};
use crate::models::community::requests::{AlumniListQuery, CreateAlumniRequest, UpdateAlumniRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn alumni_not_found() -> HttpResponse {
    not_found(ErrorCode::AlumniNotFound, "Alumni not found")
}

pub async fn list_alumni(
    service: &CommunityService,
    query: AlumniListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_alumni_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Alumni retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list alumni", e)),
    }
}

pub async fn get_alumni(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_alumni_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Alumni retrieved successfully",
        ))),
        Ok(None) => Ok(alumni_not_found()),
        Err(e) => Ok(storage_failure("Failed to load alumni", e)),
    }
}

/// 创建校友记录，同时把该用户的资料角色改为 alumni
pub async fn create_alumni(
    service: &CommunityService,
    req: CreateAlumniRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to create alumni";
    if let Err(errors) = req.validate(current_year()) {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    let mut errors = FieldErrors::new();
    match storage.get_user_by_id(req.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.add("user_id", "User does not exist."),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    if let Err(e) =
        check_course_and_location(&storage, req.course_id, req.location_id, &mut errors).await
    {
        return Ok(storage_failure(action, e));
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    match storage.create_alumni(req).await {
        Ok(alumni) => {
            tracing::info!("User {} registered as alumni", alumni.user_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                alumni,
                "Alumni created successfully",
            )))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::AlumniAlreadyExists,
            "This user already has an alumni record",
        ))),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

pub async fn update_alumni(
    service: &CommunityService,
    id: i64,
    req: UpdateAlumniRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to update alumni";
    if let Err(errors) = req.validate(current_year()) {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    let mut errors = FieldErrors::new();
    if let Err(e) = check_course_and_location(
        &storage,
        req.course_id.flatten(),
        req.location_id.flatten(),
        &mut errors,
    )
    .await
    {
        return Ok(storage_failure(action, e));
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    match storage.update_alumni(id, req).await {
        Ok(Some(alumni)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            alumni,
            "Alumni updated successfully",
        ))),
        Ok(None) => Ok(alumni_not_found()),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

pub async fn delete_alumni(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_alumni(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Alumni deleted successfully",
        ))),
        Ok(false) => Ok(alumni_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete alumni", e)),
    }
}
