use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::models::students::requests::{StudentListQuery, UpdateStudentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{ensure_all_exist, not_found, storage_failure, validation_failed};
use crate::storage::Storage;

/// 更新档案前的校验，管理员与学员本人共用
pub(super) async fn check_student_update(
    storage: &Arc<dyn Storage>,
    req: &UpdateStudentRequest,
) -> Result<(), HttpResponse> {
    let today = chrono::Utc::now().date_naive();
    req.validate(today).map_err(validation_failed)?;

    if let Some(ids) = &req.course_ids {
        let found = storage
            .list_courses_by_ids(ids)
            .await
            .map_err(|e| storage_failure("Failed to update student", e))?
            .len() as u64;
        ensure_all_exist(ids, found, "course_ids", "One or more courses do not exist.")
            .map_err(validation_failed)?;
    }
    Ok(())
}

pub async fn list_students(
    service: &StudentService,
    query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_students_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list students", e)),
    }
}

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_student_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_failure("Failed to load student", e)),
    }
}

pub async fn update_student(
    service: &StudentService,
    id: i64,
    req: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(response) = check_student_update(&storage, &req).await {
        return Ok(response);
    }

    match storage.update_student(id, req).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_failure("Failed to update student", e)),
    }
}

pub async fn delete_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_student(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Student deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_failure("Failed to delete student", e)),
    }
}
