use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommunityService;
use crate::models::community::requests::{
    AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};

fn attendance_not_found() -> HttpResponse {
    not_found(ErrorCode::AttendanceNotFound, "Attendance record not found")
}

pub async fn list_attendance(
    service: &CommunityService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_attendance_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list attendance", e)),
    }
}

pub async fn get_attendance(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_attendance_by_id(id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance retrieved successfully",
        ))),
        Ok(None) => Ok(attendance_not_found()),
        Err(e) => Ok(storage_failure("Failed to load attendance", e)),
    }
}

/// 同一活动同一学员只能有一条记录
pub async fn create_attendance(
    service: &CommunityService,
    req: CreateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to record attendance";
    let storage = service.get_storage(request);

    let mut errors = FieldErrors::new();
    match storage.get_event_by_id(req.event_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.add("event_id", "Event does not exist."),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    match storage.get_student_by_id(req.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.add("student_id", "Student does not exist."),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    match storage.create_attendance(req).await {
        Ok(record) => Ok(HttpResponse::Created().json(ApiResponse::success(
            record,
            "Attendance recorded successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(validation_failed(FieldErrors::single(
            "student_id",
            "Attendance for this student and event already exists.",
        ))),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

pub async fn update_attendance(
    service: &CommunityService,
    id: i64,
    req: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.update_attendance(id, req.attended).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(attendance_not_found()),
        Err(e) => Ok(storage_failure("Failed to update attendance", e)),
    }
}

pub async fn delete_attendance(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_attendance(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Attendance deleted successfully",
        ))),
        Ok(false) => Ok(attendance_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete attendance", e)),
    }
}
