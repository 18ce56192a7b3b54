use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::mail::{self, templates};
use crate::models::students::requests::{EnrollmentListQuery, UpdateEnrollmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure};

pub async fn list_enrollments(
    service: &StudentService,
    query: EnrollmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_enrollments_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Enrollments retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list enrollments", e)),
    }
}

pub async fn get_enrollment(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_enrollment_by_id(id).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            enrollment,
            "Enrollment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(storage_failure("Failed to load enrollment", e)),
    }
}

/// 状态变为 approved / rejected 时通知学员
pub async fn update_enrollment(
    service: &StudentService,
    id: i64,
    req: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let previous = match storage.get_enrollment_by_id(id).await {
        Ok(Some(enrollment)) => enrollment.status,
        Ok(None) => return Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => return Ok(storage_failure("Failed to update enrollment", e)),
    };

    let enrollment = match storage.update_enrollment_status(id, req.status).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => return Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => return Ok(storage_failure("Failed to update enrollment", e)),
    };
    tracing::info!(
        "Enrollment {} status changed: {} -> {}",
        enrollment.id,
        previous,
        enrollment.status
    );

    if enrollment.status != previous && enrollment.status.is_final() {
        let student = storage.get_student_by_id(enrollment.student_id).await;
        let course = storage.get_course_by_id(enrollment.course_id).await;
        match (student, course) {
            (Ok(Some(student)), Ok(course)) => {
                let course_name = course.map(|c| c.name).unwrap_or_default();
                let dashboard = AppConfig::get().frontend_link("dashboard");
                if let Some(message) = templates::for_enrollment_status(
                    &student,
                    enrollment.status,
                    &course_name,
                    &dashboard,
                ) {
                    mail::dispatch(request, message);
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Skipping enrollment notice for {}: {}", enrollment.id, e);
            }
            (Ok(None), _) => {}
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        enrollment,
        "Enrollment updated successfully",
    )))
}
