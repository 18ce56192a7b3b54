use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;

use super::StudentService;
use crate::mail::{self, templates};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, ensure_all_exist, storage_failure, validation_failed};

/// 每个账号只能提交一次申请
pub async fn create_application(
    service: &StudentService,
    req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_student_by_user_id(user.id).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ApplicationAlreadyExists,
                "You have already submitted a student application",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to submit application", e)),
    }

    let today = chrono::Utc::now().date_naive();
    if let Err(errors) = req.validate(today) {
        return Ok(validation_failed(errors));
    }

    match storage.get_student_by_email(req.email.trim()).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::Conflict,
                "A student with this email already exists",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to submit application", e)),
    }

    let courses = match storage.list_courses_by_ids(&req.course_ids).await {
        Ok(courses) => courses,
        Err(e) => return Ok(storage_failure("Failed to submit application", e)),
    };
    if let Err(errors) = ensure_all_exist(
        &req.course_ids,
        courses.len() as u64,
        "course_ids",
        "One or more courses do not exist.",
    ) {
        return Ok(validation_failed(errors));
    }

    match storage.create_application(user.id, req, today.year()).await {
        Ok(student) => {
            tracing::info!(
                "Application {} submitted by {}",
                student.register_number.as_deref().unwrap_or("-"),
                user.username
            );
            let names: Vec<String> = courses.into_iter().map(|c| c.name).collect();
            mail::dispatch(request, templates::application_received(&student, &names));
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Application submitted successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to submit application", e)),
    }
}
