use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LearningService;
use crate::models::common::validation::require_text;
use crate::models::learning::requests::{
    CreateLessonRequest, LessonListQuery, UpdateLessonRequest,
};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};
use crate::utils::validate::validate_url;

fn check_resources_url(errors: &mut FieldErrors, url: Option<&str>) {
    if let Some(url) = url
        && !url.trim().is_empty()
        && validate_url(url).is_err()
    {
        errors.add("resources_url", "Enter a valid URL.");
    }
}

pub async fn list_lessons(
    service: &LearningService,
    query: LessonListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_lessons_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Lessons retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list lessons", e)),
    }
}

pub async fn get_lesson(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_lesson_by_id(id).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_failure("Failed to load lesson", e)),
    }
}

pub async fn create_lesson(
    service: &LearningService,
    req: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = req.validate().err().unwrap_or_default();
    check_resources_url(&mut errors, req.resources_url.as_deref());
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.get_module_by_id(req.module_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(validation_failed(FieldErrors::single(
                "module_id",
                "Module does not exist.",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to create lesson", e)),
    }

    match storage.create_lesson(req).await {
        Ok(lesson) => Ok(HttpResponse::Created().json(ApiResponse::success(
            lesson,
            "Lesson created successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to create lesson", e)),
    }
}

pub async fn update_lesson(
    service: &LearningService,
    id: i64,
    req: UpdateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = FieldErrors::new();
    if let Some(title) = &req.title {
        require_text(&mut errors, "title", title);
    }
    check_resources_url(&mut errors, req.resources_url.as_deref());
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.update_lesson(id, req).await {
        Ok(Some(lesson)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lesson,
            "Lesson updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_failure("Failed to update lesson", e)),
    }
}

pub async fn delete_lesson(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_lesson(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Lesson deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::LessonNotFound, "Lesson not found")),
        Err(e) => Ok(storage_failure("Failed to delete lesson", e)),
    }
}
