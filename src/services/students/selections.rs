use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::config::AppConfig;
use crate::mail::{self, templates};
use crate::models::students::entities::{ApplicationStatus, SelectionStatus};
use crate::models::students::requests::{
    CreateStudentSelectionRequest, StudentSelectionListQuery, UpdateStudentSelectionRequest,
};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};
use crate::storage::Storage;

fn selection_not_found() -> HttpResponse {
    not_found(
        ErrorCode::StudentSelectionNotFound,
        "Student selection not found",
    )
}

/// 学员全部步骤完成时发送录取通知
async fn notify_if_approved(storage: &Arc<dyn Storage>, student_id: i64, request: &HttpRequest) {
    let steps = match storage.list_selections_for_student(student_id).await {
        Ok(steps) => steps,
        Err(e) => {
            tracing::warn!("Failed to check approval of student {}: {}", student_id, e);
            return;
        }
    };
    let statuses: Vec<_> = steps.iter().map(|s| s.status).collect();
    if !ApplicationStatus::derive(true, &statuses).is_approved {
        return;
    }

    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => {
            tracing::info!("Student {} completed every selection step", student.id);
            let dashboard = AppConfig::get().frontend_link("dashboard");
            mail::dispatch(
                request,
                templates::application_approved(&student, &dashboard, ""),
            );
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Failed to load student {}: {}", student_id, e),
    }
}

pub async fn list_selections(
    service: &StudentService,
    query: StudentSelectionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_student_selections_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Student selections retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list student selections", e)),
    }
}

pub async fn get_selection(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_student_selection_by_id(id).await {
        Ok(Some(selection)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            selection,
            "Student selection retrieved successfully",
        ))),
        Ok(None) => Ok(selection_not_found()),
        Err(e) => Ok(storage_failure("Failed to load student selection", e)),
    }
}

pub async fn create_selection(
    service: &StudentService,
    req: CreateStudentSelectionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to create student selection";
    let storage = service.get_storage(request);

    let mut errors = FieldErrors::new();
    match storage.get_student_by_id(req.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.add("student_id", "Student does not exist."),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    match storage.get_selection_procedure_by_id(req.step_id).await {
        Ok(Some(_)) => {}
        Ok(None) => errors.add("step_id", "Selection step does not exist."),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    match storage.create_student_selection(req).await {
        Ok(selection) => Ok(HttpResponse::Created().json(ApiResponse::success(
            selection,
            "Student selection created successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(validation_failed(FieldErrors::single(
            "step_id",
            "This student already has a record for this step.",
        ))),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

/// 由未完成变为完成且学员全部步骤完成时，发送录取通知
pub async fn update_selection(
    service: &StudentService,
    id: i64,
    req: UpdateStudentSelectionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to update student selection";
    let storage = service.get_storage(request);

    let previous = match storage.get_student_selection_by_id(id).await {
        Ok(Some(selection)) => selection.status,
        Ok(None) => return Ok(selection_not_found()),
        Err(e) => return Ok(storage_failure(action, e)),
    };

    let selection = match storage.update_student_selection(id, req.status).await {
        Ok(Some(selection)) => selection,
        Ok(None) => return Ok(selection_not_found()),
        Err(e) => return Ok(storage_failure(action, e)),
    };

    if previous != SelectionStatus::Completed && selection.status == SelectionStatus::Completed {
        notify_if_approved(&storage, selection.student_id, request).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        selection,
        "Student selection updated successfully",
    )))
}

pub async fn delete_selection(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_student_selection(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Student selection deleted successfully",
        ))),
        Ok(false) => Ok(selection_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete student selection", e)),
    }
}
