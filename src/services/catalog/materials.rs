use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::catalog::requests::CreateMaterialRequest;
use crate::models::catalog::responses::CourseMaterialListResponse;
use crate::models::common::validation::{max_length, require_text};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::students::load_application;
use crate::services::{current_user, forbidden, not_found, storage_failure, validation_failed};

/// 管理员或申请已通过的学员可查看课程资料
pub async fn list_materials(
    service: &CatalogService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    if !user.is_admin() {
        match load_application(&storage, user.id).await {
            Ok(application) if application.status.is_approved => {}
            Ok(_) => {
                return Ok(forbidden(
                    "Course materials are available once your application is approved",
                ));
            }
            Err(e) => return Ok(storage_failure("Failed to load materials", e)),
        }
    }

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(storage_failure("Failed to load materials", e)),
    }

    match storage.list_materials_for_courses(&[course_id]).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseMaterialListResponse { course_id, items },
            "Materials retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to load materials", e)),
    }
}

/// 资料文件须先上传，大小取自文件记录
pub async fn create_material(
    service: &CatalogService,
    course_id: i64,
    req: CreateMaterialRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    require_text(&mut errors, "title", &req.title);
    max_length(&mut errors, "title", &req.title, 200);
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(storage_failure("Failed to create material", e)),
    }

    let file = match storage.get_file_by_token(req.file_token.trim()).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Ok(validation_failed(FieldErrors::single(
                "file_token",
                "File does not exist.",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to create material", e)),
    };

    match storage
        .create_material(course_id, req, file.file_size, user.id)
        .await
    {
        Ok(material) => Ok(HttpResponse::Created().json(ApiResponse::success(
            material,
            "Material created successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to create material", e)),
    }
}

pub async fn delete_material(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_material(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Material deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::MaterialNotFound, "Material not found")),
        Err(e) => Ok(storage_failure("Failed to delete material", e)),
    }
}
