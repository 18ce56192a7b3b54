use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::CatalogService;
use crate::models::catalog::requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{ensure_all_exist, not_found, storage_failure, validation_failed};
use crate::storage::Storage;

/// 课程引用的其它记录；`None` 表示本次不涉及该字段
struct CourseRefs<'a> {
    category_id: Option<i64>,
    parent_id: Option<i64>,
    instructor_id: Option<i64>,
    location_ids: Option<&'a [i64]>,
    partner_ids: Option<&'a [i64]>,
    video_content: Option<&'a str>,
    additional_materials: Option<&'a str>,
}

/// 校验引用是否存在；失败时返回可直接响应的 HttpResponse
async fn check_course_refs(
    storage: &Arc<dyn Storage>,
    refs: CourseRefs<'_>,
) -> Result<(), HttpResponse> {
    let failure = |e| storage_failure("Failed to validate course", e);
    let mut errors = FieldErrors::new();

    if let Some(id) = refs.category_id
        && storage.get_category_by_id(id).await.map_err(failure)?.is_none()
    {
        errors.add("category_id", "Category does not exist.");
    }
    if let Some(id) = refs.parent_id
        && storage.get_course_by_id(id).await.map_err(failure)?.is_none()
    {
        errors.add("parent_id", "Parent course does not exist.");
    }
    if let Some(id) = refs.instructor_id
        && storage.get_user_by_id(id).await.map_err(failure)?.is_none()
    {
        errors.add("instructor_id", "Instructor does not exist.");
    }
    if let Some(ids) = refs.location_ids {
        let found = storage.count_locations_by_ids(ids).await.map_err(failure)?;
        if let Err(e) = ensure_all_exist(ids, found, "location_ids", "One or more locations do not exist.")
        {
            errors.merge(e);
        }
    }
    if let Some(ids) = refs.partner_ids {
        let found = storage.count_partners_by_ids(ids).await.map_err(failure)?;
        if let Err(e) = ensure_all_exist(ids, found, "partner_ids", "One or more partners do not exist.")
        {
            errors.merge(e);
        }
    }
    for (field, token) in [
        ("video_content", refs.video_content),
        ("additional_materials", refs.additional_materials),
    ] {
        if let Some(token) = token
            && storage.get_file_by_token(token).await.map_err(failure)?.is_none()
        {
            errors.add(field, "File does not exist.");
        }
    }

    errors.into_result().map_err(validation_failed)
}

pub async fn list_courses(
    service: &CatalogService,
    query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_courses_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list courses", e)),
    }
}

pub async fn get_course(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_course_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Course retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_failure("Failed to load course", e)),
    }
}

pub async fn create_course(
    service: &CatalogService,
    req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    let refs = CourseRefs {
        category_id: Some(req.category_id),
        parent_id: req.parent_id,
        instructor_id: req.instructor_id,
        location_ids: Some(&req.location_ids),
        partner_ids: Some(&req.partner_ids),
        video_content: req.video_content.as_deref(),
        additional_materials: req.additional_materials.as_deref(),
    };
    if let Err(response) = check_course_refs(&storage, refs).await {
        return Ok(response);
    }

    match storage.create_course(req).await {
        Ok(course) => {
            tracing::info!("Course {} created", course.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to create course", e)),
    }
}

pub async fn update_course(
    service: &CatalogService,
    id: i64,
    req: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current = match storage.get_course_by_id(id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(storage_failure("Failed to update course", e)),
    };

    let mut errors = FieldErrors::new();
    if let Some(name) = &req.name
        && name.trim().is_empty()
    {
        errors.add("name", "This field may not be blank.");
    }
    if req.parent_id == Some(Some(id)) {
        errors.add("parent_id", "A course cannot be its own parent.");
    }
    if let Err(dates) = req.merged_timeline(current.timeline()).validate() {
        errors.merge(dates);
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let refs = CourseRefs {
        category_id: req.category_id,
        parent_id: req.parent_id.flatten(),
        instructor_id: req.instructor_id.flatten(),
        location_ids: req.location_ids.as_deref(),
        partner_ids: req.partner_ids.as_deref(),
        video_content: req.video_content.as_ref().and_then(|t| t.as_deref()),
        additional_materials: req.additional_materials.as_ref().and_then(|t| t.as_deref()),
    };
    if let Err(response) = check_course_refs(&storage, refs).await {
        return Ok(response);
    }

    match storage.update_course(id, req).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_failure("Failed to update course", e)),
    }
}

pub async fn delete_course(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_course(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Course deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_failure("Failed to delete course", e)),
    }
}
