use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::catalog::requests::{
    CategoryListQuery, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure, validation_failed};

pub async fn list_categories(
    service: &CatalogService,
    query: CategoryListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_categories_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Categories retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list categories", e)),
    }
}

pub async fn get_category(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_category_by_id(id).await {
        Ok(Some(category)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            category,
            "Category retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CategoryNotFound, "Category not found")),
        Err(e) => Ok(storage_failure("Failed to load category", e)),
    }
}

pub async fn create_category(
    service: &CatalogService,
    req: CreateCategoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_category(req).await {
        Ok(category) => Ok(HttpResponse::Created().json(ApiResponse::success(
            category,
            "Category created successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CategoryAlreadyExists,
            "A category with this name already exists",
        ))),
        Err(e) => Ok(storage_failure("Failed to create category", e)),
    }
}

pub async fn update_category(
    service: &CatalogService,
    id: i64,
    req: UpdateCategoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.update_category(id, req).await {
        Ok(Some(category)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            category,
            "Category updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CategoryNotFound, "Category not found")),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CategoryAlreadyExists,
            "A category with this name already exists",
        ))),
        Err(e) => Ok(storage_failure("Failed to update category", e)),
    }
}

/// 仍被课程引用的分类不能删除
pub async fn delete_category(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_courses_in_category(id).await {
        Ok(0) => {}
        Ok(n) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CategoryInUse,
                format!("Category is still used by {n} course(s)"),
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to delete category", e)),
    }

    match storage.delete_category(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Category deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::CategoryNotFound, "Category not found")),
        Err(e) => Ok(storage_failure("Failed to delete category", e)),
    }
}
