use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{CommunityService, check_course_and_location};
use crate::models::community::requests::{CreateReviewRequest, ReviewListQuery, UpdateReviewRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};
use crate::storage::Storage;

fn review_not_found() -> HttpResponse {
    not_found(ErrorCode::ReviewNotFound, "Review not found")
}

async fn check_review_refs(
    storage: &Arc<dyn Storage>,
    course_id: Option<i64>,
    alumni_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let failure = |e| storage_failure("Failed to validate review", e);
    let mut errors = FieldErrors::new();
    check_course_and_location(storage, course_id, None, &mut errors)
        .await
        .map_err(failure)?;
    if let Some(id) = alumni_id
        && storage.get_alumni_by_id(id).await.map_err(failure)?.is_none()
    {
        errors.add("alumni_id", "Alumni does not exist.");
    }
    errors.into_result().map_err(validation_failed)
}

pub async fn list_reviews(
    service: &CommunityService,
    query: ReviewListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_reviews_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Reviews retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list reviews", e)),
    }
}

pub async fn get_review(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_review_by_id(id).await {
        Ok(Some(review)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            review,
            "Review retrieved successfully",
        ))),
        Ok(None) => Ok(review_not_found()),
        Err(e) => Ok(storage_failure("Failed to load review", e)),
    }
}

/// 公开提交，评价挂在“关于我们”单例下
pub async fn create_review(
    service: &CommunityService,
    req: CreateReviewRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_review_refs(&storage, req.course_id, req.alumni_id).await {
        return Ok(response);
    }

    let about = match storage.get_or_create_about_us().await {
        Ok(about) => about,
        Err(e) => return Ok(storage_failure("Failed to create review", e)),
    };

    match storage.create_review(req, Some(about.id)).await {
        Ok(review) => Ok(HttpResponse::Created().json(ApiResponse::success(
            review,
            "Thank you for your review",
        ))),
        Err(e) => Ok(storage_failure("Failed to create review", e)),
    }
}

pub async fn update_review(
    service: &CommunityService,
    id: i64,
    req: UpdateReviewRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) =
        check_review_refs(&storage, req.course_id.flatten(), req.alumni_id.flatten()).await
    {
        return Ok(response);
    }

    match storage.update_review(id, req).await {
        Ok(Some(review)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            review,
            "Review updated successfully",
        ))),
        Ok(None) => Ok(review_not_found()),
        Err(e) => Ok(storage_failure("Failed to update review", e)),
    }
}

pub async fn delete_review(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_review(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Review deleted successfully",
        ))),
        Ok(false) => Ok(review_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete review", e)),
    }
}
