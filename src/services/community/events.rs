use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{CommunityService, check_course_and_location};
use crate::models::community::requests::{CreateEventRequest, EventListQuery, UpdateEventRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{ensure_all_exist, not_found, storage_failure, validation_failed};
use crate::storage::Storage;

/// 活动引用：课程、地点、合作伙伴、海报文件
async fn check_event_refs(
    storage: &Arc<dyn Storage>,
    course_id: Option<i64>,
    location_id: Option<i64>,
    partner_ids: Option<&[i64]>,
    image: Option<&str>,
) -> Result<(), HttpResponse> {
    let failure = |e| storage_failure("Failed to validate event", e);
    let mut errors = FieldErrors::new();

    check_course_and_location(storage, course_id, location_id, &mut errors)
        .await
        .map_err(failure)?;
    if let Some(ids) = partner_ids {
        let found = storage.count_partners_by_ids(ids).await.map_err(failure)?;
        if let Err(e) = ensure_all_exist(ids, found, "partner_ids", "One or more partners do not exist.")
        {
            errors.merge(e);
        }
    }
    if let Some(token) = image
        && storage.get_file_by_token(token).await.map_err(failure)?.is_none()
    {
        errors.add("image", "File does not exist.");
    }

    errors.into_result().map_err(validation_failed)
}

/// `upcoming` 以当前时间为界
pub async fn list_events(
    service: &CommunityService,
    query: EventListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let now = chrono::Utc::now().timestamp();
    match storage.list_events_with_pagination(query, now).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list events", e)),
    }
}

pub async fn get_event(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_event_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Event retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure("Failed to load event", e)),
    }
}

pub async fn create_event(
    service: &CommunityService,
    req: CreateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_event_refs(
        &storage,
        req.course_id,
        req.location_id,
        Some(&req.partner_ids),
        req.image.as_deref(),
    )
    .await
    {
        return Ok(response);
    }

    match storage.create_event(req).await {
        Ok(event) => {
            tracing::info!("Event {} scheduled for {}", event.title, event.date);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                event,
                "Event created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to create event", e)),
    }
}

pub async fn update_event(
    service: &CommunityService,
    id: i64,
    req: UpdateEventRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_event_refs(
        &storage,
        req.course_id.flatten(),
        req.location_id.flatten(),
        req.partner_ids.as_deref(),
        req.image.as_ref().and_then(|t| t.as_deref()),
    )
    .await
    {
        return Ok(response);
    }

    match storage.update_event(id, req).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            event,
            "Event updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure("Failed to update event", e)),
    }
}

pub async fn delete_event(
    service: &CommunityService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_event(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Event deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure("Failed to delete event", e)),
    }
}
