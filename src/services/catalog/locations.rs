use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::catalog::entities::{Location, validate_location_region};
use crate::models::catalog::requests::{
    CreateLocationRequest, LocationListQuery, UpdateLocationRequest,
};
use crate::models::common::validation::require_text;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};

/// 把修改叠加到现有地点上再校验类型与区域
fn validate_location_update(
    current: &Location,
    req: &UpdateLocationRequest,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &req.name {
        require_text(&mut errors, "name", name);
    }
    let location_type = req.location_type.unwrap_or(current.location_type);
    let online_region = req.online_region.unwrap_or(current.online_region);
    if let Err(region) = validate_location_region(location_type, online_region) {
        errors.merge(region);
    }
    errors.into_result()
}

fn duplicate_location() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::LocationAlreadyExists,
        "A location with this name already exists",
    ))
}

pub async fn list_locations(
    service: &CatalogService,
    query: LocationListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_locations_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Locations retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list locations", e)),
    }
}

pub async fn get_location(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_location_by_id(id).await {
        Ok(Some(location)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            location,
            "Location retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LocationNotFound, "Location not found")),
        Err(e) => Ok(storage_failure("Failed to load location", e)),
    }
}

pub async fn create_location(
    service: &CatalogService,
    req: CreateLocationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_location(req).await {
        Ok(location) => Ok(HttpResponse::Created().json(ApiResponse::success(
            location,
            "Location created successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(duplicate_location()),
        Err(e) => Ok(storage_failure("Failed to create location", e)),
    }
}

pub async fn update_location(
    service: &CatalogService,
    id: i64,
    req: UpdateLocationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current = match storage.get_location_by_id(id).await {
        Ok(Some(location)) => location,
        Ok(None) => return Ok(not_found(ErrorCode::LocationNotFound, "Location not found")),
        Err(e) => return Ok(storage_failure("Failed to update location", e)),
    };

    if let Err(errors) = validate_location_update(&current, &req) {
        return Ok(validation_failed(errors));
    }

    match storage.update_location(id, req).await {
        Ok(Some(location)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            location,
            "Location updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LocationNotFound, "Location not found")),
        Err(e) if e.is_conflict() => Ok(duplicate_location()),
        Err(e) => Ok(storage_failure("Failed to update location", e)),
    }
}

pub async fn delete_location(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_location(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Location deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::LocationNotFound, "Location not found")),
        Err(e) => Ok(storage_failure("Failed to delete location", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::entities::{LocationType, OnlineRegion};

    fn campus() -> Location {
        Location {
            id: 1,
            name: "Lagos Hub".to_string(),
            location_type: LocationType::Campus,
            online_region: None,
            country: Some("Nigeria".to_string()),
            state: Some("Lagos".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_switching_to_online_requires_region() {
        let req = UpdateLocationRequest {
            location_type: Some(LocationType::Online),
            ..Default::default()
        };
        let errors = validate_location_update(&campus(), &req).unwrap_err();
        assert!(errors.get("online_region").is_some());

        let req = UpdateLocationRequest {
            location_type: Some(LocationType::Online),
            online_region: Some(Some(OnlineRegion::Europe)),
            ..Default::default()
        };
        assert!(validate_location_update(&campus(), &req).is_ok());
    }

    #[test]
    fn test_campus_cannot_gain_region() {
        let req = UpdateLocationRequest {
            online_region: Some(Some(OnlineRegion::Nigeria)),
            ..Default::default()
        };
        assert!(validate_location_update(&campus(), &req).is_err());
    }
}
