use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CatalogService;
use crate::models::catalog::requests::{
    CreatePartnerRequest, PartnerListQuery, UpdatePartnerRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure, validation_failed};

fn duplicate_partner() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::PartnerAlreadyExists,
        "A partner with this name already exists",
    ))
}

pub async fn list_partners(
    service: &CatalogService,
    query: PartnerListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_partners_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Partners retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list partners", e)),
    }
}

pub async fn get_partner(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_partner_by_id(id).await {
        Ok(Some(partner)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            partner,
            "Partner retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PartnerNotFound, "Partner not found")),
        Err(e) => Ok(storage_failure("Failed to load partner", e)),
    }
}

pub async fn create_partner(
    service: &CatalogService,
    req: CreatePartnerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_partner(req).await {
        Ok(partner) => Ok(HttpResponse::Created().json(ApiResponse::success(
            partner,
            "Partner created successfully",
        ))),
        Err(e) if e.is_conflict() => Ok(duplicate_partner()),
        Err(e) => Ok(storage_failure("Failed to create partner", e)),
    }
}

pub async fn update_partner(
    service: &CatalogService,
    id: i64,
    req: UpdatePartnerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = req.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    match storage.update_partner(id, req).await {
        Ok(Some(partner)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            partner,
            "Partner updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PartnerNotFound, "Partner not found")),
        Err(e) if e.is_conflict() => Ok(duplicate_partner()),
        Err(e) => Ok(storage_failure("Failed to update partner", e)),
    }
}

pub async fn delete_partner(
    service: &CatalogService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_partner(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Partner deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::PartnerNotFound, "Partner not found")),
        Err(e) => Ok(storage_failure("Failed to delete partner", e)),
    }
}
