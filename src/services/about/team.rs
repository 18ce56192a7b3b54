use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AboutService;
use crate::models::about::requests::{CreateTeamMemberRequest, UpdateTeamMemberRequest};
use crate::models::common::validation::require_text;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{ensure_all_exist, not_found, storage_failure, validation_failed};
use crate::storage::Storage;
use crate::utils::validate::validate_url;

fn member_not_found() -> HttpResponse {
    not_found(ErrorCode::TeamMemberNotFound, "Team member not found")
}

/// 社交链接为空时跳过，否则须是合法 URL
fn check_links(errors: &mut FieldErrors, links: [(&str, Option<&str>); 2]) {
    for (field, value) in links {
        if let Some(url) = value
            && !url.trim().is_empty()
            && validate_url(url).is_err()
        {
            errors.add(field, "Enter a valid URL.");
        }
    }
}

async fn check_core_values(
    storage: &Arc<dyn Storage>,
    ids: &[i64],
) -> Result<(), HttpResponse> {
    let found = storage
        .count_core_values_by_ids(ids)
        .await
        .map_err(|e| storage_failure("Failed to validate team member", e))?;
    ensure_all_exist(
        ids,
        found,
        "core_value_ids",
        "One or more core values do not exist.",
    )
    .map_err(validation_failed)
}

pub async fn list_team_members(
    service: &AboutService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_team_members().await {
        Ok(members) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            members,
            "Team members retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list team members", e)),
    }
}

pub async fn get_team_member(
    service: &AboutService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_team_member_detail(id).await {
        Ok(Some(member)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            member,
            "Team member retrieved successfully",
        ))),
        Ok(None) => Ok(member_not_found()),
        Err(e) => Ok(storage_failure("Failed to load team member", e)),
    }
}

pub async fn create_team_member(
    service: &AboutService,
    req: CreateTeamMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = req.validate().err().unwrap_or_default();
    check_links(
        &mut errors,
        [
            ("linkedin", req.linkedin.as_deref()),
            ("twitter", req.twitter.as_deref()),
        ],
    );
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_core_values(&storage, &req.core_value_ids).await {
        return Ok(response);
    }

    match storage.create_team_member(req).await {
        Ok(member) => Ok(HttpResponse::Created().json(ApiResponse::success(
            member,
            "Team member created successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to create team member", e)),
    }
}

pub async fn update_team_member(
    service: &AboutService,
    id: i64,
    req: UpdateTeamMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &req.name {
        require_text(&mut errors, "name", name);
    }
    if let Some(role) = &req.role {
        require_text(&mut errors, "role", role);
    }
    check_links(
        &mut errors,
        [
            ("linkedin", req.linkedin.as_deref()),
            ("twitter", req.twitter.as_deref()),
        ],
    );
    if let Err(errors) = errors.into_result() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    if let Some(ids) = &req.core_value_ids
        && let Err(response) = check_core_values(&storage, ids).await
    {
        return Ok(response);
    }

    match storage.update_team_member(id, req).await {
        Ok(Some(member)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            member,
            "Team member updated successfully",
        ))),
        Ok(None) => Ok(member_not_found()),
        Err(e) => Ok(storage_failure("Failed to update team member", e)),
    }
}

pub async fn delete_team_member(
    service: &AboutService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.delete_team_member(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Team member deleted successfully",
        ))),
        Ok(false) => Ok(member_not_found()),
        Err(e) => Ok(storage_failure("Failed to delete team member", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_validated_when_present() {
        let mut errors = FieldErrors::new();
        check_links(
            &mut errors,
            [
                ("linkedin", Some("not a url")),
                ("twitter", Some("https://x.com/evolvlearn")),
            ],
        );
        assert!(errors.get("linkedin").is_some());
        assert!(errors.get("twitter").is_none());
    }

    #[test]
    fn test_blank_links_skipped() {
        let mut errors = FieldErrors::new();
        check_links(&mut errors, [("linkedin", Some("")), ("twitter", None)]);
        assert!(errors.is_empty());
    }
}
