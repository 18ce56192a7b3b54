use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::users::requests::CleanupEmailRequest;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{evict_cached_user_id, storage_failure, validation_failed};
use crate::utils::validate::{normalize_email, validate_email};

/// 释放被占用的邮箱，返回各表删除的行数
pub async fn cleanup_email(
    service: &UserService,
    cleanup_request: CleanupEmailRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = normalize_email(&cleanup_request.email);
    if let Err(msg) = validate_email(&email) {
        return Ok(validation_failed(FieldErrors::single("email", msg)));
    }

    // 不允许清理自己的账号
    if let Some(user) = RequireJWT::extract_user(request)
        && user.email.eq_ignore_ascii_case(&email)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CannotDeleteSelf,
            "You cannot purge your own email",
        )));
    }

    let storage = service.get_storage(request);
    let owner = match storage.get_user_by_email(&email).await {
        Ok(owner) => owner,
        Err(e) => return Ok(storage_failure("Email cleanup failed", e)),
    };

    match storage.purge_email(&email).await {
        Ok(report) => {
            if let Some(owner) = owner {
                evict_cached_user_id(request, owner.id).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                report,
                "Email footprint cleaned up",
            )))
        }
        Err(e) => Ok(storage_failure("Email cleanup failed", e)),
    }
}
