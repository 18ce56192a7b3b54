pub mod about;
pub mod auth;
pub mod catalog;
pub mod community;
pub mod contact;
pub mod dashboard;
pub mod files;
pub mod learning;
pub mod students;
pub mod system;
pub mod users;

pub use about::AboutService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use community::CommunityService;
pub use contact::ContactService;
pub use dashboard::DashboardService;
pub use files::FileService;
pub use learning::LearningService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::cache::{ObjectCache, user_cache_key};
use crate::errors::EvolvError;
use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::bearer_token;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::utils::jwt::JwtUtils;

/// 字段校验失败：400，`data` 为字段错误表
pub(crate) fn validation_failed(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

/// 存储层错误：唯一约束冲突返回 409，其余返回 500
pub(crate) fn storage_failure(action: &str, e: EvolvError) -> HttpResponse {
    if e.is_conflict() {
        tracing::info!("{}: {}", action, e);
        return HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            format!("{action}: a record with the same unique value already exists"),
        ));
    }
    tracing::error!("{}: {}", action, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{action}: {}", e.message()),
    ))
}

/// 当前登录用户；路由未挂 RequireJWT 时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication credentials were not provided.",
        ))
    })
}

/// 删除当前登录用户的缓存
///
/// 登出路由不挂 RequireJWT，此时从 bearer token 中解析用户 ID。
pub(crate) async fn evict_cached_user(request: &HttpRequest) {
    let user_id = RequireJWT::extract_user_id(request).or_else(|| {
        bearer_token(request)
            .and_then(|token| JwtUtils::verify_access_token(&token).ok())
            .and_then(|claims| claims.user_id())
    });
    if let Some(user_id) = user_id {
        evict_cached_user_id(request, user_id).await;
    }
}

/// 删除指定用户的缓存，管理员修改、停用或删除账号后调用
pub(crate) async fn evict_cached_user_id(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

/// 校验引用的 id 全部存在
///
/// `found` 为存储层按去重后的 id 统计到的行数。
pub(crate) fn ensure_all_exist(
    ids: &[i64],
    found: u64,
    field: &str,
    message: &str,
) -> Result<(), FieldErrors> {
    let expected = ids.iter().collect::<std::collections::HashSet<_>>().len() as u64;
    if found == expected {
        Ok(())
    } else {
        Err(FieldErrors::single(field, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_all_exist_counts_unique_ids() {
        assert!(ensure_all_exist(&[1, 2, 2], 2, "location_ids", "missing").is_ok());
        let errors = ensure_all_exist(&[1, 2, 3], 2, "location_ids", "missing").unwrap_err();
        assert_eq!(errors.get("location_ids"), Some("missing"));
        assert!(ensure_all_exist(&[], 0, "partner_ids", "missing").is_ok());
    }

    #[test]
    fn test_storage_failure_statuses() {
        let conflict = storage_failure("Create category failed", EvolvError::conflict("dup"));
        assert_eq!(conflict.status(), actix_web::http::StatusCode::CONFLICT);
        let other = storage_failure("Create category failed", EvolvError::database_operation("x"));
        assert_eq!(
            other.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
