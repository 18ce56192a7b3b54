use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{AdminUpdateUserRequest, UpdateUserRequest};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{evict_cached_user_id, not_found, storage_failure, validation_failed};

/// 管理员修改用户
///
/// 账号字段与资料字段分开写入，写入后立即失效该用户的认证缓存。
pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: AdminUpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = update_data.profile.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    let first_name = update_data
        .first_name
        .or(update_data.profile.first_name.clone())
        .map(|s| s.trim().to_string());
    let last_name = update_data
        .last_name
        .or(update_data.profile.last_name.clone())
        .map(|s| s.trim().to_string());

    let user_update = UpdateUserRequest {
        first_name,
        last_name,
        role: update_data.role,
        status: update_data.status,
        is_email_verified: update_data.is_email_verified,
        ..Default::default()
    };

    let user = match storage.update_user(user_id, user_update).await {
        Ok(Some(user)) => {
            evict_cached_user_id(request, user.id).await;
            user
        }
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => {
            tracing::error!("Failed to update user {}: {}", user_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    format!("User update failed: {e}"),
                )),
            );
        }
    };

    let profile = match storage
        .update_profile(user.id, update_data.profile, update_data.profile_role)
        .await
    {
        Ok(profile) => profile,
        Err(e) => return Ok(storage_failure("User update failed", e)),
    };

    tracing::info!("User {} updated by admin", user.username);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user, profile },
        "User updated successfully",
    )))
}
