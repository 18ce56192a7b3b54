use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{DeleteAccountRequest, UpdateProfileRequest, UpdateUserRequest};
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, evict_cached_user, storage_failure, validation_failed};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub async fn get_own_profile(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage.get_profile_by_user_id(user.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user, profile },
            "Profile retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to load profile", e)),
    }
}

/// 用户可修改姓名与资料字段，资料角色只能由管理员修改
pub async fn update_own_profile(
    service: &UserService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(errors) = update_data.validate() {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);

    let user = if update_data.first_name.is_some() || update_data.last_name.is_some() {
        let names = UpdateUserRequest {
            first_name: update_data.first_name.clone().map(|s| s.trim().to_string()),
            last_name: update_data.last_name.clone().map(|s| s.trim().to_string()),
            ..Default::default()
        };
        match storage.update_user(user.id, names).await {
            Ok(Some(updated)) => updated,
            Ok(None) => user,
            Err(e) => return Ok(storage_failure("Profile update failed", e)),
        }
    } else {
        user
    };

    let profile = match storage.update_profile(user.id, update_data, None).await {
        Ok(profile) => profile,
        Err(e) => return Ok(storage_failure("Profile update failed", e)),
    };

    evict_cached_user(request).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserResponse { user, profile },
        "Profile updated successfully",
    )))
}

/// 自助注销：校验密码后清理该用户的全部足迹
pub async fn delete_own_account(
    service: &UserService,
    delete_request: DeleteAccountRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    // 缓存中的用户不含密码哈希，需重新读取
    let stored = match storage.get_user_by_id(user.id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(storage_failure("Account deletion failed", e)),
    };

    if !verify_password(&delete_request.password, &stored.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            "Password is incorrect",
        )));
    }

    match storage.purge_user_footprint(stored.id).await {
        Ok(report) => {
            evict_cached_user(request).await;
            tracing::info!("User {} deleted their account", stored.username);
            Ok(HttpResponse::Ok()
                .cookie(JwtUtils::create_empty_refresh_token_cookie())
                .json(ApiResponse::success(report, "Account deleted successfully")))
        }
        Err(e) => Ok(storage_failure("Account deletion failed", e)),
    }
}
