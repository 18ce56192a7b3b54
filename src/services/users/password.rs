use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::requests::{ResetPasswordRequest, UpdateUserRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{not_found, storage_failure, validation_failed};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

/// 管理员重置用户密码
pub async fn reset_password(
    service: &UserService,
    user_id: i64,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_password_simple(&reset_request.new_password) {
        return Ok(validation_failed(FieldErrors::single("new_password", msg)));
    }

    let password_hash = match hash_password(&reset_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let storage = service.get_storage(request);
    let update = UpdateUserRequest {
        password_hash: Some(password_hash),
        ..Default::default()
    };

    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => {
            tracing::info!("Password reset for user {}", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password reset successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_failure("Password reset failed", e)),
    }
}
