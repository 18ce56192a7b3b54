use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Ok(storage_failure("Failed to retrieve user", e)),
    };

    match storage.get_profile_by_user_id(user.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user, profile },
            "User retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to retrieve user", e)),
    }
}
