use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::{
    middlewares::RequireJWT,
    models::{ApiResponse, ErrorCode},
    services::evict_cached_user_id,
};

/// 管理员删除用户，连带清理其足迹
pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if RequireJWT::extract_user_id(request) == Some(user_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CannotDeleteSelf,
            "You cannot delete your own account from the admin panel",
        )));
    }

    match storage.purge_user_footprint(user_id).await {
        Ok(report) if report.users > 0 => {
            evict_cached_user_id(request, user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                report,
                "User deleted successfully",
            )))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserDeleteFailed,
                format!("User deletion failed: {e}"),
            )),
        ),
    }
}
