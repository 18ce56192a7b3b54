use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::evict_cached_user;
use crate::utils::jwt::JwtUtils;

/// 处理用户登出
///
/// 清除 refresh_token cookie，并删除当前 access token 对应的用户缓存。
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    evict_cached_user(request).await;

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out")))
}
