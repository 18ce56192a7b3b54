use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::LoginRequest,
        responses::{EmailNotVerifiedResponse, LoginResponse},
    },
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名或邮箱获取用户信息
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }

    // 3. 未验证邮箱的普通用户不能登录
    if user.requires_email_verification() {
        tracing::info!("Login rejected for unverified user {}", user.username);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error(
            ErrorCode::EmailNotVerified,
            EmailNotVerifiedResponse {
                email_not_verified: true,
                email: user.email.clone(),
            },
            "Please verify your email before logging in",
        )));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 5. 生成令牌对
    let remember_me = login_request.remember_me;
    let token_pair = match user
        .generate_token_pair(remember_me.then(|| JwtUtils::refresh_token_ttl(true)))
    {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("User {} logged in successfully", user.username);

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, remember_me);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: JwtUtils::access_token_ttl_seconds(),
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
