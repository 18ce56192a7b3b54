//! 邮箱验证与重发

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::mail::{self, templates};
use crate::models::auth::requests::{ResendVerificationRequest, VerifyEmailRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::random_code::generate_verification_token;
use crate::utils::validate::normalize_email;
use crate::utils::verification::{TokenCheck, check_token_age};

pub async fn handle_verify_email(
    service: &AuthService,
    verify_request: VerifyEmailRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let token = verify_request.token.trim();
    if token.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::VerificationTokenInvalid,
            "Invalid verification token",
        )));
    }

    let user = match storage.get_user_by_verification_token(token).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::VerificationTokenInvalid,
                "Invalid verification token",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Email verification failed: {e}"),
                )),
            );
        }
    };

    // 过期令牌保持原样，用户可申请重发
    if check_token_age(
        user.email_verification_sent_at,
        config.verification_ttl(),
        chrono::Utc::now(),
    ) == TokenCheck::Expired
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::VerificationTokenExpired,
            "Verification token has expired, please request a new one",
        )));
    }

    match storage.mark_email_verified(user.id).await {
        Ok(_) => {
            tracing::info!("Email verified for user {}", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Email verified successfully. You can now log in.",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Email verification failed: {e}"),
            )),
        ),
    }
}

/// 无论账号是否存在都返回 200
pub async fn handle_resend_verification(
    service: &AuthService,
    resend_request: ResendVerificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let email = normalize_email(&resend_request.email);

    let done = || {
        HttpResponse::Ok().json(ApiResponse::success_empty(
            "If an unverified account exists for this email, a verification link has been sent.",
        ))
    };

    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) if !user.is_email_verified => user,
        Ok(_) => return Ok(done()),
        Err(e) => {
            tracing::error!("Resend verification lookup failed: {}", e);
            return Ok(done());
        }
    };

    let token = generate_verification_token();
    if let Err(e) = storage.set_verification_token(user.id, &token).await {
        tracing::error!("Failed to store verification token for {}: {}", user.id, e);
        return Ok(done());
    }

    let link = config.frontend_link(&format!("verify-email?token={token}"));
    mail::dispatch(
        request,
        templates::verification(
            &user.first_name,
            &user.username,
            &user.email,
            &link,
            config.verification.token_ttl_hours,
        ),
    );

    Ok(done())
}
