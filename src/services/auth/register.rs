use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AuthService;
use crate::mail::{self, templates};
use crate::models::auth::requests::RegisterRequest;
use crate::models::users::entities::{ProfileRole, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{storage_failure, validation_failed};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_verification_token;
use crate::utils::validate::{
    normalize_email, validate_email, validate_password_simple, validate_username,
};

/// 注册请求的字段校验
pub(crate) fn validate_register(req: &RegisterRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_username(req.username.trim()) {
        errors.add("username", msg);
    }
    if let Err(msg) = validate_email(req.email.trim()) {
        errors.add("email", msg);
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        errors.add("password", msg);
    }
    if req.password != req.password_confirm {
        errors.add("password_confirm", "Passwords do not match.");
    }
    errors.into_result()
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    if let Err(errors) = validate_register(&register_request) {
        return Ok(validation_failed(errors));
    }

    let username = register_request.username.trim().to_string();
    let email = normalize_email(&register_request.email);

    // 1. 检查用户名是否已存在
    if let Err(response) = check_username_exists(&storage, &username).await {
        return Ok(response);
    }

    // 2. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    // 4. 创建用户（未验证）与学员资料
    let token = generate_verification_token();
    let create_request = CreateUserRequest {
        username,
        email,
        password_hash,
        first_name: register_request.first_name.trim().to_string(),
        last_name: register_request.last_name.trim().to_string(),
        role: UserRole::User,
        profile_role: ProfileRole::Student,
        is_email_verified: false,
        verification_token: Some(token.clone()),
    };

    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        Err(e) => return Ok(storage_failure("Register failed", e)),
    };

    tracing::info!("User {} registered", user.username);

    // 5. 验证邮件与欢迎邮件
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
    let contact_email = config
        .mail
        .reply_to
        .clone()
        .unwrap_or_else(|| config.mail.from.clone());
    mail::dispatch(
        request,
        templates::welcome(&user.first_name, &user.username, &user.email, &contact_email),
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        user,
        "Registration successful. Please check your email to verify your account.",
    )))
}

async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password_confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: "ada_l".to_string(),
            email: "Ada@Example.com".to_string(),
            password: "Str0ngPassw0rd".to_string(),
            password_confirm: password_confirm.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_register(&request("Str0ngPassw0rd")).is_ok());
    }

    #[test]
    fn test_password_confirm_mismatch() {
        let errors = validate_register(&request("other")).unwrap_err();
        assert!(errors.get("password_confirm").is_some());
        assert!(errors.get("password").is_none());
    }

    #[test]
    fn test_collects_all_field_errors() {
        let req = RegisterRequest {
            username: "a b".to_string(),
            email: "nope".to_string(),
            password: "short".to_string(),
            password_confirm: "short".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        let errors = validate_register(&req).unwrap_err();
        assert!(errors.get("username").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());
    }
}
