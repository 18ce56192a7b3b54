use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::entities::{ProfileRole, UserRole};
use crate::models::users::requests::{CreateAdminRequest, CreateUserRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{storage_failure, validation_failed};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_email, validate_email, validate_password_simple, validate_username,
};

fn validate_admin(req: &CreateAdminRequest) -> Result<(), FieldErrors> {
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
    errors.into_result()
}

/// 创建管理员账号，邮箱直接视为已验证
pub async fn create_admin(
    service: &UserService,
    create_request: CreateAdminRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(errors) = validate_admin(&create_request) {
        return Ok(validation_failed(errors));
    }

    let storage = service.get_storage(request);
    let username = create_request.username.trim().to_string();
    let email = normalize_email(&create_request.email);

    match storage.get_user_by_username(&username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_failure("Admin creation failed", e)),
    }
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_failure("Admin creation failed", e)),
    }

    let password_hash = match hash_password(&create_request.password) {
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

    let user_request = CreateUserRequest {
        username,
        email,
        password_hash,
        first_name: create_request.first_name.trim().to_string(),
        last_name: create_request.last_name.trim().to_string(),
        role: UserRole::Admin,
        profile_role: ProfileRole::Instructor,
        is_email_verified: true,
        verification_token: None,
    };

    match storage.create_user(user_request).await {
        Ok(user) => {
            tracing::info!("Admin {} created", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Admin created successfully")))
        }
        Err(e) => Ok(storage_failure("Admin creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_requires_strong_password() {
        let req = CreateAdminRequest {
            username: "staff".to_string(),
            email: "staff@evolvlearn.org".to_string(),
            password: "password".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        let errors = validate_admin(&req).unwrap_err();
        assert!(errors.get("password").is_some());
        assert!(errors.get("username").is_none());
    }
}
