use super::entities::{ProfileRole, UserRole, UserStatus};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;
use crate::models::common::FieldErrors;
use crate::models::common::validation::max_length;
use crate::utils::validate::{validate_email, validate_url};
use serde::Deserialize;
use ts_rs::TS;

// 用户列表查询参数（管理员）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_email_verified: Option<bool>,
    pub search: Option<String>,
}

// 用户创建请求（存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub profile_role: ProfileRole,
    pub is_email_verified: bool,
    pub verification_token: Option<String>,
}

// 用户更新请求（存储层）
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub is_email_verified: Option<bool>,
}

// 资料更新请求；空字符串表示清空该字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub picture: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(ref first_name) = self.first_name {
            max_length(&mut errors, "first_name", first_name, 150);
        }
        if let Some(ref last_name) = self.last_name {
            max_length(&mut errors, "last_name", last_name, 150);
        }
        if let Some(ref email) = self.email
            && !email.is_empty()
            && let Err(msg) = validate_email(email)
        {
            errors.add("email", msg);
        }
        for (field, value) in [
            ("picture", &self.picture),
            ("twitter", &self.twitter),
            ("linkedin", &self.linkedin),
        ] {
            if let Some(url) = value
                && !url.is_empty()
                && let Err(msg) = validate_url(url)
            {
                errors.add(field, msg);
            }
        }
        errors.into_result()
    }
}

// 管理员更新用户
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct AdminUpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub is_email_verified: Option<bool>,
    pub profile_role: Option<ProfileRole>,
    #[serde(flatten)]
    #[ts(flatten)]
    pub profile: UpdateProfileRequest,
}

// 管理员创建管理员账号
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// 自助注销账号，需要再次输入密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct DeleteAccountRequest {
    pub password: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CleanupEmailRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_links_must_be_urls() {
        let update = UpdateProfileRequest {
            linkedin: Some("linkedin.com/in/ada".to_string()),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.get("linkedin").is_some());
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn test_empty_values_clear_fields() {
        let update = UpdateProfileRequest {
            picture: Some(String::new()),
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
