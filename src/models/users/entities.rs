use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 账号角色：admin 对应后台工作人员
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    UserRole {
        User => "user",
        Admin => "admin",
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::User, &Self::Admin]
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    UserStatus {
        Active => "active",
        Suspended => "suspended",
    }
}

crate::define_string_enum! {
    /// 资料角色，决定前台展示身份
    #[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
    ProfileRole {
        Student => "student",
        Instructor => "instructor",
        Alumni => "alumni",
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub is_email_verified: bool,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub email_verification_token: Option<String>,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub email_verification_sent_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 显示名：优先使用名字，否则用户名
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }

    /// 非管理员且邮箱未验证的用户不能登录
    pub fn requires_email_verification(&self) -> bool {
        !self.is_admin() && !self.is_email_verified
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

// 用户资料（与用户一对一）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub role: ProfileRole,
    /// 头像文件 token
    pub picture: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
pub(crate) fn sample_user(role: UserRole, verified: bool) -> User {
    let now = chrono::Utc::now();
    User {
        id: 1,
        username: "ada_l".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: String::new(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        role,
        status: UserStatus::Active,
        is_email_verified: verified,
        email_verification_token: None,
        email_verification_sent_at: None,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_required_only_for_unverified_non_admins() {
        assert!(sample_user(UserRole::User, false).requires_email_verification());
        assert!(!sample_user(UserRole::User, true).requires_email_verification());
        assert!(!sample_user(UserRole::Admin, false).requires_email_verification());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = sample_user(UserRole::User, true);
        assert_eq!(user.display_name(), "Ada");
        user.first_name = "  ".to_string();
        assert_eq!(user.display_name(), "ada_l");
    }

    #[test]
    fn test_sensitive_fields_are_not_serialized() {
        let mut user = sample_user(UserRole::User, false);
        user.password_hash = "hash".to_string();
        user.email_verification_token = Some("secret".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("email_verification_token").is_none());
        assert_eq!(json["role"], "user");
    }
}
