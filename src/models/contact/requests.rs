use crate::models::common::validation::{max_length, require_text};
use crate::models::common::{FieldErrors, PaginationQuery};
use serde::Deserialize;
use ts_rs::TS;

// 留言列表查询参数（管理员）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 提交留言
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl CreateContactRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        max_length(&mut errors, "name", &self.name, 100);
        if crate::utils::validate::validate_email(&self.email).is_err() {
            errors.add("email", "Enter a valid email address.");
        }
        require_text(&mut errors, "message", &self.message);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_validation() {
        let request = CreateContactRequest {
            name: "".to_string(),
            email: "not-an-email".to_string(),
            message: "Hello".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("message").is_none());
    }
}
