use crate::models::common::validation::{max_length, require_text};
use crate::models::common::FieldErrors;
use serde::Deserialize;
use ts_rs::TS;

// 更新关于我们
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct UpdateAboutUsRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub image: Option<String>,
}

impl UpdateAboutUsRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            require_text(&mut errors, "title", title);
            max_length(&mut errors, "title", title, 255);
        }
        errors.into_result()
    }
}

// 创建核心价值观
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct CreateCoreValueRequest {
    pub title: String,
    pub description: String,
}

impl CreateCoreValueRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title);
        max_length(&mut errors, "title", &self.title, 255);
        require_text(&mut errors, "description", &self.description);
        errors.into_result()
    }
}

// 更新核心价值观
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct UpdateCoreValueRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

// 创建团队成员
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct CreateTeamMemberRequest {
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    #[serde(default)]
    pub core_value_ids: Vec<i64>,
}

impl CreateTeamMemberRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        require_text(&mut errors, "role", &self.role);
        errors.into_result()
    }
}

// 更新团队成员；core_value_ids 提供时整体替换
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct UpdateTeamMemberRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub core_value_ids: Option<Vec<i64>>,
}
