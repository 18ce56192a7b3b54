use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::validation::{deserialize_some, require_text};
use crate::models::common::{FieldErrors, PaginationQuery};
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 排期列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct ScheduleListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub location: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub instructor: Option<i64>,
}

// 创建排期请求
//
// 讲师只能为自己创建排期，instructor_id 缺省时取当前用户
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct CreateScheduleRequest {
    pub course_id: i64,
    pub location_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor_id: Option<i64>,
}

// 更新排期请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct UpdateScheduleRequest {
    pub location_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub instructor_id: Option<Option<i64>>,
}

// 模块列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct ModuleListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub schedule: Option<i64>,
}

// 创建模块请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct CreateModuleRequest {
    pub schedule_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}

impl CreateModuleRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title);
        if self.order < 0 {
            errors.add("order", "Order must be zero or greater.");
        }
        errors.into_result()
    }
}

// 更新模块请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct UpdateModuleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

// 课时列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct LessonListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub module: Option<i64>,
}

// 创建课时请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct CreateLessonRequest {
    pub module_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub resources_url: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl CreateLessonRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title);
        errors.into_result()
    }
}

// 更新课时请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub resources_url: Option<String>,
    pub order: Option<i32>,
}
