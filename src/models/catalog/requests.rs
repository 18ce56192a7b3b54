use super::entities::{CourseTimeline, LocationType, MaterialType, OnlineRegion};
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::validation::{deserialize_some, max_length, require_text};
use crate::models::common::{FieldErrors, PaginationQuery};
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

fn default_true() -> bool {
    true
}

// 分类列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CategoryListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// 创建分类请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order: i32,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        max_length(&mut errors, "name", &self.name, 100);
        if let Some(color) = &self.color {
            max_length(&mut errors, "color", color, 50);
        }
        errors.into_result()
    }
}

// 更新分类请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name);
            max_length(&mut errors, "name", name, 100);
        }
        if let Some(color) = &self.color {
            max_length(&mut errors, "color", color, 50);
        }
        errors.into_result()
    }
}

// 地点列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct LocationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub location_type: Option<LocationType>,
    pub search: Option<String>,
}

// 创建地点请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CreateLocationRequest {
    pub name: String,
    pub location_type: LocationType,
    pub online_region: Option<OnlineRegion>,
    pub country: Option<String>,
    pub state: Option<String>,
}

impl CreateLocationRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        if let Err(region) = super::entities::validate_location_region(
            self.location_type,
            self.online_region,
        ) {
            errors.merge(region);
        }
        errors.into_result()
    }
}

// 更新地点请求；online_region 传 null 表示清空
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub location_type: Option<LocationType>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub online_region: Option<Option<OnlineRegion>>,
    pub country: Option<String>,
    pub state: Option<String>,
}

// 合作伙伴列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct PartnerListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建合作伙伴请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CreatePartnerRequest {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

impl CreatePartnerRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        if let Some(email) = &self.contact_email
            && crate::utils::validate::validate_email(email).is_err()
        {
            errors.add("contact_email", "Enter a valid email address.");
        }
        errors.into_result()
    }
}

// 更新合作伙伴请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct UpdatePartnerRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
}

impl UpdatePartnerRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            require_text(&mut errors, "name", name);
        }
        if let Some(email) = &self.contact_email
            && !email.is_empty()
            && crate::utils::validate::validate_email(email).is_err()
        {
            errors.add("contact_email", "Enter a valid email address.");
        }
        errors.into_result()
    }
}

// 课程列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CourseListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub parent: Option<i64>,
    /// 只列出顶级课程
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub top_level: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub location: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub instructor: Option<i64>,
    pub search: Option<String>,
}

// 创建课程请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub category_id: i64,
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    pub software_tools: Option<String>,
    pub topics_covered: Option<String>,
    pub instructor_id: Option<i64>,
    pub registration_deadline: Option<NaiveDate>,
    pub selection_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub github: Option<String>,
    pub discord: Option<String>,
    pub video_content: Option<String>,
    pub additional_materials: Option<String>,
    #[serde(default)]
    pub location_ids: Vec<i64>,
    #[serde(default)]
    pub partner_ids: Vec<i64>,
}

impl CreateCourseRequest {
    pub fn timeline(&self) -> CourseTimeline {
        CourseTimeline {
            registration_deadline: self.registration_deadline,
            selection_date: self.selection_date,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        max_length(&mut errors, "name", &self.name, 200);
        if let Err(dates) = self.timeline().validate() {
            errors.merge(dates);
        }
        errors.into_result()
    }
}

// 更新课程请求
//
// 可空字段使用双层 Option：缺省表示不修改，null 表示清空。
// location_ids / partner_ids 提供时整体替换关联。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub parent_id: Option<Option<i64>>,
    pub description: Option<String>,
    pub software_tools: Option<String>,
    pub topics_covered: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub instructor_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub registration_deadline: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub selection_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub end_date: Option<Option<NaiveDate>>,
    pub github: Option<String>,
    pub discord: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub video_content: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub additional_materials: Option<Option<String>>,
    pub location_ids: Option<Vec<i64>>,
    pub partner_ids: Option<Vec<i64>>,
}

impl UpdateCourseRequest {
    /// 将本次修改叠加到现有日期上，得到更新后的时间线
    pub fn merged_timeline(&self, current: CourseTimeline) -> CourseTimeline {
        CourseTimeline {
            registration_deadline: self
                .registration_deadline
                .unwrap_or(current.registration_deadline),
            selection_date: self.selection_date.unwrap_or(current.selection_date),
            start_date: self.start_date.unwrap_or(current.start_date),
            end_date: self.end_date.unwrap_or(current.end_date),
        }
    }
}

// 课程资料上传请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub material_type: MaterialType,
    /// 已上传文件的 token
    pub file_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_merges_and_clears_dates() {
        let current = CourseTimeline {
            registration_deadline: NaiveDate::from_ymd_opt(2026, 1, 1),
            selection_date: NaiveDate::from_ymd_opt(2026, 1, 15),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 7, 1),
        };
        let patch: UpdateCourseRequest =
            serde_json::from_str(r#"{"selection_date":null,"end_date":"2026-01-20"}"#).unwrap();
        let merged = patch.merged_timeline(current);
        assert_eq!(merged.selection_date, None);
        assert_eq!(merged.registration_deadline, current.registration_deadline);
        let errors = merged.validate().unwrap_err();
        assert!(errors.get("end_date").is_some());
    }

    #[test]
    fn test_create_course_collects_field_errors() {
        let request: CreateCourseRequest = serde_json::from_str(
            r#"{"name":"","category_id":1,"start_date":"2026-05-01","end_date":"2026-04-01"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("end_date").is_some());
        assert!(request.location_ids.is_empty());
    }

    #[test]
    fn test_category_color_length() {
        let request = CreateCategoryRequest {
            name: "Data".to_string(),
            description: None,
            icon: None,
            image: None,
            color: Some("bg-primary-gold".to_string()),
            is_active: true,
            order: 0,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_location_request_region() {
        let request: CreateLocationRequest =
            serde_json::from_str(r#"{"name":"Remote","location_type":"online"}"#).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.get("online_region").is_some());
    }
}
