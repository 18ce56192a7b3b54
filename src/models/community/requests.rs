use super::entities::{validate_graduation_year, validate_rating};
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::validation::{deserialize_some, max_length, require_text};
use crate::models::common::{FieldErrors, PaginationQuery};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

fn default_rating() -> i32 {
    5
}

// 活动列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct EventListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// true 只看未来活动，false 只看已结束活动
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub upcoming: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    pub search: Option<String>,
}

// 创建活动请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location_id: Option<i64>,
    pub course_id: Option<i64>,
    #[serde(default)]
    pub is_virtual: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub partner_ids: Vec<i64>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "title", &self.title);
        max_length(&mut errors, "title", &self.title, 255);
        require_text(&mut errors, "description", &self.description);
        errors.into_result()
    }
}

// 更新活动请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub location_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub course_id: Option<Option<i64>>,
    pub is_virtual: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub image: Option<Option<String>>,
    pub partner_ids: Option<Vec<i64>>,
}

impl UpdateEventRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            require_text(&mut errors, "title", title);
            max_length(&mut errors, "title", title, 255);
        }
        errors.into_result()
    }
}

// 签到列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct AttendanceListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub event: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student: Option<i64>,
}

// 创建签到记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct CreateAttendanceRequest {
    pub event_id: i64,
    pub student_id: i64,
    #[serde(default)]
    pub attended: bool,
}

// 更新签到记录
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct UpdateAttendanceRequest {
    pub attended: bool,
}

// 校友列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct AlumniListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub graduation_year: Option<i64>,
}

// 创建校友请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct CreateAlumniRequest {
    pub user_id: i64,
    pub graduation_year: i32,
    pub current_position: String,
    pub success_story: String,
    pub course_id: Option<i64>,
    pub location_id: Option<i64>,
}

impl CreateAlumniRequest {
    pub fn validate(&self, current_year: i32) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Err(year) = validate_graduation_year(self.graduation_year, current_year) {
            errors.merge(year);
        }
        require_text(&mut errors, "current_position", &self.current_position);
        max_length(&mut errors, "current_position", &self.current_position, 255);
        require_text(&mut errors, "success_story", &self.success_story);
        errors.into_result()
    }
}

// 更新校友请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct UpdateAlumniRequest {
    pub graduation_year: Option<i32>,
    pub current_position: Option<String>,
    pub success_story: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub course_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub location_id: Option<Option<i64>>,
}

impl UpdateAlumniRequest {
    pub fn validate(&self, current_year: i32) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(year) = self.graduation_year
            && let Err(e) = validate_graduation_year(year, current_year)
        {
            errors.merge(e);
        }
        if let Some(position) = &self.current_position {
            require_text(&mut errors, "current_position", position);
        }
        errors.into_result()
    }
}

// 评价列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct ReviewListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub alumni: Option<i64>,
}

// 创建评价请求（公开）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct CreateReviewRequest {
    pub name: String,
    pub review_text: String,
    pub course_id: Option<i64>,
    pub alumni_id: Option<i64>,
    #[serde(default = "default_rating")]
    pub rating: i32,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name);
        max_length(&mut errors, "name", &self.name, 255);
        require_text(&mut errors, "review_text", &self.review_text);
        if let Err(rating) = validate_rating(self.rating) {
            errors.merge(rating);
        }
        errors.into_result()
    }
}

// 更新评价请求（管理员）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct UpdateReviewRequest {
    pub name: Option<String>,
    pub review_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub course_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub alumni_id: Option<Option<i64>>,
    pub rating: Option<i32>,
}

impl UpdateReviewRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(rating) = self.rating
            && let Err(e) = validate_rating(rating)
        {
            errors.merge(e);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_rating_defaults_to_five() {
        let request: CreateReviewRequest =
            serde_json::from_str(r#"{"name":"Tolu","review_text":"Great cohort"}"#).unwrap();
        assert_eq!(request.rating, 5);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_alumni_year_validation() {
        let request: CreateAlumniRequest = serde_json::from_str(
            r#"{"user_id":3,"graduation_year":1900,"current_position":"Analyst","success_story":"..."}"#,
        )
        .unwrap();
        let errors = request.validate(2026).unwrap_err();
        assert!(errors.get("graduation_year").is_some());
    }

    #[test]
    fn test_event_filters_from_query() {
        let query = actix_web::web::Query::<EventListQuery>::from_query("upcoming=false&course=2")
            .unwrap()
            .into_inner();
        assert_eq!(query.upcoming, Some(false));
        assert_eq!(query.course, Some(2));
    }
}
