use super::entities::{DiplomaLevel, EnrollmentStatus, Gender, SelectionStatus};
use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::validation::{deserialize_some, max_length, require_text};
use crate::models::common::{FieldErrors, PaginationQuery};
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

fn validate_english_level(errors: &mut FieldErrors, level: i32) {
    if !(1..=5).contains(&level) {
        errors.add("english_level", "English level must be between 1 and 5.");
    }
}

fn validate_birth_date(errors: &mut FieldErrors, birth_date: NaiveDate, today: NaiveDate) {
    if birth_date > today {
        errors.add("birth_date", "Birth date cannot be in the future.");
    }
}

fn validate_student_email(errors: &mut FieldErrors, email: &str) {
    if crate::utils::validate::validate_email(email).is_err() {
        errors.add("email", "Enter a valid email address.");
    }
}

// 学员列表查询参数（管理员）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    pub search: Option<String>,
}

// 提交学员申请
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub zip_code: String,
    pub country_of_birth: String,
    pub nationality: String,
    pub diploma_level: DiplomaLevel,
    pub job_status: String,
    pub motivation: String,
    pub future_goals: String,
    pub proudest_moment: String,
    pub english_level: i32,
    pub how_heard: String,
    pub referral_person: Option<String>,
    pub has_laptop: bool,
    #[serde(default)]
    pub course_ids: Vec<i64>,
}

impl CreateStudentRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        validate_student_email(&mut errors, &self.email);
        require_text(&mut errors, "phone", &self.phone);
        max_length(&mut errors, "phone", &self.phone, 20);
        require_text(&mut errors, "first_name", &self.first_name);
        max_length(&mut errors, "first_name", &self.first_name, 50);
        require_text(&mut errors, "last_name", &self.last_name);
        max_length(&mut errors, "last_name", &self.last_name, 50);
        require_text(&mut errors, "zip_code", &self.zip_code);
        require_text(&mut errors, "country_of_birth", &self.country_of_birth);
        require_text(&mut errors, "nationality", &self.nationality);
        require_text(&mut errors, "job_status", &self.job_status);
        require_text(&mut errors, "motivation", &self.motivation);
        require_text(&mut errors, "future_goals", &self.future_goals);
        require_text(&mut errors, "proudest_moment", &self.proudest_moment);
        require_text(&mut errors, "how_heard", &self.how_heard);
        validate_english_level(&mut errors, self.english_level);
        validate_birth_date(&mut errors, self.birth_date, today);
        if self.course_ids.is_empty() {
            errors.add("course_ids", "Select at least one course.");
        }
        errors.into_result()
    }
}

// 更新学员档案（管理员或本人）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub zip_code: Option<String>,
    pub country_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub diploma_level: Option<DiplomaLevel>,
    pub job_status: Option<String>,
    pub motivation: Option<String>,
    pub future_goals: Option<String>,
    pub proudest_moment: Option<String>,
    pub english_level: Option<i32>,
    pub how_heard: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[ts(optional)]
    pub referral_person: Option<Option<String>>,
    pub has_laptop: Option<bool>,
    /// 提供时整体替换所选课程
    pub course_ids: Option<Vec<i64>>,
}

impl UpdateStudentRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(email) = &self.email {
            validate_student_email(&mut errors, email);
        }
        if let Some(phone) = &self.phone {
            require_text(&mut errors, "phone", phone);
            max_length(&mut errors, "phone", phone, 20);
        }
        if let Some(level) = self.english_level {
            validate_english_level(&mut errors, level);
        }
        if let Some(birth_date) = self.birth_date {
            validate_birth_date(&mut errors, birth_date, today);
        }
        errors.into_result()
    }
}

// 报名列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct EnrollmentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<EnrollmentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student: Option<i64>,
}

// 更新报名状态
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateEnrollmentRequest {
    pub status: EnrollmentStatus,
}

// 创建选拔步骤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateSelectionProcedureRequest {
    pub step_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl CreateSelectionProcedureRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "step_name", &self.step_name);
        max_length(&mut errors, "step_name", &self.step_name, 100);
        errors.into_result()
    }
}

// 更新选拔步骤
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateSelectionProcedureRequest {
    pub step_name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

// 学员选拔进度列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentSelectionListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub step: Option<i64>,
    pub status: Option<SelectionStatus>,
}

// 创建学员选拔进度
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentSelectionRequest {
    pub student_id: i64,
    pub step_id: i64,
    #[serde(default = "default_selection_status")]
    pub status: SelectionStatus,
}

fn default_selection_status() -> SelectionStatus {
    SelectionStatus::Pending
}

// 更新学员选拔进度
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentSelectionRequest {
    pub status: SelectionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "email": "ada@example.com",
            "phone": "+2348000000000",
            "first_name": "Ada",
            "last_name": "Obi",
            "gender": "female",
            "birth_date": "2000-04-12",
            "zip_code": "100001",
            "country_of_birth": "NG",
            "nationality": "NG",
            "diploma_level": "bachelor",
            "job_status": "Unemployed",
            "motivation": "Build products",
            "future_goals": "Data engineer",
            "proudest_moment": "Graduating",
            "english_level": 4,
            "how_heard": "Friend",
            "has_laptop": true,
            "course_ids": [1]
        }))
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_application() {
        assert!(application().validate(today()).is_ok());
    }

    #[test]
    fn test_english_level_range() {
        let mut request = application();
        request.english_level = 6;
        let errors = request.validate(today()).unwrap_err();
        assert!(errors.get("english_level").is_some());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let mut request = application();
        request.birth_date = NaiveDate::from_ymd_opt(2026, 6, 2).unwrap();
        let errors = request.validate(today()).unwrap_err();
        assert!(errors.get("birth_date").is_some());
    }

    #[test]
    fn test_enum_wire_names() {
        let update: UpdateEnrollmentRequest =
            serde_json::from_str(r#"{"status":"under_review"}"#).unwrap();
        assert_eq!(update.status, EnrollmentStatus::UnderReview);
        assert_eq!(DiplomaLevel::SecondarySchool.as_str(), "secondary_school");
    }
}
