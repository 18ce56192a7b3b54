use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    DiplomaLevel {
        Phd => "phd",
        Master => "master",
        Bachelor => "bachelor",
        SecondarySchool => "secondary_school",
        NoOption => "no_option",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    EnrollmentStatus {
        Pending => "pending",
        UnderReview => "under_review",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl EnrollmentStatus {
    /// 审核结束的状态，需要通知学员
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    SelectionStatus {
        Pending => "pending",
        Completed => "completed",
    }
}

crate::define_string_enum! {
    /// 派生的申请状态
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    ApplicationState {
        NotApplied => "not_applied",
        Submitted => "submitted",
        Pending => "pending",
        InProgress => "in_progress",
        Approved => "approved",
    }
}

// 学员申请档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: Option<i64>,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub zip_code: String,
    pub country_of_birth: String,
    pub nationality: String,
    pub register_number: Option<String>,
    pub diploma_level: DiplomaLevel,
    pub job_status: String,
    pub motivation: String,
    pub future_goals: String,
    pub proudest_moment: String,
    /// 英语水平 1-5
    pub english_level: i32,
    pub how_heard: String,
    pub referral_person: Option<String>,
    pub has_laptop: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程报名
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub status: EnrollmentStatus,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 选拔流程步骤
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct SelectionProcedure {
    pub id: i64,
    pub step_name: String,
    pub description: Option<String>,
    pub order: i32,
}

// 学员在某一步骤上的进度
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentSelection {
    pub id: i64,
    pub student_id: i64,
    pub step_id: i64,
    pub status: SelectionStatus,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 申请进度汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ApplicationStatus {
    pub status: ApplicationState,
    pub completed_steps: i64,
    pub total_steps: i64,
    pub progress_percentage: i64,
    pub is_approved: bool,
}

impl ApplicationStatus {
    /// 根据是否存在申请以及各步骤状态推导申请状态
    pub fn derive(has_student: bool, steps: &[SelectionStatus]) -> Self {
        let total = steps.len() as i64;
        let completed = steps
            .iter()
            .filter(|s| **s == SelectionStatus::Completed)
            .count() as i64;

        let status = if !has_student {
            ApplicationState::NotApplied
        } else if total == 0 {
            ApplicationState::Submitted
        } else if completed == total {
            ApplicationState::Approved
        } else if completed > 0 {
            ApplicationState::InProgress
        } else {
            ApplicationState::Pending
        };

        let progress_percentage = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as i64
        };

        Self {
            status,
            completed_steps: completed,
            total_steps: total,
            progress_percentage,
            is_approved: status == ApplicationState::Approved,
        }
    }

    /// 面向学员的状态说明
    pub fn message(&self) -> String {
        match self.status {
            ApplicationState::NotApplied => {
                "You haven't submitted a student application yet.".to_string()
            }
            ApplicationState::Submitted => "Your application is under review.".to_string(),
            ApplicationState::Pending => "Your application is pending review.".to_string(),
            ApplicationState::InProgress => format!(
                "Your application is in progress. {}/{} steps completed.",
                self.completed_steps, self.total_steps
            ),
            ApplicationState::Approved => {
                "Congratulations! Your application has been approved.".to_string()
            }
        }
    }
}

/// 学号格式 `EVOLV-{year}-{n:04}`，n 为当年最大序号 + 1
///
/// 取最大序号而非计数，删除学员后不会与仍在使用的学号重复。
pub fn format_register_number(year: i32, last_sequence: u64) -> String {
    format!("EVOLV-{year}-{:04}", last_sequence + 1)
}

/// 当年学号前缀，用于查询
pub fn register_number_prefix(year: i32) -> String {
    format!("EVOLV-{year}-")
}

/// 解析学号中的序号，前缀不符或序号非数字时返回 None
pub fn parse_register_sequence(year: i32, register_number: &str) -> Option<u64> {
    register_number
        .strip_prefix(&register_number_prefix(year))?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SelectionStatus::{Completed, Pending};

    #[test]
    fn test_not_applied() {
        let status = ApplicationStatus::derive(false, &[]);
        assert_eq!(status.status, ApplicationState::NotApplied);
        assert!(!status.is_approved);
    }

    #[test]
    fn test_submitted_without_steps() {
        let status = ApplicationStatus::derive(true, &[]);
        assert_eq!(status.status, ApplicationState::Submitted);
        assert_eq!(status.progress_percentage, 0);
    }

    #[test]
    fn test_all_completed_is_approved() {
        let status = ApplicationStatus::derive(true, &[Completed, Completed]);
        assert_eq!(status.status, ApplicationState::Approved);
        assert_eq!(status.progress_percentage, 100);
        assert!(status.is_approved);
    }

    #[test]
    fn test_partial_progress() {
        let status = ApplicationStatus::derive(true, &[Completed, Pending, Pending]);
        assert_eq!(status.status, ApplicationState::InProgress);
        assert_eq!(status.completed_steps, 1);
        assert_eq!(status.total_steps, 3);
        assert_eq!(status.progress_percentage, 33);
        assert!(status.message().contains("1/3"));
    }

    #[test]
    fn test_two_thirds_rounds_up() {
        let status = ApplicationStatus::derive(true, &[Completed, Completed, Pending]);
        assert_eq!(status.progress_percentage, 67);
    }

    #[test]
    fn test_nothing_completed_is_pending() {
        let status = ApplicationStatus::derive(true, &[Pending, Pending]);
        assert_eq!(status.status, ApplicationState::Pending);
    }

    #[test]
    fn test_register_number_format() {
        assert_eq!(format_register_number(2026, 0), "EVOLV-2026-0001");
        assert_eq!(format_register_number(2026, 41), "EVOLV-2026-0042");
        assert!(format_register_number(2026, 9).starts_with(&register_number_prefix(2026)));
    }

    #[test]
    fn test_parse_register_sequence() {
        assert_eq!(parse_register_sequence(2026, "EVOLV-2026-0042"), Some(42));
        assert_eq!(parse_register_sequence(2026, "EVOLV-2026-12345"), Some(12345));
        assert_eq!(parse_register_sequence(2026, "EVOLV-2025-0042"), None);
        assert_eq!(parse_register_sequence(2026, "EVOLV-2026-abc"), None);
    }

    #[test]
    fn test_enrollment_final_states() {
        assert!(EnrollmentStatus::Approved.is_final());
        assert!(EnrollmentStatus::Rejected.is_final());
        assert!(!EnrollmentStatus::UnderReview.is_final());
    }
}
