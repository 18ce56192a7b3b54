use super::entities::{
    ApplicationStatus, Enrollment, SelectionProcedure, Student, StudentSelection,
};
use crate::models::catalog::entities::CourseMaterial;
use crate::models::common::PaginatedResponse;
use crate::models::community::entities::Event;
use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

pub type StudentListResponse = PaginatedResponse<Student>;
pub type EnrollmentListResponse = PaginatedResponse<Enrollment>;
pub type SelectionProcedureListResponse = PaginatedResponse<SelectionProcedure>;
pub type StudentSelectionListResponse = PaginatedResponse<StudentSelection>;

// 课程摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub github: Option<String>,
    pub discord: Option<String>,
}

// 排期摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ScheduleSummary {
    pub id: i64,
    pub course_id: i64,
    pub course: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
}

// 学员详情：附带所选课程与排期
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub courses: Vec<CourseSummary>,
    pub schedules: Vec<ScheduleSummary>,
}

// 申请状态响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ApplicationStatusResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub application: ApplicationStatus,
    pub message: String,
    pub steps: Vec<StudentSelection>,
}

// 学习资源链接；仅在申请通过后填充
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct LearningLinks {
    pub github: Option<String>,
    pub discord: Option<String>,
    pub message: String,
}

// 学员仪表盘
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDashboardResponse {
    pub profile: StudentDetail,
    pub application: ApplicationStatusResponse,
    pub enrolled_schedules: Vec<ScheduleSummary>,
    pub upcoming_events: Vec<Event>,
    pub learning_materials: LearningLinks,
}

// 学习资料（申请通过后可见）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct LearningMaterialsResponse {
    pub courses: Vec<CourseSummary>,
    pub materials: Vec<CourseMaterial>,
}

// 报名排期结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct EnrollScheduleResponse {
    pub message: String,
    pub schedule: ScheduleSummary,
}
