use super::entities::{Lesson, Module, Schedule};
use crate::models::catalog::entities::Location;
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

pub type ScheduleListResponse = PaginatedResponse<Schedule>;
pub type ModuleListResponse = PaginatedResponse<Module>;
pub type LessonListResponse = PaginatedResponse<Lesson>;

// 模块及其课时
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    #[ts(flatten)]
    pub module: Module,
    pub lessons: Vec<Lesson>,
}

// 排期详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct ScheduleDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub schedule: Schedule,
    pub course_name: String,
    pub location: Option<Location>,
    pub modules: Vec<ModuleWithLessons>,
}
