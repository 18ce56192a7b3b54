use super::entities::{Category, Course, CourseMaterial, Location, Partner};
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

pub type CategoryListResponse = PaginatedResponse<Category>;
pub type LocationListResponse = PaginatedResponse<Location>;
pub type PartnerListResponse = PaginatedResponse<Partner>;
pub type CourseListResponse = PaginatedResponse<Course>;

// 课程详情：附带分类、地点、合作伙伴和子课程
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CourseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub category: Option<Category>,
    pub locations: Vec<Location>,
    pub partners: Vec<Partner>,
    pub subcourses: Vec<Course>,
}

// 课程资料列表
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CourseMaterialListResponse {
    pub course_id: i64,
    pub items: Vec<CourseMaterial>,
}
