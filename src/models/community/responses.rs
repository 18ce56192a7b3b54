use super::entities::{Alumni, Event, EventAttendance, Review};
use crate::models::catalog::entities::{Location, Partner};
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

pub type EventListResponse = PaginatedResponse<Event>;
pub type AttendanceListResponse = PaginatedResponse<EventAttendance>;
pub type AlumniListResponse = PaginatedResponse<Alumni>;
pub type ReviewListResponse = PaginatedResponse<Review>;

// 活动详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct EventDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub event: Event,
    pub location: Option<Location>,
    pub partners: Vec<Partner>,
}

// 校友详情：带用户显示名
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct AlumniDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub alumni: Alumni,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}
