use super::entities::{Profile, User};
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

// 用户响应（附带资料）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
    pub profile: Option<Profile>,
}

// 用户列表响应
pub type UserListResponse = PaginatedResponse<User>;

// 讲师公开资料
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct InstructorProfileResponse {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub picture: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

/// 清理用户足迹后各表删除的行数
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct FootprintPurgeReport {
    pub users: u64,
    pub profiles: u64,
    pub students: u64,
    pub alumni: u64,
    pub contact_messages: u64,
}

impl FootprintPurgeReport {
    pub fn total(&self) -> u64 {
        self.users + self.profiles + self.students + self.alumni + self.contact_messages
    }

    pub fn absorb(&mut self, other: FootprintPurgeReport) {
        self.users += other.users;
        self.profiles += other.profiles;
        self.students += other.students;
        self.alumni += other.alumni;
        self.contact_messages += other.contact_messages;
    }
}
