use super::entities::{AboutUs, CoreValue, TeamMember};
use serde::Serialize;
use ts_rs::TS;

// 团队成员及其认同的价值观
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct TeamMemberDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub member: TeamMember,
    pub core_values: Vec<CoreValue>,
}

// 关于我们页面完整数据
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct AboutUsDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub about: AboutUs,
    pub core_values: Vec<CoreValue>,
    pub team_members: Vec<TeamMemberDetail>,
}
