use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 关于我们单例的默认标题
pub const DEFAULT_ABOUT_TITLE: &str = "About EvolvLearn";

// 关于我们（单例）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct AboutUs {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub image: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 核心价值观
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct CoreValue {
    pub id: i64,
    pub about_us_id: i64,
    pub title: String,
    pub description: String,
}

// 团队成员
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/about.ts")]
pub struct TeamMember {
    pub id: i64,
    pub about_us_id: i64,
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}
