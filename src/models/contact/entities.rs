use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 联系我们留言
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/contact.ts")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
