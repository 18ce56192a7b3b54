use serde::Serialize;
use ts_rs::TS;

// 健康检查
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
}
