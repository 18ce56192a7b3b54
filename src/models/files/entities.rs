use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    // 文件的唯一标识符，也是下载地址的一部分
    pub token: String,
    // 原始文件名
    pub original_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 文件类型
    pub file_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    // 上传者，账号删除后置空
    pub user_id: Option<i64>,
}
