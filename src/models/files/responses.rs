use serde::Serialize;
use ts_rs::TS;

/// 上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    /// 文件 token，供课程、活动等引用
    pub token: String,
    /// 原始文件名
    pub original_name: String,
    /// 文件大小(字节)
    pub size: i64,
    /// 文件类型
    pub content_type: String,
    /// 下载地址
    pub download_url: String,
    /// 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
