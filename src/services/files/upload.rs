use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::EvolvError;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::services::current_user;
use crate::utils::file_magic::{content_type_for, extension_of, validate_magic_bytes};

/// 允许列表里的扩展名可带或不带点号
fn is_allowed_extension(allowed: &[String], extension: &str) -> bool {
    allowed
        .iter()
        .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(extension))
}

pub(crate) fn stored_path(upload_dir: &str, token: &str) -> String {
    format!("{upload_dir}/{token}.bin")
}

pub(crate) fn download_url(token: &str) -> String {
    format!("/api/v1/files/download/{token}")
}

/// 写入中的上传文件，未调用 `keep` 就被丢弃时删除磁盘上的部分内容
struct PartialUpload {
    path: String,
    file: File,
    kept: bool,
}

impl PartialUpload {
    fn create(path: &str) -> std::io::Result<Self> {
        Ok(Self {
            path: path.to_string(),
            file: File::create(path)?,
            kept: false,
        })
    }

    fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.file.write_all(data)
    }

    fn keep(mut self) {
        self.kept = true;
    }
}

impl Drop for PartialUpload {
    fn drop(&mut self) {
        if !self.kept {
            let _ = fs::remove_file(&self.path);
        }
    }
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        message,
    ))
}

fn rejected(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(req) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", EvolvError::file_operation(format!("{e}")));
        return Ok(upload_failed("Failed to create upload directory"));
    }

    let token = Uuid::new_v4().to_string();
    let file_path = stored_path(upload_dir, &token);

    let mut original_name = String::new();
    let mut extension = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            let _ = fs::remove_file(&file_path);
            return Ok(rejected(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        extension = extension_of(&original_name).unwrap_or_default();
        if !is_allowed_extension(&config.upload.allowed_types, &extension) {
            return Ok(rejected(ErrorCode::FileTypeNotAllowed, "File type not allowed"));
        }

        let mut partial = match PartialUpload::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", EvolvError::file_operation(format!("{e}")));
                return Ok(upload_failed("Failed to create file"));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = chunk?;

            // 首个分片校验魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    return Ok(rejected(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    ));
                }
            }

            total_size += data.len();
            if total_size > max_size {
                return Ok(rejected(
                    ErrorCode::FileSizeExceeded,
                    "File exceeds the maximum upload size",
                ));
            }
            partial.write(&data)?;
        }

        if first_chunk {
            return Ok(rejected(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
        }
        partial.keep();
        file_size = total_size as i64;
    }

    if !file_uploaded {
        return Ok(rejected(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    }

    let storage = service.get_storage(req);
    let file_type = content_type_for(&extension);

    match storage
        .create_file(&token, &original_name, file_size, file_type, Some(user.id))
        .await
    {
        Ok(file) => {
            tracing::info!(
                "File {} ({} bytes) uploaded by {}",
                file.original_name,
                file.file_size,
                user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                FileUploadResponse {
                    download_url: download_url(&file.token),
                    token: file.token,
                    original_name: file.original_name,
                    size: file.file_size,
                    content_type: file.file_type,
                    uploaded_at: file.uploaded_at,
                },
                "File uploaded successfully",
            )))
        }
        Err(e) => {
            let _ = fs::remove_file(&file_path);
            tracing::error!("Failed to record upload: {}", e);
            Ok(upload_failed("Failed to upload file"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension_ignores_dots_and_case() {
        let allowed = vec!["pdf".to_string(), ".PNG".to_string()];
        assert!(is_allowed_extension(&allowed, "pdf"));
        assert!(is_allowed_extension(&allowed, "png"));
        assert!(!is_allowed_extension(&allowed, "exe"));
        assert!(!is_allowed_extension(&allowed, ""));
    }

    #[test]
    fn test_partial_upload_removed_unless_kept() {
        let dir = std::env::temp_dir();
        let dropped = stored_path(dir.to_str().unwrap(), &Uuid::new_v4().to_string());
        let kept = stored_path(dir.to_str().unwrap(), &Uuid::new_v4().to_string());

        {
            let mut partial = PartialUpload::create(&dropped).unwrap();
            partial.write(b"%PDF-1.7 partial").unwrap();
        }
        assert!(!Path::new(&dropped).exists());

        let mut partial = PartialUpload::create(&kept).unwrap();
        partial.write(b"%PDF-1.7 complete").unwrap();
        partial.keep();
        assert!(Path::new(&kept).exists());
        fs::remove_file(&kept).unwrap();
    }

    #[test]
    fn test_paths_use_token() {
        assert_eq!(stored_path("uploads", "abc"), "uploads/abc.bin");
        assert_eq!(download_url("abc"), "/api/v1/files/download/abc");
    }
}
