use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::FileService;
use super::upload::stored_path;
use crate::config::AppConfig;
use crate::errors::EvolvError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure};

/// 公开下载，公开页面的图片也走这里
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(f)) => f,
        Ok(None) => return Ok(not_found(ErrorCode::FileNotFound, "File not found")),
        Err(e) => return Ok(storage_failure("File query failed", e)),
    };

    let file_path = stored_path(&AppConfig::get().upload.dir, &db_file.token);
    if !Path::new(&file_path).exists() {
        tracing::warn!("File record {} has no data on disk", db_file.token);
        return Ok(not_found(ErrorCode::FileNotFound, "File not found"));
    }

    let mut buf = Vec::new();
    if let Err(e) = File::open(&file_path).and_then(|mut f| f.read_to_end(&mut buf)) {
        tracing::error!("{}", EvolvError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )),
        );
    }

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, db_file.file_type.as_str()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", db_file.original_name.replace('"', "")),
        ))
        .body(buf))
}
