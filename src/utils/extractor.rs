//! 安全的路径参数提取器
//!
//! 非法参数直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 取路径中的第一个参数
fn first_path_param(req: &HttpRequest) -> Option<String> {
    req.match_info()
        .iter()
        .next()
        .map(|(_, value)| value.to_string())
}

fn parse_positive_id(raw: &str) -> Result<i64, String> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid id: {raw}")),
    }
}

/// 正整数 ID 路径参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match first_path_param(req) {
            Some(raw) => parse_positive_id(&raw).map(SafeIDI64).map_err(bad_request),
            None => Err(bad_request("Missing path parameter".to_string())),
        };
        ready(result)
    }
}

/// 文件 token 路径参数，只允许字母数字和连字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeFileToken(pub String);

fn is_valid_file_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= 64
        && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match first_path_param(req) {
            Some(raw) if is_valid_file_token(&raw) => Ok(SafeFileToken(raw)),
            Some(raw) => Err(bad_request(format!("Invalid file token: {raw}"))),
            None => Err(bad_request("Missing path parameter".to_string())),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id("42"), Ok(42));
        assert!(parse_positive_id("0").is_err());
        assert!(parse_positive_id("-3").is_err());
        assert!(parse_positive_id("abc").is_err());
    }

    #[test]
    fn test_file_token_charset() {
        assert!(is_valid_file_token("3f2b8c1e-1d2a-4c7e-9a0b-5e6f7a8b9c0d"));
        assert!(!is_valid_file_token("../etc/passwd"));
        assert!(!is_valid_file_token(""));
    }

    #[actix_web::test]
    async fn test_extracts_id_from_path() {
        let req = actix_web::test::TestRequest::default()
            .param("id", "17")
            .to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 17);
    }
}
