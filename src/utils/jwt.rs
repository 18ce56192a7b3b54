use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use chrono::TimeDelta;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

const ACCESS_TOKEN: &str = "access";
const REFRESH_TOKEN: &str = "refresh";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 用户 ID
    pub role: String,       // 账号角色
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
    /// 记住我：刷新时沿用更长的 cookie 有效期
    #[serde(default)]
    pub remember_me: bool,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// access token 有效秒数，用于登录响应的 expires_in
    pub fn access_token_ttl_seconds() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    /// refresh token 有效期；记住我时使用更长的配置
    pub fn refresh_token_ttl(remember_me: bool) -> TimeDelta {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            TimeDelta::days(jwt.refresh_token_remember_me_expiry)
        } else {
            TimeDelta::days(jwt.refresh_token_expiry)
        }
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        let claims = Self::build_claims(
            user_id,
            role,
            ACCESS_TOKEN,
            TimeDelta::minutes(config.jwt.access_token_expiry),
            false,
        );
        Self::encode_with_secret(&claims, &Self::get_secret())
    }

    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<TimeDelta>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let remember_me = token_expiry.is_some();
        let expiry = token_expiry.unwrap_or_else(|| Self::refresh_token_ttl(false));
        let claims = Self::build_claims(user_id, role, REFRESH_TOKEN, expiry, remember_me);
        Self::encode_with_secret(&claims, &Self::get_secret())
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<TimeDelta>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_token_expiry)?,
        })
    }

    fn build_claims(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry: TimeDelta,
        remember_me: bool,
    ) -> Claims {
        let now = chrono::Utc::now();
        Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
            remember_me,
        }
    }

    pub fn encode_with_secret(
        claims: &Claims,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn decode_with_secret(
        token: &str,
        secret: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(token, &Self::get_secret(), ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(token, &Self::get_secret(), REFRESH_TOKEN)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str, remember_me: bool) -> Cookie<'static> {
        let config = AppConfig::get();
        let max_age = Self::refresh_token_ttl(remember_me).num_seconds();
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(max_age))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims(token_type: &str, expiry: TimeDelta) -> Claims {
        JwtUtils::build_claims(42, "admin", token_type, expiry, false)
    }

    #[test]
    fn test_round_trip_access_claims() {
        let token =
            JwtUtils::encode_with_secret(&claims(ACCESS_TOKEN, TimeDelta::minutes(5)), SECRET)
                .unwrap();
        let decoded = JwtUtils::decode_with_secret(&token, SECRET, ACCESS_TOKEN).unwrap();
        assert_eq!(decoded.user_id(), Some(42));
        assert_eq!(decoded.role, "admin");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let token =
            JwtUtils::encode_with_secret(&claims(REFRESH_TOKEN, TimeDelta::days(1)), SECRET)
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, SECRET, ACCESS_TOKEN).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token =
            JwtUtils::encode_with_secret(&claims(ACCESS_TOKEN, TimeDelta::minutes(5)), SECRET)
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "other", ACCESS_TOKEN).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            JwtUtils::encode_with_secret(&claims(ACCESS_TOKEN, TimeDelta::hours(-2)), SECRET)
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, SECRET, ACCESS_TOKEN).is_err());
    }
}
