/*!
 * 速率限制中间件
 *
 * 固定窗口计数：键为 `前缀:身份:窗口序号`，身份优先取已认证用户 ID，否则取客户端 IP。
 * 窗口切换后自动使用新键，旧计数随缓存过期淘汰。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())  // 10 次/小时/IP
 *     .route(web::post().to(login))
 * ```
 *
 * 需要按用户限流时，RateLimit 必须位于 RequireJWT 内层。超限返回 429 并带 `Retry-After`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

/// 全局计数缓存，存活时间覆盖最长的窗口
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(DAY))
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
}

impl RateLimit {
    /// 创建新的速率限制器
    ///
    /// # 参数
    /// - `max_requests`: 时间窗口内允许的最大请求数
    /// - `window_secs`: 时间窗口（秒）
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 注册：5 次/小时/IP
    pub fn register() -> Self {
        Self::new(5, HOUR).with_prefix("register")
    }

    /// 登录：10 次/小时/IP
    pub fn login() -> Self {
        Self::new(10, HOUR).with_prefix("login")
    }

    /// 刷新令牌：30 次/分钟
    pub fn refresh_token() -> Self {
        Self::new(30, 60).with_prefix("refresh")
    }

    /// 重发验证邮件：3 次/小时/IP
    pub fn resend_verification() -> Self {
        Self::new(3, HOUR).with_prefix("resend_verification")
    }

    /// 联系表单：3 次/小时/IP
    pub fn contact() -> Self {
        Self::new(3, HOUR).with_prefix("contact")
    }

    /// 学员申请：2 次/天/用户
    pub fn application() -> Self {
        Self::new(2, DAY).with_prefix("application")
    }

    /// 文件上传：20 次/小时/用户
    pub fn file_upload() -> Self {
        Self::new(20, HOUR).with_prefix("upload")
    }
}

/// 计算当前窗口的计数键与距窗口结束的秒数
fn window_key(prefix: &str, identifier: &str, window_secs: u64, now_secs: u64) -> (String, u64) {
    let window_secs = window_secs.max(1);
    let bucket = now_secs / window_secs;
    let retry_after = window_secs - now_secs % window_secs;
    let key = if prefix.is_empty() {
        format!("{identifier}:{bucket}")
    } else {
        format!("{prefix}:{identifier}:{bucket}")
    };
    (key, retry_after)
}

/// 从请求中提取客户端 IP
///
/// 安全注意事项：
/// - 如果服务部署在反向代理后面，需要在反向代理中配置正确的 X-Forwarded-For / X-Real-IP 头
/// - 此实现会验证 IP 格式，防止伪造的无效头导致问题
/// - 在不可信网络中直接暴露服务时，攻击者可能伪造转发头来绕过限制
fn extract_client_ip(req: &ServiceRequest) -> String {
    // 尝试从连接信息获取真实 IP（最可信）
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    // 如果连接信息有有效 IP，优先使用
    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // 从 X-Forwarded-For 头获取（用于反向代理场景）
    // 只取第一个 IP（最接近客户端的）
    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    // 从 X-Real-IP 头获取
    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    // 如果都没有有效 IP，使用连接信息的默认值
    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

/// 验证 IP 地址格式是否有效
fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 从请求中提取用户 ID（如果已认证）
fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    use crate::models::users::entities::User;
    req.extensions().get::<User>().map(|user| user.id)
}

/// 创建速率限制错误响应
fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Request was throttled. Please try again later.",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_requests: self.max_requests,
            window_secs: self.window_secs,
            key_prefix: self.key_prefix.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_requests = self.max_requests;
        let window_secs = self.window_secs;
        let key_prefix = self.key_prefix.clone();

        Box::pin(async move {
            let identifier = extract_user_id(&req)
                .map(|id| format!("user:{id}"))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));
            let now_secs = chrono::Utc::now().timestamp().max(0) as u64;
            let (cache_key, retry_after) =
                window_key(&key_prefix, &identifier, window_secs, now_secs);

            // 原子自增，返回本次请求之后的计数
            let count = RATE_LIMIT_CACHE
                .entry(cache_key.clone())
                .and_upsert_with(|entry| {
                    let current = entry.map(|e| e.into_value()).unwrap_or(0);
                    std::future::ready(current.saturating_add(1))
                })
                .await
                .into_value();

            if count > max_requests {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, count, max_requests
                );
                return Ok(req
                    .into_response(create_rate_limit_response(retry_after).map_into_right_body()));
            }

            req.extensions_mut().insert(RateLimitInfo {
                remaining: max_requests - count,
                limit: max_requests,
                reset: retry_after,
            });

            // 继续处理请求
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

/// 速率限制信息（可在响应中添加）
#[derive(Clone)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let register = RateLimit::register();
        assert_eq!((register.max_requests, register.window_secs), (5, HOUR));
        assert_eq!(register.key_prefix, "register");

        let login = RateLimit::login();
        assert_eq!((login.max_requests, login.window_secs), (10, HOUR));

        let contact = RateLimit::contact();
        assert_eq!((contact.max_requests, contact.window_secs), (3, HOUR));

        let application = RateLimit::application();
        assert_eq!((application.max_requests, application.window_secs), (2, DAY));
    }

    #[test]
    fn test_window_key_changes_per_bucket() {
        let (first, retry) = window_key("login", "ip:10.0.0.1", 3600, 7200);
        assert_eq!(first, "login:ip:10.0.0.1:2");
        assert_eq!(retry, 3600);

        let (same, retry) = window_key("login", "ip:10.0.0.1", 3600, 10_799);
        assert_eq!(same, first);
        assert_eq!(retry, 1);

        let (next, _) = window_key("login", "ip:10.0.0.1", 3600, 10_800);
        assert_ne!(next, first);
    }

    #[actix_web::test]
    async fn test_blocks_after_limit() {
        use actix_web::{App, HttpResponse, test, web};

        let app = test::init_service(
            App::new().service(
                web::resource("/contact")
                    .wrap(RateLimit::new(2, HOUR).with_prefix("test_contact"))
                    .route(web::post().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/contact")
                .peer_addr("192.0.2.7:4000".parse().unwrap())
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::post()
            .uri("/contact")
            .peer_addr("192.0.2.7:4000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key("Retry-After"));
    }
}
