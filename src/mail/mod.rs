//! 事务邮件
//!
//! 发送后端与缓存一样以插件形式注册（`console` / `smtp`）。
//! 请求处理中的邮件一律后台发送，失败只记录日志。

pub mod backends;
pub mod register;
pub mod templates;

use actix_web::{HttpRequest, web};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;

/// 一封纯文本邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            body: body.into(),
            reply_to: None,
        }
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// 注册邮件后端插件
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_mailer_plugin {
    ($name:expr, $ty:ty) => {
        #[::ctor::ctor]
        fn __register_mailer_plugin() {
            $crate::mail::register::register_mailer_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    <$ty>::new()
                        .map(|mailer| {
                            ::std::sync::Arc::new(mailer)
                                as ::std::sync::Arc<dyn $crate::mail::Mailer>
                        })
                        .map_err($crate::errors::EvolvError::mail_delivery)
                }),
            );
        }
    };
}

/// 按配置创建邮件后端，失败时回退到 console
pub fn create_mailer() -> Result<Arc<dyn Mailer>> {
    let backend = &AppConfig::get().mail.backend;
    match register::get_mailer_plugin(backend) {
        Some(constructor) => match constructor() {
            Ok(mailer) => {
                info!("Mail backend initialized: {}", backend);
                return Ok(mailer);
            }
            Err(e) => warn!("Failed to create {} mail backend: {}", backend, e),
        },
        None => warn!("Mail backend '{}' not found in registry", backend),
    }

    let constructor = register::get_mailer_plugin("console").ok_or_else(|| {
        crate::errors::EvolvError::mail_plugin_not_found(format!(
            "No mail backend available (tried: {backend})"
        ))
    })?;
    warn!("Falling back to console mail backend");
    constructor()
}

/// 后台发送，不阻塞请求
pub fn send_in_background(mailer: Arc<dyn Mailer>, message: MailMessage) {
    tokio::spawn(async move {
        let subject = message.subject.clone();
        if let Err(e) = mailer.send(message).await {
            warn!("邮件发送失败 [{}]: {}", subject, e);
        } else {
            debug!("邮件已发送: {}", subject);
        }
    });
}

/// 从请求上下文取出邮件后端并后台发送
pub fn dispatch(req: &HttpRequest, message: MailMessage) {
    match req.app_data::<web::Data<Arc<dyn Mailer>>>() {
        Some(mailer) => send_in_background(mailer.get_ref().clone(), message),
        None => warn!("Mailer not configured, dropping mail: {}", message.subject),
    }
}
