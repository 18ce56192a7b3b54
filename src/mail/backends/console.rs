use async_trait::async_trait;
use tracing::info;

use crate::declare_mailer_plugin;
use crate::errors::Result;
use crate::mail::{MailMessage, Mailer};

declare_mailer_plugin!("console", ConsoleMailer);

/// 开发环境使用：邮件内容直接写入日志
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> std::result::Result<Self, String> {
        Ok(Self)
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            to = %message.to.join(", "),
            reply_to = message.reply_to.as_deref().unwrap_or("-"),
            "[mail] {}\n{}",
            message.subject,
            message.body
        );
        Ok(())
    }
}
