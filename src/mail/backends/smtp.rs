use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

use crate::config::{AppConfig, MailConfig};
use crate::declare_mailer_plugin;
use crate::errors::{EvolvError, Result};
use crate::mail::{MailMessage, Mailer};

declare_mailer_plugin!("smtp", SmtpMailer);

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    default_reply_to: Option<Mailbox>,
}

impl SmtpMailer {
    pub fn new() -> std::result::Result<Self, String> {
        Self::from_config(&AppConfig::get().mail)
    }

    pub fn from_config(config: &MailConfig) -> std::result::Result<Self, String> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        }
        .map_err(|e| format!("SMTP relay '{}' 配置错误: {e}", config.host))?;

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout)));
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| format!("发件人地址无效 '{}': {e}", config.from))?;
        let default_reply_to = match &config.reply_to {
            Some(addr) if !addr.is_empty() => Some(
                addr.parse::<Mailbox>()
                    .map_err(|e| format!("回复地址无效 '{addr}': {e}"))?,
            ),
            _ => None,
        };

        debug!("SMTP mailer configured for {}:{}", config.host, config.port);
        Ok(Self {
            transport: builder.build(),
            from,
            default_reply_to,
        })
    }

    fn build_message(&self, message: MailMessage) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(message.subject);

        for to in &message.to {
            let mailbox = to
                .parse::<Mailbox>()
                .map_err(|e| EvolvError::mail_delivery(format!("收件人地址无效 '{to}': {e}")))?;
            builder = builder.to(mailbox);
        }

        let reply_to = match message.reply_to {
            Some(addr) => Some(
                addr.parse::<Mailbox>()
                    .map_err(|e| EvolvError::mail_delivery(format!("回复地址无效 '{addr}': {e}")))?,
            ),
            None => self.default_reply_to.clone(),
        };
        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to);
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| EvolvError::mail_delivery(format!("构建邮件失败: {e}")))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        let email = self.build_message(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| EvolvError::mail_delivery(format!("SMTP 发送失败: {e}")))?;
        Ok(())
    }
}
