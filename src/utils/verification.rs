//! 邮箱验证令牌有效期判断

use chrono::{DateTime, TimeDelta, Utc};

/// 令牌检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    Valid,
    Expired,
}

/// 判断令牌是否仍在有效期内
///
/// 签发时间缺失视为过期；恰好到期的那一秒仍然有效。
pub fn check_token_age(
    sent_at: Option<DateTime<Utc>>,
    ttl: TimeDelta,
    now: DateTime<Utc>,
) -> TokenCheck {
    match sent_at {
        Some(sent_at) if now - sent_at <= ttl => TokenCheck::Valid,
        _ => TokenCheck::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_window() {
        let now = Utc::now();
        let sent = now - TimeDelta::hours(23);
        assert_eq!(check_token_age(Some(sent), TimeDelta::hours(24), now), TokenCheck::Valid);
    }

    #[test]
    fn test_boundary_is_valid() {
        let now = Utc::now();
        let sent = now - TimeDelta::hours(24);
        assert_eq!(check_token_age(Some(sent), TimeDelta::hours(24), now), TokenCheck::Valid);
    }

    #[test]
    fn test_expired_after_window() {
        let now = Utc::now();
        let sent = now - TimeDelta::hours(24) - TimeDelta::seconds(1);
        assert_eq!(check_token_age(Some(sent), TimeDelta::hours(24), now), TokenCheck::Expired);
    }

    #[test]
    fn test_missing_sent_at_is_expired() {
        assert_eq!(
            check_token_age(None, TimeDelta::hours(24), Utc::now()),
            TokenCheck::Expired
        );
    }
}
