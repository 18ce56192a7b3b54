//! 随机令牌与密码生成

use rand::Rng;
use rand::distr::Alphanumeric;

/// 邮箱验证令牌长度
pub const VERIFICATION_TOKEN_LEN: usize = 48;

/// 生成指定长度的字母数字随机串
pub fn generate_random_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// 生成邮箱验证令牌（URL 安全）
pub fn generate_verification_token() -> String {
    generate_random_code(VERIFICATION_TOKEN_LEN)
}

/// 生成满足密码策略的临时密码（含大小写字母与数字）
pub fn generate_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    let mut password: Vec<char> = vec![
        rng.random_range(b'A'..=b'Z') as char,
        rng.random_range(b'a'..=b'z') as char,
        rng.random_range(b'0'..=b'9') as char,
    ];
    password.extend(generate_random_code(len - password.len()).chars());
    // 打乱前三位固定字符的位置
    for i in (1..password.len()).rev() {
        let j = rng.random_range(0..=i);
        password.swap(i, j);
    }
    password.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_token_shape() {
        let token = generate_verification_token();
        assert_eq!(token.len(), VERIFICATION_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_verification_token());
    }

    #[test]
    fn test_generated_password_passes_policy() {
        for _ in 0..20 {
            let password = generate_password(16);
            assert_eq!(password.len(), 16);
            assert!(crate::utils::validate::validate_password(&password).is_valid);
        }
    }
}
