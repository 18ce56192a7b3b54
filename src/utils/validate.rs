use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("Invalid url regex"));

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 3 <= 长度 <= 30
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        return Err("Username length must be between 3 and 30 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), &'static str> {
    if !URL_RE.is_match(url) {
        return Err("Enter a valid URL.");
    }
    Ok(())
}

/// 邮箱统一小写存储，比较时大小写不敏感
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 至少 8 个字符，且同时包含大写字母、小写字母和数字，不能是常见弱密码。
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "abcd1234",
        "evolvlearn1",
        "welcome123",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ada.lovelace").is_ok());
        assert!(validate_username("bo").is_err());
        assert!(validate_username(&"x".repeat(31)).is_err());
        assert!(validate_username("ada lovelace").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("ada@evolvlearn.org").is_ok());
        assert!(validate_email("ada.lovelace+news@mail.co.uk").is_ok());
        assert!(validate_email("ada@localhost").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_url_rules() {
        assert!(validate_url("https://github.com/evolvlearn").is_ok());
        assert!(validate_url("discord.gg/abc").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecurePass123").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
    }

    #[test]
    fn test_password_policy_failures() {
        let result = validate_password("Ab1");
        assert!(result.errors.contains(&"Password must be at least 8 characters long"));

        let result = validate_password("abcd1234");
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );

        let result = validate_password("AbcdEfgh");
        assert!(result.errors.contains(&"Password must contain at least one digit"));
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Welcome123");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
