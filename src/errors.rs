//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_evolv_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EvolvError {
            $($variant(String),)*
        }

        impl EvolvError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EvolvError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EvolvError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EvolvError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl EvolvError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EvolvError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_evolv_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    MailDelivery("E014", "Mail Delivery Error"),
    MailPluginNotFound("E015", "Mail Plugin Not Found"),
}

impl EvolvError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, EvolvError::Conflict(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EvolvError::NotFound(_))
    }
}

impl fmt::Display for EvolvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EvolvError {}

// 唯一约束冲突单独归类，便于服务层返回 409
impl From<sea_orm::DbErr> for EvolvError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => EvolvError::Conflict(msg),
            _ => EvolvError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for EvolvError {
    fn from(err: std::io::Error) -> Self {
        EvolvError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EvolvError {
    fn from(err: serde_json::Error) -> Self {
        EvolvError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EvolvError {
    fn from(err: chrono::ParseError) -> Self {
        EvolvError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EvolvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EvolvError::cache_connection("test").code(), "E001");
        assert_eq!(EvolvError::database_config("test").code(), "E003");
        assert_eq!(EvolvError::validation("test").code(), "E007");
        assert_eq!(EvolvError::conflict("test").code(), "E010");
        assert_eq!(EvolvError::mail_delivery("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EvolvError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            EvolvError::mail_plugin_not_found("smtp").error_type(),
            "Mail Plugin Not Found"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = EvolvError::validation("english_level out of range");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("english_level"));
    }

    #[test]
    fn test_db_error_maps_to_operation() {
        let err: EvolvError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert!(!err.is_conflict());
    }
}
