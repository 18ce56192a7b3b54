//! 字符串枚举宏
//!
//! 数据库中枚举以字符串保存，API 中也以相同字符串序列化。

/// 定义一个与字符串双向映射的枚举
///
/// 自动生成：
/// - serde 序列化/反序列化（按给定字符串）
/// - `as_str()` / `Display` / `FromStr`
/// - `ALL` 常量，列出全部取值
#[macro_export]
macro_rules! define_string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $value:literal),* $(,)?
        }
    ) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::ts_rs::TS,
        )]
        $(#[$meta])*
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    define_string_enum! {
        Color {
            Red => "red",
            DarkBlue => "dark_blue",
        }
    }

    #[test]
    fn test_round_trip_through_str() {
        assert_eq!(Color::DarkBlue.as_str(), "dark_blue");
        assert_eq!("red".parse::<Color>(), Ok(Color::Red));
        assert!("green".parse::<Color>().is_err());
        assert_eq!(Color::ALL.len(), 2);
    }

    #[test]
    fn test_serde_uses_string_value() {
        let json = serde_json::to_string(&Color::DarkBlue).unwrap();
        assert_eq!(json, "\"dark_blue\"");
        let parsed: Color = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(parsed, Color::Red);
    }
}
