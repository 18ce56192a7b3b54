//! SQL 辅助函数

use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符（`\`、`%`、`_`）
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造“包含”匹配的 LIKE 表达式，显式声明转义字符
pub fn contains_pattern(search: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(search.trim()))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like_pattern(r"a\b"), r"a\\b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
