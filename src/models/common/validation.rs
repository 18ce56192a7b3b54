use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// 字段级校验错误：字段名 -> 错误信息
///
/// 作为 400 响应的 `data` 返回。同一字段多次写入时保留最后一次。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构造只含单个字段错误的集合
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// 区分“未提供”与“显式置空”的可空字段
///
/// 配合 `#[serde(default, deserialize_with = "deserialize_some")]` 使用：
/// 字段缺失得到 `None`，`null` 得到 `Some(None)`。
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// 必填文本字段非空校验
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "This field may not be blank.");
    }
}

/// 文本长度上限校验
pub fn max_length(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("Ensure this field has no more than {max} characters."),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_message_wins() {
        let mut errors = FieldErrors::new();
        errors.add("start_date", "first");
        errors.add("start_date", "second");
        assert_eq!(errors.get("start_date"), Some("second"));
        assert!(errors.into_result().is_err());
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        parent_id: Option<Option<i64>>,
    }

    #[test]
    fn test_deserialize_some_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.parent_id, None);
        let cleared: Patch = serde_json::from_str(r#"{"parent_id":null}"#).unwrap();
        assert_eq!(cleared.parent_id, Some(None));
        let set: Patch = serde_json::from_str(r#"{"parent_id":4}"#).unwrap();
        assert_eq!(set.parent_id, Some(Some(4)));
    }

    #[test]
    fn test_text_helpers() {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", "   ");
        max_length(&mut errors, "color", &"x".repeat(51), 50);
        assert!(errors.get("name").is_some());
        assert!(errors.get("color").is_some());
    }

    #[test]
    fn test_empty_is_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let errors = FieldErrors::single("email", "Email format is invalid");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["email"], "Email format is invalid");
    }
}
