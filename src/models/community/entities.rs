use crate::models::common::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location_id: Option<i64>,
    pub course_id: Option<i64>,
    pub is_virtual: bool,
    /// 海报文件 token
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date >= now
    }
}

// 活动签到
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct EventAttendance {
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub attended: bool,
}

// 校友
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct Alumni {
    pub id: i64,
    pub user_id: i64,
    pub graduation_year: i32,
    pub current_position: String,
    pub success_story: String,
    pub course_id: Option<i64>,
    pub location_id: Option<i64>,
}

/// 毕业年份范围：1950 至次年
pub fn validate_graduation_year(year: i32, current_year: i32) -> Result<(), FieldErrors> {
    if (1950..=current_year + 1).contains(&year) {
        Ok(())
    } else {
        Err(FieldErrors::single(
            "graduation_year",
            format!(
                "Graduation year must be between 1950 and {}.",
                current_year + 1
            ),
        ))
    }
}

// 评价
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/community.ts")]
pub struct Review {
    pub id: i64,
    pub about_us_id: Option<i64>,
    pub name: String,
    pub review_text: String,
    pub course_id: Option<i64>,
    pub alumni_id: Option<i64>,
    /// 1-5 分
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

pub fn validate_rating(rating: i32) -> Result<(), FieldErrors> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(FieldErrors::single("rating", "Rating must be between 1 and 5."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graduation_year_bounds() {
        assert!(validate_graduation_year(1950, 2026).is_ok());
        assert!(validate_graduation_year(2027, 2026).is_ok());
        assert!(validate_graduation_year(1949, 2026).is_err());
        assert!(validate_graduation_year(2028, 2026).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_event_upcoming_includes_now() {
        let now = Utc::now();
        let event = Event {
            id: 1,
            title: "Demo day".to_string(),
            description: String::new(),
            date: now,
            location_id: None,
            course_id: None,
            is_virtual: true,
            image: None,
            created_at: now,
        };
        assert!(event.is_upcoming(now));
        assert!(!event.is_upcoming(now + chrono::TimeDelta::seconds(1)));
    }
}
