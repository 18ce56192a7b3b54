use crate::models::common::FieldErrors;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学习排期：课程在某地点的一次具体开课
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct Schedule {
    pub id: i64,
    pub course_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor_id: Option<i64>,
    pub location_id: i64,
    pub duration_months: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 排期下的教学模块
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct Module {
    pub id: i64,
    pub schedule_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub order: i32,
}

// 模块下的课时
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/learning.ts")]
pub struct Lesson {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub resources_url: Option<String>,
    pub order: i32,
}

/// 待校验的排期时间段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub course_id: i64,
    pub location_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScheduleSlot {
    /// 闭区间相交判断，同一课程同一地点才算冲突
    pub fn overlaps(&self, other: &Schedule) -> bool {
        self.course_id == other.course_id
            && self.location_id == other.location_id
            && self.start_date <= other.end_date
            && other.start_date <= self.end_date
    }

    /// 在已有排期中查找第一个冲突项，`exclude_id` 为更新时的自身
    pub fn find_conflict<'a>(
        &self,
        existing: &'a [Schedule],
        exclude_id: Option<i64>,
    ) -> Option<&'a Schedule> {
        existing
            .iter()
            .filter(|s| Some(s.id) != exclude_id)
            .find(|s| self.overlaps(s))
    }

    /// 日期顺序与冲突校验
    pub fn validate(&self, existing: &[Schedule], exclude_id: Option<i64>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.start_date >= self.end_date {
            errors.add("end_date", "End date must be after start date.");
        }
        if let Some(conflict) = self.find_conflict(existing, exclude_id) {
            errors.add(
                "start_date",
                format!(
                    "Schedule overlaps with an existing schedule ({} to {}) for this course and location.",
                    conflict.start_date, conflict.end_date
                ),
            );
        }
        errors.into_result()
    }
}

/// 两个日期之间的整月数（日历差）
///
/// 年差 * 12 + 月差，若结束日的日号小于开始日则再减一。
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn schedule(id: i64, course_id: i64, location_id: i64, start: NaiveDate, end: NaiveDate) -> Schedule {
        Schedule {
            id,
            course_id,
            start_date: start,
            end_date: end,
            instructor_id: None,
            location_id,
            duration_months: months_between(start, end),
            created_at: chrono::Utc::now(),
        }
    }

    fn slot(start: NaiveDate, end: NaiveDate) -> ScheduleSlot {
        ScheduleSlot {
            course_id: 1,
            location_id: 1,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_touching_ranges_conflict() {
        let existing = vec![schedule(1, 1, 1, d(2026, 1, 1), d(2026, 3, 31))];
        let candidate = slot(d(2026, 3, 31), d(2026, 6, 30));
        assert!(candidate.find_conflict(&existing, None).is_some());
    }

    #[test]
    fn test_disjoint_ranges_pass() {
        let existing = vec![schedule(1, 1, 1, d(2026, 1, 1), d(2026, 3, 31))];
        let candidate = slot(d(2026, 4, 1), d(2026, 6, 30));
        assert!(candidate.validate(&existing, None).is_ok());
    }

    #[test]
    fn test_other_course_or_location_ignored() {
        let existing = vec![
            schedule(1, 2, 1, d(2026, 1, 1), d(2026, 12, 31)),
            schedule(2, 1, 2, d(2026, 1, 1), d(2026, 12, 31)),
        ];
        let candidate = slot(d(2026, 2, 1), d(2026, 5, 1));
        assert!(candidate.find_conflict(&existing, None).is_none());
    }

    #[test]
    fn test_update_excludes_self() {
        let existing = vec![schedule(7, 1, 1, d(2026, 1, 1), d(2026, 3, 31))];
        let candidate = slot(d(2026, 1, 15), d(2026, 4, 15));
        assert!(candidate.validate(&existing, Some(7)).is_ok());
        assert!(candidate.validate(&existing, Some(8)).is_err());
    }

    #[test]
    fn test_errors_keyed_by_field() {
        let existing = vec![schedule(1, 1, 1, d(2026, 1, 1), d(2026, 3, 31))];
        let errors = slot(d(2026, 2, 1), d(2026, 1, 1))
            .validate(&existing, None)
            .unwrap_err();
        assert!(errors.get("end_date").is_some());
        assert!(errors.get("start_date").is_some());
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(d(2026, 1, 15), d(2026, 4, 15)), 3);
        assert_eq!(months_between(d(2026, 1, 15), d(2026, 4, 14)), 2);
        assert_eq!(months_between(d(2025, 11, 1), d(2026, 2, 1)), 3);
        assert_eq!(months_between(d(2026, 1, 31), d(2026, 2, 28)), 0);
    }
}
