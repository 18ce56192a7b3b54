use crate::models::common::FieldErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
    LocationType {
        Campus => "campus",
        Online => "online",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
    OnlineRegion {
        Nigeria => "nigeria",
        UnitedKingdom => "united_kingdom",
        Europe => "europe",
    }
}

crate::define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
    MaterialType {
        Video => "video",
        Document => "document",
        Spreadsheet => "spreadsheet",
        Archive => "archive",
        Other => "other",
    }
}

// 课程分类
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    /// CSS 颜色类名，例如 `bg-primary-gold`
    pub color: Option<String>,
    pub is_active: bool,
    pub order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 授课地点
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub location_type: LocationType,
    pub online_region: Option<OnlineRegion>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 线上地点必须指定区域，线下地点不得指定
pub fn validate_location_region(
    location_type: LocationType,
    online_region: Option<OnlineRegion>,
) -> Result<(), FieldErrors> {
    match (location_type, online_region) {
        (LocationType::Online, None) => Err(FieldErrors::single(
            "online_region",
            "Online region is required for online locations.",
        )),
        (LocationType::Campus, Some(_)) => Err(FieldErrors::single(
            "online_region",
            "Online region must be empty for campus locations.",
        )),
        _ => Ok(()),
    }
}

// 合作伙伴
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    /// 父课程 ID，存在时本课程为子课程
    pub parent_id: Option<i64>,
    pub description: Option<String>,
    pub software_tools: Option<String>,
    pub topics_covered: Option<String>,
    pub instructor_id: Option<i64>,
    pub registration_deadline: Option<NaiveDate>,
    pub selection_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub github: Option<String>,
    pub discord: Option<String>,
    /// 视频内容文件 token
    pub video_content: Option<String>,
    /// 补充资料文件 token
    pub additional_materials: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn timeline(&self) -> CourseTimeline {
        CourseTimeline {
            registration_deadline: self.registration_deadline,
            selection_date: self.selection_date,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn is_subcourse(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// 课程的四个关键日期
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseTimeline {
    pub registration_deadline: Option<NaiveDate>,
    pub selection_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CourseTimeline {
    /// 校验日期严格递增
    ///
    /// 只有两端都存在时才比较；同一字段有多个错误时保留最后一个。
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let (Some(reg), Some(sel)) = (self.registration_deadline, self.selection_date)
            && reg >= sel
        {
            errors.add(
                "selection_date",
                "Selection date must be after the registration deadline.",
            );
        }
        if let (Some(sel), Some(start)) = (self.selection_date, self.start_date)
            && sel >= start
        {
            errors.add("start_date", "Start date must be after the selection date.");
        }
        if let (Some(reg), Some(start)) = (self.registration_deadline, self.start_date)
            && reg >= start
        {
            errors.add(
                "start_date",
                "Start date must be after the registration deadline.",
            );
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start >= end
        {
            errors.add("end_date", "End date must be after the start date.");
        }

        errors.into_result()
    }
}

// 课程资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct CourseMaterial {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub material_type: MaterialType,
    pub file_token: String,
    pub file_size: i64,
    pub uploaded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_ordered_timeline_passes() {
        let timeline = CourseTimeline {
            registration_deadline: date(2026, 1, 10),
            selection_date: date(2026, 1, 20),
            start_date: date(2026, 2, 1),
            end_date: date(2026, 6, 30),
        };
        assert!(timeline.validate().is_ok());
    }

    #[test]
    fn test_missing_dates_are_not_compared() {
        let timeline = CourseTimeline {
            registration_deadline: date(2026, 5, 1),
            selection_date: None,
            start_date: None,
            end_date: date(2026, 1, 1),
        };
        assert!(timeline.validate().is_ok());
        assert!(CourseTimeline::default().validate().is_ok());
    }

    #[test]
    fn test_equal_dates_are_rejected() {
        let timeline = CourseTimeline {
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 1),
            ..Default::default()
        };
        let errors = timeline.validate().unwrap_err();
        assert!(errors.get("end_date").is_some());
    }

    #[test]
    fn test_errors_are_keyed_per_field() {
        let timeline = CourseTimeline {
            registration_deadline: date(2026, 3, 1),
            selection_date: date(2026, 2, 1),
            start_date: date(2026, 4, 1),
            end_date: None,
        };
        let errors = timeline.validate().unwrap_err();
        assert!(errors.get("selection_date").is_some());
        assert!(errors.get("start_date").is_none());
    }

    #[test]
    fn test_last_start_date_error_wins() {
        // 选拔日期缺失时，报名截止晚于开课只命中第三条规则
        let timeline = CourseTimeline {
            registration_deadline: date(2026, 5, 1),
            selection_date: None,
            start_date: date(2026, 4, 1),
            end_date: None,
        };
        let errors = timeline.validate().unwrap_err();
        assert_eq!(
            errors.get("start_date"),
            Some("Start date must be after the registration deadline.")
        );
    }

    #[test]
    fn test_location_region_rules() {
        assert!(validate_location_region(LocationType::Online, Some(OnlineRegion::Europe)).is_ok());
        assert!(validate_location_region(LocationType::Campus, None).is_ok());
        assert!(validate_location_region(LocationType::Online, None).is_err());
        assert!(validate_location_region(LocationType::Campus, Some(OnlineRegion::Nigeria)).is_err());
    }
}
