use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentStats {
    pub total: i64,
    /// 无选拔步骤或仍有待完成步骤的学员
    pub pending: i64,
    /// 所有步骤均已完成的学员
    pub approved: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct CourseStats {
    pub total: i64,
    /// 顶级课程
    pub active: i64,
    pub subcourses: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct EventStats {
    pub total: i64,
    pub upcoming: i64,
    pub past: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ScheduleStats {
    pub total: i64,
    /// 尚未结束的排期
    pub active: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ReviewStats {
    pub total: i64,
    pub average_rating: f64,
}

impl ReviewStats {
    /// 由评分总和计算平均分，保留两位小数
    pub fn from_sum(total: i64, rating_sum: i64) -> Self {
        let average_rating = if total == 0 {
            0.0
        } else {
            ((rating_sum as f64 / total as f64) * 100.0).round() / 100.0
        };
        Self {
            total,
            average_rating,
        }
    }
}

// 管理员仪表盘
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboardResponse {
    pub students: StudentStats,
    pub courses: CourseStats,
    pub events: EventStats,
    pub schedules: ScheduleStats,
    pub alumni: i64,
    pub reviews: ReviewStats,
    /// 报名状态 -> 数量
    pub enrollments: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_two_decimals() {
        let stats = ReviewStats::from_sum(3, 13);
        assert_eq!(stats.average_rating, 4.33);
        assert_eq!(ReviewStats::from_sum(0, 0).average_rating, 0.0);
    }
}
