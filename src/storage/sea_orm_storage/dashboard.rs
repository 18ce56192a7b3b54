//! 后台统计查询

use std::collections::{BTreeMap, HashMap};

use super::SeaOrmStorage;
use crate::entity::alumni::Entity as AlumniEntity;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::events::{Column as EventColumn, Entity as Events};
use crate::entity::reviews::{Column as ReviewColumn, Entity as Reviews};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::entity::student_selections::{Column as SelectionColumn, Entity as Selections};
use crate::entity::students::Entity as Students;
use crate::errors::{EvolvError, Result};
use crate::models::dashboard::responses::{
    AdminDashboardResponse, CourseStats, EventStats, ReviewStats, ScheduleStats, StudentStats,
};
use crate::models::students::entities::{EnrollmentStatus, SelectionStatus};
use crate::storage::DashboardStorage;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Select,
};

async fn count<E: EntityTrait>(db: &DatabaseConnection, select: Select<E>, what: &str) -> Result<i64>
where
    E::Model: Send + Sync,
{
    let n = select
        .count(db)
        .await
        .map_err(|e| EvolvError::database_operation(format!("统计{what}失败: {e}")))?;
    Ok(n as i64)
}

/// 按学员汇总选拔进度：(已通过, 未通过)
///
/// 没有任何步骤的学员计入未通过。
fn split_by_selection(total_students: i64, rows: &[(i64, String)]) -> (i64, i64) {
    let mut all_completed: HashMap<i64, bool> = HashMap::new();
    for (student_id, status) in rows {
        let completed = status == SelectionStatus::Completed.as_str();
        all_completed
            .entry(*student_id)
            .and_modify(|ok| *ok = *ok && completed)
            .or_insert(completed);
    }
    let approved = all_completed.values().filter(|ok| **ok).count() as i64;
    (approved, total_students - approved)
}

#[async_trait]
impl DashboardStorage for SeaOrmStorage {
    async fn dashboard_stats(&self, now: i64, today: NaiveDate) -> Result<AdminDashboardResponse> {
        let db = &self.db;

        let total_students = count(db, Students::find(), "学员").await?;
        let selection_rows: Vec<(i64, String)> = Selections::find()
            .select_only()
            .column(SelectionColumn::StudentId)
            .column(SelectionColumn::Status)
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计选拔进度失败: {e}")))?;
        let (approved, pending) = split_by_selection(total_students, &selection_rows);

        let total_courses = count(db, Courses::find(), "课程").await?;
        let subcourses = count(
            db,
            Courses::find().filter(CourseColumn::ParentId.is_not_null()),
            "子课程",
        )
        .await?;

        let total_events = count(db, Events::find(), "活动").await?;
        let upcoming = count(
            db,
            Events::find().filter(EventColumn::EventDate.gte(now)),
            "未来活动",
        )
        .await?;

        let total_schedules = count(db, Schedules::find(), "排期").await?;
        let active_schedules = count(
            db,
            Schedules::find().filter(ScheduleColumn::EndDate.gte(today)),
            "进行中排期",
        )
        .await?;

        let alumni = count(db, AlumniEntity::find(), "校友").await?;

        let ratings: Vec<i32> = Reviews::find()
            .select_only()
            .column(ReviewColumn::Rating)
            .into_tuple()
            .all(db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计评价失败: {e}")))?;
        let rating_sum: i64 = ratings.iter().map(|r| *r as i64).sum();

        let mut enrollments = BTreeMap::new();
        for status in EnrollmentStatus::ALL {
            let n = count(
                db,
                Enrollments::find().filter(EnrollmentColumn::Status.eq(status.as_str())),
                "报名",
            )
            .await?;
            enrollments.insert(status.to_string(), n);
        }

        Ok(AdminDashboardResponse {
            students: StudentStats {
                total: total_students,
                pending,
                approved,
            },
            courses: CourseStats {
                total: total_courses,
                active: total_courses - subcourses,
                subcourses,
            },
            events: EventStats {
                total: total_events,
                upcoming,
                past: total_events - upcoming,
            },
            schedules: ScheduleStats {
                total: total_schedules,
                active: active_schedules,
            },
            alumni,
            reviews: ReviewStats::from_sum(ratings.len() as i64, rating_sum),
            enrollments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::community::requests::CreateReviewRequest;
    use crate::models::students::requests::{
        CreateSelectionProcedureRequest, CreateStudentSelectionRequest,
    };
    use crate::storage::sea_orm_storage::fixtures::{new_application, seed_course, seed_user};
    use crate::storage::sea_orm_storage::learning::test_support::seed_schedule;
    use crate::storage::{CommunityStorage, StudentStorage};

    #[test]
    fn test_split_by_selection() {
        let rows = vec![
            (1, "completed".to_string()),
            (1, "completed".to_string()),
            (2, "completed".to_string()),
            (2, "pending".to_string()),
        ];
        // 学员 3 没有步骤
        assert_eq!(split_by_selection(3, &rows), (1, 2));
        assert_eq!(split_by_selection(0, &[]), (0, 0));
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let storage = SeaOrmStorage::in_memory().await;
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let stats = storage.dashboard_stats(0, today).await.unwrap();
        assert_eq!(stats.students.total, 0);
        assert_eq!(stats.reviews.average_rating, 0.0);
        assert_eq!(stats.enrollments.len(), EnrollmentStatus::ALL.len());
        assert_eq!(stats.enrollments["pending"], 0);
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;
        let course = seed_course(&storage, "Data").await;
        let ada = seed_user(&storage, "ada").await;
        let bo = seed_user(&storage, "bo").await;

        let first = storage
            .create_application(ada.id, new_application("ada@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        storage
            .create_application(
                bo.id,
                new_application("bo@example.com", vec![course.id, schedule.course_id]),
                2026,
            )
            .await
            .unwrap();

        let step = storage
            .create_selection_procedure(CreateSelectionProcedureRequest {
                step_name: "Interview".to_string(),
                description: None,
                order: 1,
            })
            .await
            .unwrap();
        storage
            .create_student_selection(CreateStudentSelectionRequest {
                student_id: first.id,
                step_id: step.id,
                status: SelectionStatus::Completed,
            })
            .await
            .unwrap();

        for rating in [5, 4, 4] {
            storage
                .create_review(
                    CreateReviewRequest {
                        name: "Anon".to_string(),
                        review_text: "Nice".to_string(),
                        course_id: None,
                        alumni_id: None,
                        rating,
                    },
                    None,
                )
                .await
                .unwrap();
        }

        // 排期 2026-03-01 至 2026-06-01
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let stats = storage.dashboard_stats(0, today).await.unwrap();

        assert_eq!(stats.students.total, 2);
        assert_eq!(stats.students.approved, 1);
        assert_eq!(stats.students.pending, 1);
        assert_eq!(stats.courses.total, 2);
        assert_eq!(stats.courses.active, 2);
        assert_eq!(stats.schedules.total, 1);
        assert_eq!(stats.schedules.active, 0);
        assert_eq!(stats.reviews.total, 3);
        assert_eq!(stats.reviews.average_rating, 4.33);
        assert_eq!(stats.enrollments["pending"], 3);
        assert_eq!(stats.enrollments["approved"], 0);
    }
}
