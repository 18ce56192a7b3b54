//! 活动、签到、校友、评价存储操作

use super::{SeaOrmStorage, db_err, paginate_select, unique_ids};
use crate::entity::alumni::{
    ActiveModel as AlumniActiveModel, Column as AlumniColumn, Entity as AlumniEntity,
};
use crate::entity::event_attendance::{
    ActiveModel as AttendanceActiveModel, Column as AttendanceColumn, Entity as Attendance,
};
use crate::entity::event_partners::{
    ActiveModel as EventPartnerActiveModel, Column as EventPartnerColumn, Entity as EventPartners,
};
use crate::entity::events::{ActiveModel as EventActiveModel, Column as EventColumn, Entity as Events};
use crate::entity::locations::Entity as Locations;
use crate::entity::partners::{Column as PartnerColumn, Entity as Partners};
use crate::entity::profiles::{Column as ProfileColumn, Entity as Profiles};
use crate::entity::reviews::{
    ActiveModel as ReviewActiveModel, Column as ReviewColumn, Entity as Reviews,
};
use crate::entity::users::Entity as Users;
use crate::errors::{EvolvError, Result};
use crate::models::community::{
    entities::{Alumni, Event, EventAttendance, Review},
    requests::{
        AlumniListQuery, AttendanceListQuery, CreateAlumniRequest, CreateAttendanceRequest,
        CreateEventRequest, CreateReviewRequest, EventListQuery, ReviewListQuery,
        UpdateAlumniRequest, UpdateEventRequest, UpdateReviewRequest,
    },
    responses::{
        AlumniDetail, AlumniListResponse, AttendanceListResponse, EventDetail, EventListResponse,
        ReviewListResponse,
    },
};
use crate::models::users::entities::ProfileRole;
use crate::storage::CommunityStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 整体替换活动的合作伙伴关联
async fn replace_event_partners(
    txn: &DatabaseTransaction,
    event_id: i64,
    partner_ids: &[i64],
) -> Result<()> {
    EventPartners::delete_many()
        .filter(EventPartnerColumn::EventId.eq(event_id))
        .exec(txn)
        .await
        .map_err(db_err("清除活动合作伙伴失败"))?;

    for partner_id in unique_ids(partner_ids) {
        EventPartnerActiveModel {
            event_id: Set(event_id),
            partner_id: Set(partner_id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(db_err("写入活动合作伙伴失败"))?;
    }
    Ok(())
}

#[async_trait]
impl CommunityStorage for SeaOrmStorage {
    async fn create_event(&self, req: CreateEventRequest) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let event = EventActiveModel {
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            event_date: Set(req.date.timestamp()),
            location_id: Set(req.location_id),
            course_id: Set(req.course_id),
            is_virtual: Set(req.is_virtual),
            image: Set(req.image),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建活动失败"))?;

        replace_event_partners(&txn, event.id, &req.partner_ids).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(event.into_event())
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    async fn get_event_detail(&self, id: i64) -> Result<Option<EventDetail>> {
        let Some(event) = self.get_event_by_id(id).await? else {
            return Ok(None);
        };

        let location = match event.location_id {
            Some(location_id) => Locations::find_by_id(location_id)
                .one(&self.db)
                .await
                .map_err(|e| EvolvError::database_operation(format!("查询地点失败: {e}")))?
                .map(|m| m.into_location()),
            None => None,
        };

        let partner_ids: Vec<i64> = EventPartners::find()
            .filter(EventPartnerColumn::EventId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询活动合作伙伴失败: {e}")))?
            .into_iter()
            .map(|link| link.partner_id)
            .collect();

        let partners = Partners::find()
            .filter(PartnerColumn::Id.is_in(partner_ids))
            .order_by_asc(PartnerColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询活动合作伙伴失败: {e}")))?
            .into_iter()
            .map(|m| m.into_partner())
            .collect();

        Ok(Some(EventDetail {
            event,
            location,
            partners,
        }))
    }

    /// 分页列出活动；upcoming 为真时按时间升序，否则降序
    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
        now: i64,
    ) -> Result<EventListResponse> {
        let mut select = Events::find();

        match query.upcoming {
            Some(true) => select = select.filter(EventColumn::EventDate.gte(now)),
            Some(false) => select = select.filter(EventColumn::EventDate.lt(now)),
            None => {}
        }

        if let Some(course_id) = query.course {
            select = select.filter(EventColumn::CourseId.eq(course_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(EventColumn::Title.like(pattern.clone()))
                    .add(EventColumn::Description.like(pattern)),
            );
        }

        select = if query.upcoming == Some(true) {
            select.order_by_asc(EventColumn::EventDate)
        } else {
            select.order_by_desc(EventColumn::EventDate)
        };

        paginate_select(&self.db, select, &query.pagination, "活动", |m| {
            m.into_event()
        })
        .await
    }

    async fn list_upcoming_events_for_courses(
        &self,
        course_ids: &[i64],
        now: i64,
        limit: Option<u64>,
    ) -> Result<Vec<Event>> {
        let mut select = Events::find()
            .filter(EventColumn::EventDate.gte(now))
            .filter(
                Condition::any()
                    .add(EventColumn::CourseId.is_in(unique_ids(course_ids)))
                    .add(EventColumn::CourseId.is_null()),
            )
            .order_by_asc(EventColumn::EventDate);

        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询未来活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_event()).collect())
    }

    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>> {
        if self.get_event_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = EventActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(date) = update.date {
            model.event_date = Set(date.timestamp());
        }
        if let Some(location_id) = update.location_id {
            model.location_id = Set(location_id);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(is_virtual) = update.is_virtual {
            model.is_virtual = Set(is_virtual);
        }
        if let Some(image) = update.image {
            model.image = Set(image);
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let updated = model.update(&txn).await.map_err(db_err("更新活动失败"))?;

        if let Some(ref partner_ids) = update.partner_ids {
            replace_event_partners(&txn, id, partner_ids).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(Some(updated.into_event()))
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除活动失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<EventAttendance> {
        let result = AttendanceActiveModel {
            event_id: Set(req.event_id),
            student_id: Set(req.student_id),
            attended: Set(req.attended),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建签到记录失败"))?;

        Ok(result.into_attendance())
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<EventAttendance>> {
        let result = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询签到记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let mut select = Attendance::find();

        if let Some(event_id) = query.event {
            select = select.filter(AttendanceColumn::EventId.eq(event_id));
        }
        if let Some(student_id) = query.student {
            select = select.filter(AttendanceColumn::StudentId.eq(student_id));
        }

        select = select.order_by_desc(AttendanceColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "签到记录", |m| {
            m.into_attendance()
        })
        .await
    }

    async fn update_attendance(
        &self,
        id: i64,
        attended: bool,
    ) -> Result<Option<EventAttendance>> {
        if self.get_attendance_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let updated = AttendanceActiveModel {
            id: Set(id),
            attended: Set(attended),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("更新签到记录失败"))?;

        Ok(Some(updated.into_attendance()))
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        let result = Attendance::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除签到记录失败"))?;

        Ok(result.rows_affected > 0)
    }

    /// 创建校友记录，并把用户资料角色改为 alumni
    async fn create_alumni(&self, req: CreateAlumniRequest) -> Result<Alumni> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let alumni = AlumniActiveModel {
            user_id: Set(req.user_id),
            graduation_year: Set(req.graduation_year),
            current_position: Set(req.current_position),
            success_story: Set(req.success_story),
            course_id: Set(req.course_id),
            location_id: Set(req.location_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建校友记录失败"))?;

        Profiles::update_many()
            .col_expr(ProfileColumn::Role, Expr::value(ProfileRole::Alumni.to_string()))
            .col_expr(ProfileColumn::UpdatedAt, Expr::value(now))
            .filter(ProfileColumn::UserId.eq(req.user_id))
            .exec(&txn)
            .await
            .map_err(db_err("更新资料角色失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(alumni.into_alumni())
    }

    async fn get_alumni_by_id(&self, id: i64) -> Result<Option<Alumni>> {
        let result = AlumniEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询校友失败: {e}")))?;

        Ok(result.map(|m| m.into_alumni()))
    }

    async fn get_alumni_detail(&self, id: i64) -> Result<Option<AlumniDetail>> {
        let result = AlumniEntity::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询校友失败: {e}")))?;

        Ok(result.map(|(alumni, user)| {
            let (username, first_name, last_name) = user
                .map(|u| (u.username, u.first_name, u.last_name))
                .unwrap_or_default();
            AlumniDetail {
                alumni: alumni.into_alumni(),
                username,
                first_name,
                last_name,
            }
        }))
    }

    async fn list_alumni_with_pagination(
        &self,
        query: AlumniListQuery,
    ) -> Result<AlumniListResponse> {
        let mut select = AlumniEntity::find();

        if let Some(course_id) = query.course {
            select = select.filter(AlumniColumn::CourseId.eq(course_id));
        }
        if let Some(year) = query.graduation_year {
            select = select.filter(AlumniColumn::GraduationYear.eq(year));
        }

        select = select
            .order_by_desc(AlumniColumn::GraduationYear)
            .order_by_asc(AlumniColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "校友", |m| {
            m.into_alumni()
        })
        .await
    }

    async fn update_alumni(&self, id: i64, update: UpdateAlumniRequest) -> Result<Option<Alumni>> {
        if self.get_alumni_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = AlumniActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(graduation_year) = update.graduation_year {
            model.graduation_year = Set(graduation_year);
        }
        if let Some(current_position) = update.current_position {
            model.current_position = Set(current_position);
        }
        if let Some(success_story) = update.success_story {
            model.success_story = Set(success_story);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(location_id) = update.location_id {
            model.location_id = Set(location_id);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新校友记录失败"))?;

        Ok(Some(updated.into_alumni()))
    }

    async fn delete_alumni(&self, id: i64) -> Result<bool> {
        let result = AlumniEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除校友记录失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_review(
        &self,
        req: CreateReviewRequest,
        about_us_id: Option<i64>,
    ) -> Result<Review> {
        let now = chrono::Utc::now().timestamp();

        let result = ReviewActiveModel {
            about_us_id: Set(about_us_id),
            name: Set(req.name.trim().to_string()),
            review_text: Set(req.review_text),
            course_id: Set(req.course_id),
            alumni_id: Set(req.alumni_id),
            rating: Set(req.rating),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建评价失败"))?;

        Ok(result.into_review())
    }

    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>> {
        let result = Reviews::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_review()))
    }

    async fn list_reviews_with_pagination(
        &self,
        query: ReviewListQuery,
    ) -> Result<ReviewListResponse> {
        let mut select = Reviews::find();

        if let Some(course_id) = query.course {
            select = select.filter(ReviewColumn::CourseId.eq(course_id));
        }
        if let Some(alumni_id) = query.alumni {
            select = select.filter(ReviewColumn::AlumniId.eq(alumni_id));
        }

        select = select
            .order_by_desc(ReviewColumn::CreatedAt)
            .order_by_desc(ReviewColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "评价", |m| {
            m.into_review()
        })
        .await
    }

    async fn update_review(&self, id: i64, update: UpdateReviewRequest) -> Result<Option<Review>> {
        if self.get_review_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ReviewActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(review_text) = update.review_text {
            model.review_text = Set(review_text);
        }
        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }
        if let Some(alumni_id) = update.alumni_id {
            model.alumni_id = Set(alumni_id);
        }
        if let Some(rating) = update.rating {
            model.rating = Set(rating);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新评价失败"))?;

        Ok(Some(updated.into_review()))
    }

    async fn delete_review(&self, id: i64) -> Result<bool> {
        let result = Reviews::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除评价失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::requests::CreatePartnerRequest;
    use crate::storage::sea_orm_storage::fixtures::{seed_course, seed_location, seed_user};
    use crate::storage::{CatalogStorage, UserStorage};
    use chrono::{DateTime, TimeDelta, Utc};

    fn event(title: &str, date: DateTime<Utc>, course_id: Option<i64>) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            description: "Meetup".to_string(),
            date,
            location_id: None,
            course_id,
            is_virtual: true,
            image: None,
            partner_ids: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_upcoming_filter_and_course_scope() {
        let storage = SeaOrmStorage::in_memory().await;
        let cloud = seed_course(&storage, "Cloud").await;
        let data = seed_course(&storage, "Data").await;
        let now = Utc::now();

        storage
            .create_event(event("Past", now - TimeDelta::days(3), None))
            .await
            .unwrap();
        storage
            .create_event(event("Cloud demo", now + TimeDelta::days(2), Some(cloud.id)))
            .await
            .unwrap();
        storage
            .create_event(event("Data demo", now + TimeDelta::days(1), Some(data.id)))
            .await
            .unwrap();
        storage
            .create_event(event("Open house", now + TimeDelta::days(5), None))
            .await
            .unwrap();

        let upcoming = storage
            .list_events_with_pagination(
                EventListQuery {
                    upcoming: Some(true),
                    ..Default::default()
                },
                now.timestamp(),
            )
            .await
            .unwrap();
        assert_eq!(upcoming.pagination.total, 3);
        assert_eq!(upcoming.items[0].title, "Data demo");

        let past = storage
            .list_events_with_pagination(
                EventListQuery {
                    upcoming: Some(false),
                    ..Default::default()
                },
                now.timestamp(),
            )
            .await
            .unwrap();
        assert_eq!(past.pagination.total, 1);

        let mine = storage
            .list_upcoming_events_for_courses(&[cloud.id], now.timestamp(), None)
            .await
            .unwrap();
        let titles: Vec<_> = mine.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Cloud demo", "Open house"]);

        let limited = storage
            .list_upcoming_events_for_courses(&[cloud.id, data.id], now.timestamp(), Some(2))
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_event_detail_with_partners() {
        let storage = SeaOrmStorage::in_memory().await;
        let location = seed_location(&storage, "Lagos Campus").await;
        let partner = storage
            .create_partner(CreatePartnerRequest {
                name: "Acme".to_string(),
                description: None,
                website: None,
                contact_email: None,
            })
            .await
            .unwrap();

        let mut request = event("Hack night", Utc::now(), None);
        request.location_id = Some(location.id);
        request.partner_ids = vec![partner.id, partner.id];
        let created = storage.create_event(request).await.unwrap();

        let detail = storage.get_event_detail(created.id).await.unwrap().unwrap();
        assert_eq!(detail.partners.len(), 1);
        assert_eq!(detail.location.unwrap().id, location.id);

        storage
            .update_event(
                created.id,
                UpdateEventRequest {
                    partner_ids: Some(Vec::new()),
                    location_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let detail = storage.get_event_detail(created.id).await.unwrap().unwrap();
        assert!(detail.partners.is_empty());
        assert!(detail.location.is_none());
    }

    #[tokio::test]
    async fn test_create_alumni_sets_profile_role() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = seed_user(&storage, "ada").await;

        let alumni = storage
            .create_alumni(CreateAlumniRequest {
                user_id: user.id,
                graduation_year: 2025,
                current_position: "Data engineer".to_string(),
                success_story: "Landed a job".to_string(),
                course_id: None,
                location_id: None,
            })
            .await
            .unwrap();

        let profile = storage.get_profile_by_user_id(user.id).await.unwrap().unwrap();
        assert_eq!(profile.role, ProfileRole::Alumni);

        let detail = storage.get_alumni_detail(alumni.id).await.unwrap().unwrap();
        assert_eq!(detail.username, "ada");

        let duplicate = storage
            .create_alumni(CreateAlumniRequest {
                user_id: user.id,
                graduation_year: 2024,
                current_position: "Analyst".to_string(),
                success_story: "Again".to_string(),
                course_id: None,
                location_id: None,
            })
            .await;
        assert!(duplicate.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_review_crud() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Cloud").await;

        let review = storage
            .create_review(
                CreateReviewRequest {
                    name: "Tolu".to_string(),
                    review_text: "Great course".to_string(),
                    course_id: Some(course.id),
                    alumni_id: None,
                    rating: 5,
                },
                None,
            )
            .await
            .unwrap();

        let updated = storage
            .update_review(
                review.id,
                UpdateReviewRequest {
                    rating: Some(4),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.rating, 4);
        assert_eq!(updated.review_text, "Great course");

        let by_course = storage
            .list_reviews_with_pagination(ReviewListQuery {
                course: Some(course.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_course.pagination.total, 1);

        assert!(storage.delete_review(review.id).await.unwrap());
        assert!(!storage.delete_review(review.id).await.unwrap());
    }
}
