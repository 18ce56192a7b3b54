//! 排期、模块、课时存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err, paginate_select};
use crate::entity::courses::Entity as Courses;
use crate::entity::lessons::{
    ActiveModel as LessonActiveModel, Column as LessonColumn, Entity as Lessons,
};
use crate::entity::locations::Entity as Locations;
use crate::entity::modules::{
    ActiveModel as ModuleActiveModel, Column as ModuleColumn, Entity as Modules,
};
use crate::entity::schedules::{
    ActiveModel as ScheduleActiveModel, Column as ScheduleColumn, Entity as Schedules,
};
use crate::errors::{EvolvError, Result};
use crate::models::learning::{
    entities::{Lesson, Module, Schedule},
    requests::{
        CreateLessonRequest, CreateModuleRequest, CreateScheduleRequest, LessonListQuery,
        ModuleListQuery, ScheduleListQuery, UpdateLessonRequest, UpdateModuleRequest,
        UpdateScheduleRequest,
    },
    responses::{
        LessonListResponse, ModuleListResponse, ModuleWithLessons, ScheduleDetail,
        ScheduleListResponse,
    },
};
use crate::storage::LearningStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

#[async_trait]
impl LearningStorage for SeaOrmStorage {
    async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
        duration_months: i32,
    ) -> Result<Schedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ScheduleActiveModel {
            course_id: Set(req.course_id),
            location_id: Set(req.location_id),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            instructor_id: Set(req.instructor_id),
            duration_months: Set(duration_months),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建排期失败"))?;

        Ok(result.into_schedule())
    }

    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询排期失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 排期详情：课程名、地点、按顺序排列的模块及课时
    async fn get_schedule_detail(&self, id: i64) -> Result<Option<ScheduleDetail>> {
        let Some(schedule) = self.get_schedule_by_id(id).await? else {
            return Ok(None);
        };

        let course_name = Courses::find_by_id(schedule.course_id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程失败: {e}")))?
            .map(|c| c.name)
            .unwrap_or_default();

        let location = Locations::find_by_id(schedule.location_id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询地点失败: {e}")))?
            .map(|m| m.into_location());

        let modules: Vec<Module> = Modules::find()
            .filter(ModuleColumn::ScheduleId.eq(id))
            .order_by_asc(ModuleColumn::SortOrder)
            .order_by_asc(ModuleColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询模块失败: {e}")))?
            .into_iter()
            .map(|m| m.into_module())
            .collect();

        let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();
        let mut lessons_by_module: HashMap<i64, Vec<Lesson>> = HashMap::new();
        for lesson in Lessons::find()
            .filter(LessonColumn::ModuleId.is_in(module_ids))
            .order_by_asc(LessonColumn::SortOrder)
            .order_by_asc(LessonColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课时失败: {e}")))?
        {
            lessons_by_module
                .entry(lesson.module_id)
                .or_default()
                .push(lesson.into_lesson());
        }

        let modules = modules
            .into_iter()
            .map(|module| {
                let lessons = lessons_by_module.remove(&module.id).unwrap_or_default();
                ModuleWithLessons { module, lessons }
            })
            .collect();

        Ok(Some(ScheduleDetail {
            schedule,
            course_name,
            location,
            modules,
        }))
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse> {
        let mut select = Schedules::find();

        if let Some(course_id) = query.course {
            select = select.filter(ScheduleColumn::CourseId.eq(course_id));
        }
        if let Some(location_id) = query.location {
            select = select.filter(ScheduleColumn::LocationId.eq(location_id));
        }
        if let Some(instructor_id) = query.instructor {
            select = select.filter(ScheduleColumn::InstructorId.eq(instructor_id));
        }

        select = select
            .order_by_asc(ScheduleColumn::StartDate)
            .order_by_asc(ScheduleColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "排期", |m| {
            m.into_schedule()
        })
        .await
    }

    async fn list_schedules_for_slot(
        &self,
        course_id: i64,
        location_id: i64,
    ) -> Result<Vec<Schedule>> {
        let result = Schedules::find()
            .filter(ScheduleColumn::CourseId.eq(course_id))
            .filter(ScheduleColumn::LocationId.eq(location_id))
            .order_by_asc(ScheduleColumn::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询排期失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_schedule()).collect())
    }

    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
        duration_months: i32,
    ) -> Result<Option<Schedule>> {
        if self.get_schedule_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ScheduleActiveModel {
            id: Set(id),
            duration_months: Set(duration_months),
            ..Default::default()
        };

        if let Some(location_id) = update.location_id {
            model.location_id = Set(location_id);
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(instructor_id) = update.instructor_id {
            model.instructor_id = Set(instructor_id);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新排期失败"))?;

        Ok(Some(updated.into_schedule()))
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除排期失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_module(&self, req: CreateModuleRequest) -> Result<Module> {
        let model = ModuleActiveModel {
            schedule_id: Set(req.schedule_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            sort_order: Set(req.order),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建模块失败"))?;

        Ok(result.into_module())
    }

    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询模块失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    async fn list_modules_with_pagination(
        &self,
        query: ModuleListQuery,
    ) -> Result<ModuleListResponse> {
        let mut select = Modules::find();

        if let Some(schedule_id) = query.schedule {
            select = select.filter(ModuleColumn::ScheduleId.eq(schedule_id));
        }

        select = select
            .order_by_asc(ModuleColumn::ScheduleId)
            .order_by_asc(ModuleColumn::SortOrder);

        paginate_select(&self.db, select, &query.pagination, "模块", |m| {
            m.into_module()
        })
        .await
    }

    async fn module_order_taken(
        &self,
        schedule_id: i64,
        order: i32,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Modules::find()
            .filter(ModuleColumn::ScheduleId.eq(schedule_id))
            .filter(ModuleColumn::SortOrder.eq(order));

        if let Some(exclude_id) = exclude_id {
            select = select.filter(ModuleColumn::Id.ne(exclude_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("检查模块顺序失败: {e}")))?;

        Ok(count > 0)
    }

    async fn update_module(&self, id: i64, update: UpdateModuleRequest) -> Result<Option<Module>> {
        if self.get_module_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ModuleActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(order) = update.order {
            model.sort_order = Set(order);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新模块失败"))?;

        Ok(Some(updated.into_module()))
    }

    async fn delete_module(&self, id: i64) -> Result<bool> {
        let result = Modules::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除模块失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson> {
        let model = LessonActiveModel {
            module_id: Set(req.module_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            content: Set(req.content),
            resources_url: Set(req.resources_url),
            sort_order: Set(req.order),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建课时失败"))?;

        Ok(result.into_lesson())
    }

    async fn get_lesson_by_id(&self, id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse> {
        let mut select = Lessons::find();

        if let Some(module_id) = query.module {
            select = select.filter(LessonColumn::ModuleId.eq(module_id));
        }

        select = select
            .order_by_asc(LessonColumn::ModuleId)
            .order_by_asc(LessonColumn::SortOrder);

        paginate_select(&self.db, select, &query.pagination, "课时", |m| {
            m.into_lesson()
        })
        .await
    }

    async fn update_lesson(&self, id: i64, update: UpdateLessonRequest) -> Result<Option<Lesson>> {
        if self.get_lesson_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = LessonActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }
        if let Some(resources_url) = update.resources_url {
            model.resources_url = Set(Some(resources_url));
        }
        if let Some(order) = update.order {
            model.sort_order = Set(order);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新课时失败"))?;

        Ok(Some(updated.into_lesson()))
    }

    async fn delete_lesson(&self, id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除课时失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::storage::sea_orm_storage::fixtures::{seed_course, seed_location};
    use chrono::NaiveDate;

    /// 创建一门课程、一个地点以及一条三个月的排期
    pub async fn seed_schedule(storage: &SeaOrmStorage, course_name: &str) -> Schedule {
        let course = seed_course(storage, course_name).await;
        let location = seed_location(storage, &format!("{course_name} campus")).await;
        storage
            .create_schedule(
                CreateScheduleRequest {
                    course_id: course.id,
                    location_id: location.id,
                    start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                    instructor_id: None,
                },
                3,
            )
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::seed_schedule;
    use super::*;

    fn module(schedule_id: i64, title: &str, order: i32) -> CreateModuleRequest {
        CreateModuleRequest {
            schedule_id,
            title: title.to_string(),
            description: None,
            order,
        }
    }

    fn lesson(module_id: i64, title: &str, order: i32) -> CreateLessonRequest {
        CreateLessonRequest {
            module_id,
            title: title.to_string(),
            description: None,
            content: Some("Read chapter one".to_string()),
            resources_url: None,
            order,
        }
    }

    #[tokio::test]
    async fn test_schedule_detail_orders_modules_and_lessons() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;

        let second = storage
            .create_module(module(schedule.id, "Networking", 2))
            .await
            .unwrap();
        let first = storage
            .create_module(module(schedule.id, "Foundations", 1))
            .await
            .unwrap();
        storage.create_lesson(lesson(first.id, "VPCs", 2)).await.unwrap();
        storage.create_lesson(lesson(first.id, "Regions", 1)).await.unwrap();
        storage.create_lesson(lesson(second.id, "DNS", 1)).await.unwrap();

        let detail = storage
            .get_schedule_detail(schedule.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.course_name, "Cloud");
        assert!(detail.location.is_some());
        assert_eq!(detail.modules.len(), 2);
        assert_eq!(detail.modules[0].module.title, "Foundations");
        let titles: Vec<_> = detail.modules[0]
            .lessons
            .iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Regions", "VPCs"]);
        assert_eq!(detail.modules[1].lessons.len(), 1);
    }

    #[tokio::test]
    async fn test_module_order_taken_excludes_self() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;
        let created = storage
            .create_module(module(schedule.id, "Foundations", 1))
            .await
            .unwrap();

        assert!(storage.module_order_taken(schedule.id, 1, None).await.unwrap());
        assert!(
            !storage
                .module_order_taken(schedule.id, 1, Some(created.id))
                .await
                .unwrap()
        );
        assert!(!storage.module_order_taken(schedule.id, 2, None).await.unwrap());

        // 数据库唯一约束兜底
        let err = storage
            .create_module(module(schedule.id, "Again", 1))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_schedule_slot_and_update() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;

        let slot = storage
            .list_schedules_for_slot(schedule.course_id, schedule.location_id)
            .await
            .unwrap();
        assert_eq!(slot.len(), 1);

        let updated = storage
            .update_schedule(
                schedule.id,
                UpdateScheduleRequest {
                    end_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1),
                    ..Default::default()
                },
                6,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.duration_months, 6);
        assert_eq!(updated.start_date, schedule.start_date);

        assert!(storage.delete_schedule(schedule.id).await.unwrap());
        assert!(storage.get_schedule_detail(schedule.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lesson_list_filters_by_module() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;
        let a = storage
            .create_module(module(schedule.id, "A", 1))
            .await
            .unwrap();
        let b = storage
            .create_module(module(schedule.id, "B", 2))
            .await
            .unwrap();
        storage.create_lesson(lesson(a.id, "One", 1)).await.unwrap();
        storage.create_lesson(lesson(b.id, "Two", 1)).await.unwrap();

        let list = storage
            .list_lessons_with_pagination(LessonListQuery {
                module: Some(b.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);
        assert_eq!(list.items[0].title, "Two");
    }
}
