//! 学员申请、报名与选拔存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err, lower_eq, paginate_select, unique_ids};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::locations::{Column as LocationColumn, Entity as Locations};
use crate::entity::schedules::{Column as ScheduleColumn, Entity as Schedules};
use crate::entity::selection_procedures::{
    ActiveModel as ProcedureActiveModel, Column as ProcedureColumn, Entity as Procedures,
};
use crate::entity::student_courses::{
    ActiveModel as StudentCourseActiveModel, Column as StudentCourseColumn,
    Entity as StudentCourses,
};
use crate::entity::student_schedules::{
    ActiveModel as StudentScheduleActiveModel, Column as StudentScheduleColumn,
    Entity as StudentSchedules,
};
use crate::entity::student_selections::{
    ActiveModel as SelectionActiveModel, Column as SelectionColumn, Entity as Selections,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{EvolvError, Result};
use crate::models::PaginationQuery;
use crate::models::learning::entities::Schedule;
use crate::models::students::{
    entities::{
        Enrollment, EnrollmentStatus, SelectionProcedure, SelectionStatus, Student,
        StudentSelection, format_register_number, parse_register_sequence,
        register_number_prefix,
    },
    requests::{
        CreateSelectionProcedureRequest, CreateStudentRequest, CreateStudentSelectionRequest,
        EnrollmentListQuery, StudentListQuery, StudentSelectionListQuery,
        UpdateSelectionProcedureRequest, UpdateStudentRequest,
    },
    responses::{
        CourseSummary, EnrollmentListResponse, ScheduleSummary, SelectionProcedureListResponse,
        StudentDetail, StudentListResponse, StudentSelectionListResponse,
    },
};
use crate::storage::StudentStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 为学员补齐课程关联及待审核报名，已存在的跳过
async fn attach_courses(
    txn: &DatabaseTransaction,
    student_id: i64,
    course_ids: &[i64],
    now: i64,
) -> Result<()> {
    for course_id in unique_ids(course_ids) {
        let linked = StudentCourses::find()
            .filter(StudentCourseColumn::StudentId.eq(student_id))
            .filter(StudentCourseColumn::CourseId.eq(course_id))
            .one(txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员课程失败: {e}")))?;
        if linked.is_none() {
            StudentCourseActiveModel {
                student_id: Set(student_id),
                course_id: Set(course_id),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(db_err("关联学员课程失败"))?;
        }

        let enrolled = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .one(txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询报名失败: {e}")))?;
        if enrolled.is_none() {
            EnrollmentActiveModel {
                student_id: Set(student_id),
                course_id: Set(course_id),
                status: Set(EnrollmentStatus::Pending.to_string()),
                enrolled_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(db_err("创建报名失败"))?;
        }
    }
    Ok(())
}

#[async_trait]
impl StudentStorage for SeaOrmStorage {
    /// 提交申请：分配学号、关联课程并创建待审核报名
    async fn create_application(
        &self,
        user_id: i64,
        req: CreateStudentRequest,
        year: i32,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let last_sequence = Students::find()
            .select_only()
            .column(Column::RegisterNumber)
            .filter(Column::RegisterNumber.starts_with(register_number_prefix(year)))
            .into_tuple::<Option<String>>()
            .all(&txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学号失败: {e}")))?
            .into_iter()
            .flatten()
            .filter_map(|number| parse_register_sequence(year, &number))
            .max()
            .unwrap_or(0);

        let student = ActiveModel {
            user_id: Set(Some(user_id)),
            email: Set(req.email.trim().to_lowercase()),
            phone: Set(req.phone),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            gender: Set(req.gender.to_string()),
            birth_date: Set(req.birth_date),
            zip_code: Set(req.zip_code),
            country_of_birth: Set(req.country_of_birth),
            nationality: Set(req.nationality),
            register_number: Set(Some(format_register_number(year, last_sequence))),
            diploma_level: Set(req.diploma_level.to_string()),
            job_status: Set(req.job_status),
            motivation: Set(req.motivation),
            future_goals: Set(req.future_goals),
            proudest_moment: Set(req.proudest_moment),
            english_level: Set(req.english_level),
            how_heard: Set(req.how_heard),
            referral_person: Set(req.referral_person),
            has_laptop: Set(req.has_laptop),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建学员申请失败"))?;

        attach_courses(&txn, student.id, &req.course_ids, now).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(student.into_student())
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(lower_eq(Column::Email, email))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>> {
        let Some(student) = self.get_student_by_id(id).await? else {
            return Ok(None);
        };

        let courses = self.list_student_courses(id).await?;
        let schedules = self.list_student_schedules(id).await?;

        Ok(Some(StudentDetail {
            student,
            courses,
            schedules,
        }))
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let mut select = Students::find();

        if let Some(course_id) = query.course {
            let student_ids: Vec<i64> = StudentCourses::find()
                .filter(StudentCourseColumn::CourseId.eq(course_id))
                .all(&self.db)
                .await
                .map_err(|e| EvolvError::database_operation(format!("查询课程学员失败: {e}")))?
                .into_iter()
                .map(|link| link.student_id)
                .collect();
            select = select.filter(Column::Id.is_in(student_ids));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.like(pattern.clone()))
                    .add(Column::LastName.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::RegisterNumber.like(pattern)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        paginate_select(&self.db, select, &query.pagination, "学员", |m| {
            m.into_student()
        })
        .await
    }

    /// 更新学员档案；提供 course_ids 时整体替换所选课程
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }
        if let Some(birth_date) = update.birth_date {
            model.birth_date = Set(birth_date);
        }
        if let Some(zip_code) = update.zip_code {
            model.zip_code = Set(zip_code);
        }
        if let Some(country_of_birth) = update.country_of_birth {
            model.country_of_birth = Set(country_of_birth);
        }
        if let Some(nationality) = update.nationality {
            model.nationality = Set(nationality);
        }
        if let Some(diploma_level) = update.diploma_level {
            model.diploma_level = Set(diploma_level.to_string());
        }
        if let Some(job_status) = update.job_status {
            model.job_status = Set(job_status);
        }
        if let Some(motivation) = update.motivation {
            model.motivation = Set(motivation);
        }
        if let Some(future_goals) = update.future_goals {
            model.future_goals = Set(future_goals);
        }
        if let Some(proudest_moment) = update.proudest_moment {
            model.proudest_moment = Set(proudest_moment);
        }
        if let Some(english_level) = update.english_level {
            model.english_level = Set(english_level);
        }
        if let Some(how_heard) = update.how_heard {
            model.how_heard = Set(how_heard);
        }
        if let Some(referral_person) = update.referral_person {
            model.referral_person = Set(referral_person);
        }
        if let Some(has_laptop) = update.has_laptop {
            model.has_laptop = Set(has_laptop);
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let updated = model.update(&txn).await.map_err(db_err("更新学员失败"))?;

        if let Some(ref course_ids) = update.course_ids {
            let keep = unique_ids(course_ids);
            StudentCourses::delete_many()
                .filter(StudentCourseColumn::StudentId.eq(id))
                .filter(StudentCourseColumn::CourseId.is_not_in(keep.clone()))
                .exec(&txn)
                .await
                .map_err(db_err("清除学员课程失败"))?;
            attach_courses(&txn, id, &keep, now).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(Some(updated.into_student()))
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除学员失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<CourseSummary>> {
        let course_ids: Vec<i64> = StudentCourses::find()
            .filter(StudentCourseColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员课程失败: {e}")))?
            .into_iter()
            .map(|link| link.course_id)
            .collect();

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_asc(CourseColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员课程失败: {e}")))?;

        Ok(courses
            .into_iter()
            .map(|c| CourseSummary {
                id: c.id,
                name: c.name,
                github: c.github,
                discord: c.discord,
            })
            .collect())
    }

    /// 学员已加入的排期，附课程名与地点标签
    async fn list_student_schedules(&self, student_id: i64) -> Result<Vec<ScheduleSummary>> {
        let schedule_ids: Vec<i64> = StudentSchedules::find()
            .filter(StudentScheduleColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员排期失败: {e}")))?
            .into_iter()
            .map(|link| link.schedule_id)
            .collect();

        let schedules = Schedules::find()
            .filter(ScheduleColumn::Id.is_in(schedule_ids))
            .order_by_asc(ScheduleColumn::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员排期失败: {e}")))?;

        let course_ids: Vec<i64> = schedules.iter().map(|s| s.course_id).collect();
        let course_names: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(unique_ids(&course_ids)))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let location_ids: Vec<i64> = schedules.iter().map(|s| s.location_id).collect();
        let location_labels: HashMap<i64, String> = Locations::find()
            .filter(LocationColumn::Id.is_in(unique_ids(&location_ids)))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询地点失败: {e}")))?
            .into_iter()
            .map(|l| (l.id, l.label()))
            .collect();

        Ok(schedules
            .into_iter()
            .map(|s| ScheduleSummary {
                id: s.id,
                course_id: s.course_id,
                course: course_names.get(&s.course_id).cloned().unwrap_or_default(),
                start_date: s.start_date,
                end_date: s.end_date,
                location: location_labels
                    .get(&s.location_id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn is_enrolled_in_schedule(&self, student_id: i64, schedule_id: i64) -> Result<bool> {
        let count = StudentSchedules::find()
            .filter(StudentScheduleColumn::StudentId.eq(student_id))
            .filter(StudentScheduleColumn::ScheduleId.eq(schedule_id))
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员排期失败: {e}")))?;

        Ok(count > 0)
    }

    /// 加入排期，并在缺少时补上该课程的关联
    async fn enroll_in_schedule(&self, student_id: i64, schedule: &Schedule) -> Result<()> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        StudentScheduleActiveModel {
            student_id: Set(student_id),
            schedule_id: Set(schedule.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("加入排期失败"))?;

        let linked = StudentCourses::find()
            .filter(StudentCourseColumn::StudentId.eq(student_id))
            .filter(StudentCourseColumn::CourseId.eq(schedule.course_id))
            .one(&txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询学员课程失败: {e}")))?;
        if linked.is_none() {
            StudentCourseActiveModel {
                student_id: Set(student_id),
                course_id: Set(schedule.course_id),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err("关联学员课程失败"))?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(())
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let mut select = Enrollments::find();

        if let Some(status) = query.status {
            select = select.filter(EnrollmentColumn::Status.eq(status.to_string()));
        }
        if let Some(course_id) = query.course {
            select = select.filter(EnrollmentColumn::CourseId.eq(course_id));
        }
        if let Some(student_id) = query.student {
            select = select.filter(EnrollmentColumn::StudentId.eq(student_id));
        }

        select = select
            .order_by_desc(EnrollmentColumn::EnrolledAt)
            .order_by_desc(EnrollmentColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "报名", |m| {
            m.into_enrollment()
        })
        .await
    }

    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>> {
        if self.get_enrollment_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let updated = EnrollmentActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("更新报名状态失败"))?;

        Ok(Some(updated.into_enrollment()))
    }

    async fn create_selection_procedure(
        &self,
        req: CreateSelectionProcedureRequest,
    ) -> Result<SelectionProcedure> {
        let result = ProcedureActiveModel {
            step_name: Set(req.step_name.trim().to_string()),
            description: Set(req.description),
            sort_order: Set(req.order),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建选拔步骤失败"))?;

        Ok(result.into_procedure())
    }

    async fn get_selection_procedure_by_id(&self, id: i64) -> Result<Option<SelectionProcedure>> {
        let result = Procedures::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询选拔步骤失败: {e}")))?;

        Ok(result.map(|m| m.into_procedure()))
    }

    async fn list_selection_procedures_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<SelectionProcedureListResponse> {
        let select = Procedures::find()
            .order_by_asc(ProcedureColumn::SortOrder)
            .order_by_asc(ProcedureColumn::Id);

        paginate_select(&self.db, select, &query, "选拔步骤", |m| {
            m.into_procedure()
        })
        .await
    }

    async fn update_selection_procedure(
        &self,
        id: i64,
        update: UpdateSelectionProcedureRequest,
    ) -> Result<Option<SelectionProcedure>> {
        if self.get_selection_procedure_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ProcedureActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(step_name) = update.step_name {
            model.step_name = Set(step_name.trim().to_string());
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
            .map_err(db_err("更新选拔步骤失败"))?;

        Ok(Some(updated.into_procedure()))
    }

    async fn delete_selection_procedure(&self, id: i64) -> Result<bool> {
        let result = Procedures::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除选拔步骤失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_student_selection(
        &self,
        req: CreateStudentSelectionRequest,
    ) -> Result<StudentSelection> {
        let now = chrono::Utc::now().timestamp();

        let result = SelectionActiveModel {
            student_id: Set(req.student_id),
            step_id: Set(req.step_id),
            status: Set(req.status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建选拔进度失败"))?;

        Ok(result.into_selection())
    }

    async fn get_student_selection_by_id(&self, id: i64) -> Result<Option<StudentSelection>> {
        let result = Selections::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询选拔进度失败: {e}")))?;

        Ok(result.map(|m| m.into_selection()))
    }

    async fn list_student_selections_with_pagination(
        &self,
        query: StudentSelectionListQuery,
    ) -> Result<StudentSelectionListResponse> {
        let mut select = Selections::find();

        if let Some(student_id) = query.student {
            select = select.filter(SelectionColumn::StudentId.eq(student_id));
        }
        if let Some(step_id) = query.step {
            select = select.filter(SelectionColumn::StepId.eq(step_id));
        }
        if let Some(status) = query.status {
            select = select.filter(SelectionColumn::Status.eq(status.to_string()));
        }

        select = select
            .order_by_asc(SelectionColumn::StudentId)
            .order_by_asc(SelectionColumn::Id);

        paginate_select(&self.db, select, &query.pagination, "选拔进度", |m| {
            m.into_selection()
        })
        .await
    }

    async fn list_selections_for_student(&self, student_id: i64) -> Result<Vec<StudentSelection>> {
        let selections = Selections::find()
            .filter(SelectionColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询选拔进度失败: {e}")))?;

        let step_ids: Vec<i64> = selections.iter().map(|s| s.step_id).collect();
        let step_order: HashMap<i64, i32> = Procedures::find()
            .filter(ProcedureColumn::Id.is_in(unique_ids(&step_ids)))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询选拔步骤失败: {e}")))?
            .into_iter()
            .map(|p| (p.id, p.sort_order))
            .collect();

        let mut selections: Vec<StudentSelection> =
            selections.into_iter().map(|m| m.into_selection()).collect();
        selections.sort_by_key(|s| (step_order.get(&s.step_id).copied().unwrap_or(i32::MAX), s.id));

        Ok(selections)
    }

    async fn update_student_selection(
        &self,
        id: i64,
        status: SelectionStatus,
    ) -> Result<Option<StudentSelection>> {
        if self.get_student_selection_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let updated = SelectionActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_err("更新选拔进度失败"))?;

        Ok(Some(updated.into_selection()))
    }

    async fn delete_student_selection(&self, id: i64) -> Result<bool> {
        let result = Selections::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除选拔进度失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::fixtures::{new_application, seed_course, seed_user};
    use crate::storage::sea_orm_storage::learning::test_support::seed_schedule;

    fn step(name: &str, order: i32) -> CreateSelectionProcedureRequest {
        CreateSelectionProcedureRequest {
            step_name: name.to_string(),
            description: None,
            order,
        }
    }

    #[tokio::test]
    async fn test_application_assigns_register_numbers() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Cloud").await;
        let ada = seed_user(&storage, "ada").await;
        let bo = seed_user(&storage, "bo").await;

        let first = storage
            .create_application(ada.id, new_application("Ada@Example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        let second = storage
            .create_application(bo.id, new_application("bo@example.com", vec![course.id]), 2026)
            .await
            .unwrap();

        assert_eq!(first.register_number.as_deref(), Some("EVOLV-2026-0001"));
        assert_eq!(second.register_number.as_deref(), Some("EVOLV-2026-0002"));
        assert_eq!(first.email, "ada@example.com");

        let enrollments = storage
            .list_enrollments_with_pagination(EnrollmentListQuery {
                student: Some(first.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(enrollments.pagination.total, 1);
        assert_eq!(enrollments.items[0].status, EnrollmentStatus::Pending);
    }

    #[tokio::test]
    async fn test_register_number_not_reused_after_delete() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Cloud").await;
        let ada = seed_user(&storage, "ada").await;
        let bo = seed_user(&storage, "bo").await;
        let cy = seed_user(&storage, "cy").await;

        let first = storage
            .create_application(ada.id, new_application("ada@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        let second = storage
            .create_application(bo.id, new_application("bo@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        assert!(storage.delete_student(first.id).await.unwrap());

        let third = storage
            .create_application(cy.id, new_application("cy@example.com", vec![course.id]), 2026)
            .await
            .unwrap();

        assert_eq!(second.register_number.as_deref(), Some("EVOLV-2026-0002"));
        assert_eq!(third.register_number.as_deref(), Some("EVOLV-2026-0003"));
    }

    #[tokio::test]
    async fn test_duplicate_application_email_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Cloud").await;
        let ada = seed_user(&storage, "ada").await;
        let bo = seed_user(&storage, "bo").await;

        storage
            .create_application(ada.id, new_application("ada@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        let err = storage
            .create_application(bo.id, new_application("ADA@example.com", vec![course.id]), 2026)
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        // 失败的事务不留下报名
        let enrollments = storage
            .list_enrollments_with_pagination(EnrollmentListQuery::default())
            .await
            .unwrap();
        assert_eq!(enrollments.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_update_student_replaces_courses() {
        let storage = SeaOrmStorage::in_memory().await;
        let cloud = seed_course(&storage, "Cloud").await;
        let data = seed_course(&storage, "Data").await;
        let ada = seed_user(&storage, "ada").await;
        let student = storage
            .create_application(ada.id, new_application("ada@example.com", vec![cloud.id]), 2026)
            .await
            .unwrap();

        storage
            .update_student(
                student.id,
                UpdateStudentRequest {
                    course_ids: Some(vec![data.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let courses = storage.list_student_courses(student.id).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Data");

        let by_course = storage
            .list_students_with_pagination(StudentListQuery {
                course: Some(cloud.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_course.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_enroll_in_schedule_links_course() {
        let storage = SeaOrmStorage::in_memory().await;
        let schedule = seed_schedule(&storage, "Cloud").await;
        let other = seed_course(&storage, "Data").await;
        let ada = seed_user(&storage, "ada").await;
        let student = storage
            .create_application(ada.id, new_application("ada@example.com", vec![other.id]), 2026)
            .await
            .unwrap();

        assert!(!storage.is_enrolled_in_schedule(student.id, schedule.id).await.unwrap());
        storage.enroll_in_schedule(student.id, &schedule).await.unwrap();
        assert!(storage.is_enrolled_in_schedule(student.id, schedule.id).await.unwrap());

        let detail = storage.get_student_detail(student.id).await.unwrap().unwrap();
        assert_eq!(detail.courses.len(), 2);
        assert_eq!(detail.schedules.len(), 1);
        assert_eq!(detail.schedules[0].course, "Cloud");
        assert_eq!(detail.schedules[0].location, "Cloud campus (campus)");

        let again = storage.enroll_in_schedule(student.id, &schedule).await;
        assert!(again.unwrap_err().is_conflict());
    }

    #[tokio::test]
    async fn test_selections_sorted_by_step_order() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Cloud").await;
        let ada = seed_user(&storage, "ada").await;
        let student = storage
            .create_application(ada.id, new_application("ada@example.com", vec![course.id]), 2026)
            .await
            .unwrap();

        let interview = storage.create_selection_procedure(step("Interview", 2)).await.unwrap();
        let screening = storage.create_selection_procedure(step("Screening", 1)).await.unwrap();

        let later = storage
            .create_student_selection(CreateStudentSelectionRequest {
                student_id: student.id,
                step_id: interview.id,
                status: SelectionStatus::Pending,
            })
            .await
            .unwrap();
        storage
            .create_student_selection(CreateStudentSelectionRequest {
                student_id: student.id,
                step_id: screening.id,
                status: SelectionStatus::Completed,
            })
            .await
            .unwrap();

        let steps = storage.list_selections_for_student(student.id).await.unwrap();
        assert_eq!(steps[0].step_id, screening.id);
        assert_eq!(steps[1].step_id, interview.id);

        let updated = storage
            .update_student_selection(later.id, SelectionStatus::Completed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, SelectionStatus::Completed);

        let duplicate = storage
            .create_student_selection(CreateStudentSelectionRequest {
                student_id: student.id,
                step_id: interview.id,
                status: SelectionStatus::Pending,
            })
            .await;
        assert!(duplicate.unwrap_err().is_conflict());
    }
}
