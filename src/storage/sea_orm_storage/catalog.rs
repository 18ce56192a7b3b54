//! 课程目录存储操作

use super::{SeaOrmStorage, db_err, paginate_select, unique_ids};
use crate::entity::categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as Categories,
};
use crate::entity::course_locations::{
    ActiveModel as CourseLocationActiveModel, Column as CourseLocationColumn,
    Entity as CourseLocations,
};
use crate::entity::course_materials::{
    ActiveModel as MaterialActiveModel, Column as MaterialColumn, Entity as Materials,
};
use crate::entity::course_partners::{
    ActiveModel as CoursePartnerActiveModel, Column as CoursePartnerColumn,
    Entity as CoursePartners,
};
use crate::entity::courses::{ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Courses};
use crate::entity::locations::{
    ActiveModel as LocationActiveModel, Column as LocationColumn, Entity as Locations,
};
use crate::entity::partners::{
    ActiveModel as PartnerActiveModel, Column as PartnerColumn, Entity as Partners,
};
use crate::errors::{EvolvError, Result};
use crate::models::catalog::{
    entities::{Category, Course, CourseMaterial, Location, Partner},
    requests::{
        CategoryListQuery, CourseListQuery, CreateCategoryRequest, CreateCourseRequest,
        CreateLocationRequest, CreateMaterialRequest, CreatePartnerRequest, LocationListQuery,
        PartnerListQuery, UpdateCategoryRequest, UpdateCourseRequest, UpdateLocationRequest,
        UpdatePartnerRequest,
    },
    responses::{
        CategoryListResponse, CourseDetail, CourseListResponse, LocationListResponse,
        PartnerListResponse,
    },
};
use crate::storage::CatalogStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 整体替换课程的地点关联
async fn replace_course_locations(
    txn: &DatabaseTransaction,
    course_id: i64,
    location_ids: &[i64],
) -> Result<()> {
    CourseLocations::delete_many()
        .filter(CourseLocationColumn::CourseId.eq(course_id))
        .exec(txn)
        .await
        .map_err(db_err("清除课程地点关联失败"))?;

    for location_id in unique_ids(location_ids) {
        CourseLocationActiveModel {
            course_id: Set(course_id),
            location_id: Set(location_id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(db_err("写入课程地点关联失败"))?;
    }
    Ok(())
}

/// 整体替换课程的合作伙伴关联
async fn replace_course_partners(
    txn: &DatabaseTransaction,
    course_id: i64,
    partner_ids: &[i64],
) -> Result<()> {
    CoursePartners::delete_many()
        .filter(CoursePartnerColumn::CourseId.eq(course_id))
        .exec(txn)
        .await
        .map_err(db_err("清除课程合作伙伴关联失败"))?;

    for partner_id in unique_ids(partner_ids) {
        CoursePartnerActiveModel {
            course_id: Set(course_id),
            partner_id: Set(partner_id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(db_err("写入课程合作伙伴关联失败"))?;
    }
    Ok(())
}

#[async_trait]
impl CatalogStorage for SeaOrmStorage {
    async fn create_category(&self, req: CreateCategoryRequest) -> Result<Category> {
        let now = chrono::Utc::now().timestamp();

        let model = CategoryActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            icon: Set(req.icon),
            image: Set(req.image),
            color: Set(req.color),
            is_active: Set(req.is_active),
            sort_order: Set(req.order),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建分类失败"))?;

        Ok(result.into_category())
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = Categories::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询分类失败: {e}")))?;

        Ok(result.map(|m| m.into_category()))
    }

    /// 分页列出分类，按 order 升序、名称升序
    async fn list_categories_with_pagination(
        &self,
        query: CategoryListQuery,
    ) -> Result<CategoryListResponse> {
        let mut select = Categories::find();

        if let Some(is_active) = query.is_active {
            select = select.filter(CategoryColumn::IsActive.eq(is_active));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(CategoryColumn::Name.like(contains_pattern(search)));
        }

        select = select
            .order_by_asc(CategoryColumn::SortOrder)
            .order_by_asc(CategoryColumn::Name);

        paginate_select(&self.db, select, &query.pagination, "分类", |m| {
            m.into_category()
        })
        .await
    }

    async fn update_category(
        &self,
        id: i64,
        update: UpdateCategoryRequest,
    ) -> Result<Option<Category>> {
        if self.get_category_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = CategoryActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(icon) = update.icon {
            model.icon = Set(Some(icon));
        }
        if let Some(image) = update.image {
            model.image = Set(Some(image));
        }
        if let Some(color) = update.color {
            model.color = Set(Some(color));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(order) = update.order {
            model.sort_order = Set(order);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新分类失败"))?;

        Ok(Some(updated.into_category()))
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        let result = Categories::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除分类失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_courses_in_category(&self, category_id: i64) -> Result<u64> {
        Courses::find()
            .filter(CourseColumn::CategoryId.eq(category_id))
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计分类课程失败: {e}")))
    }

    async fn create_location(&self, req: CreateLocationRequest) -> Result<Location> {
        let now = chrono::Utc::now().timestamp();

        let model = LocationActiveModel {
            name: Set(req.name.trim().to_string()),
            location_type: Set(req.location_type.to_string()),
            online_region: Set(req.online_region.map(|r| r.to_string())),
            country: Set(req.country),
            state: Set(req.state),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建地点失败"))?;

        Ok(result.into_location())
    }

    async fn get_location_by_id(&self, id: i64) -> Result<Option<Location>> {
        let result = Locations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询地点失败: {e}")))?;

        Ok(result.map(|m| m.into_location()))
    }

    async fn list_locations_with_pagination(
        &self,
        query: LocationListQuery,
    ) -> Result<LocationListResponse> {
        let mut select = Locations::find();

        if let Some(location_type) = query.location_type {
            select = select.filter(LocationColumn::LocationType.eq(location_type.to_string()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(LocationColumn::Name.like(pattern.clone()))
                    .add(LocationColumn::Country.like(pattern.clone()))
                    .add(LocationColumn::State.like(pattern)),
            );
        }

        select = select.order_by_asc(LocationColumn::Name);

        paginate_select(&self.db, select, &query.pagination, "地点", |m| {
            m.into_location()
        })
        .await
    }

    async fn update_location(
        &self,
        id: i64,
        update: UpdateLocationRequest,
    ) -> Result<Option<Location>> {
        if self.get_location_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = LocationActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(location_type) = update.location_type {
            model.location_type = Set(location_type.to_string());
        }
        if let Some(online_region) = update.online_region {
            model.online_region = Set(online_region.map(|r| r.to_string()));
        }
        if let Some(country) = update.country {
            model.country = Set(Some(country));
        }
        if let Some(state) = update.state {
            model.state = Set(Some(state));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新地点失败"))?;

        Ok(Some(updated.into_location()))
    }

    async fn delete_location(&self, id: i64) -> Result<bool> {
        let result = Locations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除地点失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_locations_by_ids(&self, ids: &[i64]) -> Result<u64> {
        Locations::find()
            .filter(LocationColumn::Id.is_in(unique_ids(ids)))
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计地点失败: {e}")))
    }

    async fn create_partner(&self, req: CreatePartnerRequest) -> Result<Partner> {
        let now = chrono::Utc::now().timestamp();

        let model = PartnerActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            website: Set(req.website),
            contact_email: Set(req.contact_email),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建合作伙伴失败"))?;

        Ok(result.into_partner())
    }

    async fn get_partner_by_id(&self, id: i64) -> Result<Option<Partner>> {
        let result = Partners::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询合作伙伴失败: {e}")))?;

        Ok(result.map(|m| m.into_partner()))
    }

    async fn list_partners_with_pagination(
        &self,
        query: PartnerListQuery,
    ) -> Result<PartnerListResponse> {
        let mut select = Partners::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(PartnerColumn::Name.like(pattern.clone()))
                    .add(PartnerColumn::Description.like(pattern)),
            );
        }

        select = select.order_by_asc(PartnerColumn::Name);

        paginate_select(&self.db, select, &query.pagination, "合作伙伴", |m| {
            m.into_partner()
        })
        .await
    }

    async fn update_partner(
        &self,
        id: i64,
        update: UpdatePartnerRequest,
    ) -> Result<Option<Partner>> {
        if self.get_partner_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = PartnerActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(website) = update.website {
            model.website = Set(Some(website));
        }
        // 空字符串表示清空联系邮箱
        if let Some(contact_email) = update.contact_email {
            model.contact_email = Set((!contact_email.is_empty()).then_some(contact_email));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新合作伙伴失败"))?;

        Ok(Some(updated.into_partner()))
    }

    async fn delete_partner(&self, id: i64) -> Result<bool> {
        let result = Partners::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除合作伙伴失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_partners_by_ids(&self, ids: &[i64]) -> Result<u64> {
        Partners::find()
            .filter(PartnerColumn::Id.is_in(unique_ids(ids)))
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计合作伙伴失败: {e}")))
    }

    /// 创建课程并写入关联
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let course = CourseActiveModel {
            name: Set(req.name.trim().to_string()),
            category_id: Set(req.category_id),
            parent_id: Set(req.parent_id),
            description: Set(req.description),
            software_tools: Set(req.software_tools),
            topics_covered: Set(req.topics_covered),
            instructor_id: Set(req.instructor_id),
            registration_deadline: Set(req.registration_deadline),
            selection_date: Set(req.selection_date),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            github: Set(req.github),
            discord: Set(req.discord),
            video_content: Set(req.video_content),
            additional_materials: Set(req.additional_materials),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建课程失败"))?;

        replace_course_locations(&txn, course.id, &req.location_ids).await?;
        replace_course_partners(&txn, course.id, &req.partner_ids).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(course.into_course())
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 课程详情：分类、地点、合作伙伴、子课程
    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>> {
        let Some(course) = self.get_course_by_id(id).await? else {
            return Ok(None);
        };

        let category = self.get_category_by_id(course.category_id).await?;

        let location_ids: Vec<i64> = CourseLocations::find()
            .filter(CourseLocationColumn::CourseId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程地点失败: {e}")))?
            .into_iter()
            .map(|link| link.location_id)
            .collect();

        let locations = Locations::find()
            .filter(LocationColumn::Id.is_in(location_ids))
            .order_by_asc(LocationColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程地点失败: {e}")))?
            .into_iter()
            .map(|m| m.into_location())
            .collect();

        let partner_ids: Vec<i64> = CoursePartners::find()
            .filter(CoursePartnerColumn::CourseId.eq(id))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程合作伙伴失败: {e}")))?
            .into_iter()
            .map(|link| link.partner_id)
            .collect();

        let partners = Partners::find()
            .filter(PartnerColumn::Id.is_in(partner_ids))
            .order_by_asc(PartnerColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程合作伙伴失败: {e}")))?
            .into_iter()
            .map(|m| m.into_partner())
            .collect();

        let subcourses = Courses::find()
            .filter(CourseColumn::ParentId.eq(id))
            .order_by_asc(CourseColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询子课程失败: {e}")))?
            .into_iter()
            .map(|m| m.into_course())
            .collect();

        Ok(Some(CourseDetail {
            course,
            category,
            locations,
            partners,
            subcourses,
        }))
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let mut select = Courses::find();

        if let Some(category_id) = query.category {
            select = select.filter(CourseColumn::CategoryId.eq(category_id));
        }

        if let Some(parent_id) = query.parent {
            select = select.filter(CourseColumn::ParentId.eq(parent_id));
        }

        if query.top_level == Some(true) {
            select = select.filter(CourseColumn::ParentId.is_null());
        }

        if let Some(instructor_id) = query.instructor {
            select = select.filter(CourseColumn::InstructorId.eq(instructor_id));
        }

        if let Some(location_id) = query.location {
            let course_ids: Vec<i64> = CourseLocations::find()
                .filter(CourseLocationColumn::LocationId.eq(location_id))
                .all(&self.db)
                .await
                .map_err(|e| EvolvError::database_operation(format!("查询地点课程失败: {e}")))?
                .into_iter()
                .map(|link| link.course_id)
                .collect();
            select = select.filter(CourseColumn::Id.is_in(course_ids));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(CourseColumn::Name.like(pattern.clone()))
                    .add(CourseColumn::Description.like(pattern)),
            );
        }

        select = select.order_by_desc(CourseColumn::CreatedAt);

        paginate_select(&self.db, select, &query.pagination, "课程", |m| {
            m.into_course()
        })
        .await
    }

    async fn list_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>> {
        let result = Courses::find()
            .filter(CourseColumn::Id.is_in(unique_ids(ids)))
            .order_by_asc(CourseColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 更新课程；提供 location_ids / partner_ids 时整体替换关联
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        if self.get_course_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = CourseActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(category_id) = update.category_id {
            model.category_id = Set(category_id);
        }
        if let Some(parent_id) = update.parent_id {
            model.parent_id = Set(parent_id);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(software_tools) = update.software_tools {
            model.software_tools = Set(Some(software_tools));
        }
        if let Some(topics_covered) = update.topics_covered {
            model.topics_covered = Set(Some(topics_covered));
        }
        if let Some(instructor_id) = update.instructor_id {
            model.instructor_id = Set(instructor_id);
        }
        if let Some(registration_deadline) = update.registration_deadline {
            model.registration_deadline = Set(registration_deadline);
        }
        if let Some(selection_date) = update.selection_date {
            model.selection_date = Set(selection_date);
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }
        if let Some(github) = update.github {
            model.github = Set(Some(github));
        }
        if let Some(discord) = update.discord {
            model.discord = Set(Some(discord));
        }
        if let Some(video_content) = update.video_content {
            model.video_content = Set(video_content);
        }
        if let Some(additional_materials) = update.additional_materials {
            model.additional_materials = Set(additional_materials);
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let updated = model.update(&txn).await.map_err(db_err("更新课程失败"))?;

        if let Some(ref location_ids) = update.location_ids {
            replace_course_locations(&txn, id, location_ids).await?;
        }
        if let Some(ref partner_ids) = update.partner_ids {
            replace_course_partners(&txn, id, partner_ids).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(Some(updated.into_course()))
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除课程失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn create_material(
        &self,
        course_id: i64,
        req: CreateMaterialRequest,
        file_size: i64,
        uploaded_by: i64,
    ) -> Result<CourseMaterial> {
        let now = chrono::Utc::now().timestamp();

        let model = MaterialActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            material_type: Set(req.material_type.to_string()),
            file_token: Set(req.file_token),
            file_size: Set(file_size),
            uploaded_by: Set(Some(uploaded_by)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建课程资料失败"))?;

        Ok(result.into_material())
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 多门课程的资料，最新的在前
    async fn list_materials_for_courses(&self, course_ids: &[i64]) -> Result<Vec<CourseMaterial>> {
        let result = Materials::find()
            .filter(MaterialColumn::CourseId.is_in(unique_ids(course_ids)))
            .order_by_desc(MaterialColumn::CreatedAt)
            .order_by_desc(MaterialColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询课程资料失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除课程资料失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::models::catalog::entities::MaterialType;
    use crate::storage::sea_orm_storage::fixtures::{
        new_course, seed_category, seed_course, seed_location, seed_user,
    };

    #[tokio::test]
    async fn test_category_order_and_filter() {
        let storage = SeaOrmStorage::in_memory().await;
        let data = seed_category(&storage, "Data").await;
        let web = seed_category(&storage, "Web").await;
        storage
            .update_category(
                web.id,
                UpdateCategoryRequest {
                    order: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        storage
            .update_category(
                data.id,
                UpdateCategoryRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = storage
            .list_categories_with_pagination(CategoryListQuery::default())
            .await
            .unwrap();
        let names: Vec<_> = all.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Web", "Data"]);

        let active = storage
            .list_categories_with_pagination(CategoryListQuery {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        seed_category(&storage, "Data").await;
        let err = storage
            .create_category(CreateCategoryRequest {
                name: "Data".to_string(),
                description: None,
                icon: None,
                image: None,
                color: None,
                is_active: true,
                order: 0,
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_course_links_and_detail() {
        let storage = SeaOrmStorage::in_memory().await;
        let category = seed_category(&storage, "Data").await;
        let lagos = seed_location(&storage, "Lagos Campus").await;
        let abuja = seed_location(&storage, "Abuja Campus").await;

        let mut request = new_course("Data Analytics", category.id);
        request.location_ids = vec![lagos.id, lagos.id, abuja.id];
        let course = storage.create_course(request).await.unwrap();

        let mut child = new_course("SQL Basics", category.id);
        child.parent_id = Some(course.id);
        storage.create_course(child).await.unwrap();

        let detail = storage.get_course_detail(course.id).await.unwrap().unwrap();
        assert_eq!(detail.locations.len(), 2);
        assert_eq!(detail.category.unwrap().id, category.id);
        assert_eq!(detail.subcourses.len(), 1);
        assert!(detail.partners.is_empty());

        // 只替换地点，合作伙伴不变
        storage
            .update_course(
                course.id,
                UpdateCourseRequest {
                    location_ids: Some(vec![abuja.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let detail = storage.get_course_detail(course.id).await.unwrap().unwrap();
        assert_eq!(detail.locations.len(), 1);
        assert_eq!(detail.locations[0].id, abuja.id);
    }

    #[tokio::test]
    async fn test_course_list_filters() {
        let storage = SeaOrmStorage::in_memory().await;
        let category = seed_category(&storage, "Data").await;
        let lagos = seed_location(&storage, "Lagos Campus").await;

        let mut request = new_course("Data Analytics", category.id);
        request.location_ids = vec![lagos.id];
        let parent = storage.create_course(request).await.unwrap();

        let mut child = new_course("SQL Basics", category.id);
        child.parent_id = Some(parent.id);
        storage.create_course(child).await.unwrap();

        let top = storage
            .list_courses_with_pagination(CourseListQuery {
                top_level: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(top.pagination.total, 1);

        let at_lagos = storage
            .list_courses_with_pagination(CourseListQuery {
                location: Some(lagos.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(at_lagos.items[0].id, parent.id);

        let searched = storage
            .list_courses_with_pagination(CourseListQuery {
                search: Some("sql".to_string()),
                pagination: PaginationQuery::default(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_update_course_clears_nullable_fields() {
        let storage = SeaOrmStorage::in_memory().await;
        let category = seed_category(&storage, "Data").await;
        let mut request = new_course("Data Analytics", category.id);
        request.video_content = Some("tok-video".to_string());
        let course = storage.create_course(request).await.unwrap();

        let patch: UpdateCourseRequest =
            serde_json::from_str(r#"{"video_content":null,"github":"https://github.com/x"}"#)
                .unwrap();
        let updated = storage
            .update_course(course.id, patch)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.video_content.is_none());
        assert_eq!(updated.github.as_deref(), Some("https://github.com/x"));
        assert!(
            storage
                .update_course(9999, UpdateCourseRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_count_references() {
        let storage = SeaOrmStorage::in_memory().await;
        let lagos = seed_location(&storage, "Lagos Campus").await;
        assert_eq!(
            storage
                .count_locations_by_ids(&[lagos.id, lagos.id, 404])
                .await
                .unwrap(),
            1
        );
        assert_eq!(storage.count_partners_by_ids(&[1]).await.unwrap(), 0);

        let course = seed_course(&storage, "Cloud").await;
        assert_eq!(
            storage
                .count_courses_in_category(course.category_id)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_materials_for_courses() {
        let storage = SeaOrmStorage::in_memory().await;
        let admin = seed_user(&storage, "admin").await;
        let course = seed_course(&storage, "Cloud").await;
        let other = seed_course(&storage, "Security").await;

        let material = storage
            .create_material(
                course.id,
                CreateMaterialRequest {
                    title: "Week 1".to_string(),
                    description: None,
                    material_type: MaterialType::Document,
                    file_token: "tok-doc".to_string(),
                },
                1024,
                admin.id,
            )
            .await
            .unwrap();
        assert_eq!(material.uploaded_by, Some(admin.id));

        let list = storage
            .list_materials_for_courses(&[course.id, other.id])
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert!(storage.list_materials_for_courses(&[]).await.unwrap().is_empty());

        assert!(storage.delete_material(material.id).await.unwrap());
        assert!(storage.get_material_by_id(material.id).await.unwrap().is_none());
    }
}
