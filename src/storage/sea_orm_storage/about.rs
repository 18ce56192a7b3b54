//! 关于我们、核心价值观、团队成员存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, db_err, unique_ids};
use crate::entity::about_us::{ActiveModel as AboutActiveModel, Column as AboutColumn, Entity as About};
use crate::entity::core_values::{
    ActiveModel as CoreValueActiveModel, Column as CoreValueColumn, Entity as CoreValues,
};
use crate::entity::team_member_values::{
    ActiveModel as MemberValueActiveModel, Column as MemberValueColumn, Entity as MemberValues,
};
use crate::entity::team_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as TeamMembers,
};
use crate::errors::{EvolvError, Result};
use crate::models::about::{
    entities::{AboutUs, CoreValue, DEFAULT_ABOUT_TITLE, TeamMember},
    requests::{
        CreateCoreValueRequest, CreateTeamMemberRequest, UpdateAboutUsRequest,
        UpdateCoreValueRequest, UpdateTeamMemberRequest,
    },
    responses::{AboutUsDetail, TeamMemberDetail},
};
use crate::storage::AboutStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 整体替换成员认同的价值观
async fn replace_member_values(
    txn: &DatabaseTransaction,
    member_id: i64,
    core_value_ids: &[i64],
) -> Result<()> {
    MemberValues::delete_many()
        .filter(MemberValueColumn::TeamMemberId.eq(member_id))
        .exec(txn)
        .await
        .map_err(db_err("清除成员价值观失败"))?;

    for core_value_id in unique_ids(core_value_ids) {
        MemberValueActiveModel {
            team_member_id: Set(member_id),
            core_value_id: Set(core_value_id),
            ..Default::default()
        }
        .insert(txn)
        .await
        .map_err(db_err("写入成员价值观失败"))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 为一组成员加载价值观，保持成员顺序
    async fn attach_core_values(&self, members: Vec<TeamMember>) -> Result<Vec<TeamMemberDetail>> {
        let member_ids: Vec<i64> = members.iter().map(|m| m.id).collect();
        let links = MemberValues::find()
            .filter(MemberValueColumn::TeamMemberId.is_in(member_ids))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询成员价值观失败: {e}")))?;

        let value_ids: Vec<i64> = links.iter().map(|l| l.core_value_id).collect();
        let values: HashMap<i64, CoreValue> = CoreValues::find()
            .filter(CoreValueColumn::Id.is_in(unique_ids(&value_ids)))
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询价值观失败: {e}")))?
            .into_iter()
            .map(|m| (m.id, m.into_core_value()))
            .collect();

        let mut by_member: HashMap<i64, Vec<CoreValue>> = HashMap::new();
        for link in links {
            if let Some(value) = values.get(&link.core_value_id) {
                by_member
                    .entry(link.team_member_id)
                    .or_default()
                    .push(value.clone());
            }
        }

        Ok(members
            .into_iter()
            .map(|member| {
                let mut core_values = by_member.remove(&member.id).unwrap_or_default();
                core_values.sort_by_key(|v| v.id);
                TeamMemberDetail {
                    member,
                    core_values,
                }
            })
            .collect())
    }
}

#[async_trait]
impl AboutStorage for SeaOrmStorage {
    /// 取唯一的关于我们记录，不存在时以默认标题创建
    async fn get_or_create_about_us(&self) -> Result<AboutUs> {
        let existing = About::find()
            .order_by_asc(AboutColumn::Id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询关于我们失败: {e}")))?;

        if let Some(about) = existing {
            return Ok(about.into_about_us());
        }

        let now = chrono::Utc::now().timestamp();
        let created = AboutActiveModel {
            title: Set(DEFAULT_ABOUT_TITLE.to_string()),
            description: Set(String::new()),
            mission: Set(None),
            vision: Set(None),
            image: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建关于我们失败"))?;

        Ok(created.into_about_us())
    }

    async fn get_about_us_detail(&self) -> Result<AboutUsDetail> {
        let about = self.get_or_create_about_us().await?;
        let core_values = self.list_core_values().await?;
        let team_members = self.list_team_members().await?;

        Ok(AboutUsDetail {
            about,
            core_values,
            team_members,
        })
    }

    async fn update_about_us(&self, update: UpdateAboutUsRequest) -> Result<AboutUs> {
        let current = self.get_or_create_about_us().await?;
        let now = chrono::Utc::now().timestamp();

        let mut model = AboutActiveModel {
            id: Set(current.id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(mission) = update.mission {
            model.mission = Set(Some(mission));
        }
        if let Some(vision) = update.vision {
            model.vision = Set(Some(vision));
        }
        if let Some(image) = update.image {
            model.image = Set(Some(image));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新关于我们失败"))?;

        Ok(updated.into_about_us())
    }

    async fn create_core_value(&self, req: CreateCoreValueRequest) -> Result<CoreValue> {
        let about = self.get_or_create_about_us().await?;

        let result = CoreValueActiveModel {
            about_us_id: Set(about.id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("创建价值观失败"))?;

        Ok(result.into_core_value())
    }

    async fn get_core_value_by_id(&self, id: i64) -> Result<Option<CoreValue>> {
        let result = CoreValues::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询价值观失败: {e}")))?;

        Ok(result.map(|m| m.into_core_value()))
    }

    async fn list_core_values(&self) -> Result<Vec<CoreValue>> {
        let result = CoreValues::find()
            .order_by_asc(CoreValueColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询价值观失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_core_value()).collect())
    }

    async fn update_core_value(
        &self,
        id: i64,
        update: UpdateCoreValueRequest,
    ) -> Result<Option<CoreValue>> {
        if self.get_core_value_by_id(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = CoreValueActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_err("更新价值观失败"))?;

        Ok(Some(updated.into_core_value()))
    }

    async fn delete_core_value(&self, id: i64) -> Result<bool> {
        let result = CoreValues::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除价值观失败"))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_core_values_by_ids(&self, ids: &[i64]) -> Result<u64> {
        CoreValues::find()
            .filter(CoreValueColumn::Id.is_in(unique_ids(ids)))
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计价值观失败: {e}")))
    }

    async fn create_team_member(&self, req: CreateTeamMemberRequest) -> Result<TeamMember> {
        let about = self.get_or_create_about_us().await?;

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let member = MemberActiveModel {
            about_us_id: Set(about.id),
            name: Set(req.name.trim().to_string()),
            role: Set(req.role),
            image: Set(req.image),
            bio: Set(req.bio),
            linkedin: Set(req.linkedin),
            twitter: Set(req.twitter),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建团队成员失败"))?;

        replace_member_values(&txn, member.id, &req.core_value_ids).await?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(member.into_team_member())
    }

    async fn get_team_member_detail(&self, id: i64) -> Result<Option<TeamMemberDetail>> {
        let member = TeamMembers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询团队成员失败: {e}")))?;

        let Some(member) = member else {
            return Ok(None);
        };

        let mut details = self
            .attach_core_values(vec![member.into_team_member()])
            .await?;
        Ok(details.pop())
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMemberDetail>> {
        let members = TeamMembers::find()
            .order_by_asc(MemberColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询团队成员失败: {e}")))?
            .into_iter()
            .map(|m| m.into_team_member())
            .collect();

        self.attach_core_values(members).await
    }

    async fn update_team_member(
        &self,
        id: i64,
        update: UpdateTeamMemberRequest,
    ) -> Result<Option<TeamMember>> {
        let exists = TeamMembers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询团队成员失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let mut model = MemberActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(role) = update.role {
            model.role = Set(role);
        }
        if let Some(image) = update.image {
            model.image = Set(Some(image));
        }
        if let Some(bio) = update.bio {
            model.bio = Set(Some(bio));
        }
        if let Some(linkedin) = update.linkedin {
            model.linkedin = Set(Some(linkedin));
        }
        if let Some(twitter) = update.twitter {
            model.twitter = Set(Some(twitter));
        }

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let updated = model
            .update(&txn)
            .await
            .map_err(db_err("更新团队成员失败"))?;

        if let Some(ref core_value_ids) = update.core_value_ids {
            replace_member_values(&txn, id, core_value_ids).await?;
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(Some(updated.into_team_member()))
    }

    async fn delete_team_member(&self, id: i64) -> Result<bool> {
        let result = TeamMembers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除团队成员失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(title: &str) -> CreateCoreValueRequest {
        CreateCoreValueRequest {
            title: title.to_string(),
            description: format!("{title} matters"),
        }
    }

    #[tokio::test]
    async fn test_about_us_is_a_singleton() {
        let storage = SeaOrmStorage::in_memory().await;
        let first = storage.get_or_create_about_us().await.unwrap();
        let second = storage.get_or_create_about_us().await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.title, DEFAULT_ABOUT_TITLE);

        let updated = storage
            .update_about_us(UpdateAboutUsRequest {
                mission: Some("Train builders".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.id, first.id);
        assert_eq!(updated.mission.as_deref(), Some("Train builders"));
        assert_eq!(updated.title, DEFAULT_ABOUT_TITLE);
    }

    #[tokio::test]
    async fn test_core_value_title_unique() {
        let storage = SeaOrmStorage::in_memory().await;
        storage.create_core_value(value("Curiosity")).await.unwrap();
        let err = storage.create_core_value(value("Curiosity")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_team_member_values() {
        let storage = SeaOrmStorage::in_memory().await;
        let curiosity = storage.create_core_value(value("Curiosity")).await.unwrap();
        let grit = storage.create_core_value(value("Grit")).await.unwrap();

        let member = storage
            .create_team_member(CreateTeamMemberRequest {
                name: "Ngozi".to_string(),
                role: "Lead instructor".to_string(),
                image: None,
                bio: None,
                linkedin: None,
                twitter: None,
                core_value_ids: vec![grit.id, curiosity.id, grit.id],
            })
            .await
            .unwrap();

        let detail = storage.get_team_member_detail(member.id).await.unwrap().unwrap();
        let titles: Vec<_> = detail.core_values.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Curiosity", "Grit"]);

        storage
            .update_team_member(
                member.id,
                UpdateTeamMemberRequest {
                    core_value_ids: Some(vec![grit.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let about = storage.get_about_us_detail().await.unwrap();
        assert_eq!(about.core_values.len(), 2);
        assert_eq!(about.team_members.len(), 1);
        assert_eq!(about.team_members[0].core_values.len(), 1);

        assert_eq!(
            storage
                .count_core_values_by_ids(&[curiosity.id, 999])
                .await
                .unwrap(),
            1
        );
    }
}
