//! 联系我们留言存储操作

use super::{SeaOrmStorage, db_err, lower_eq, paginate_select};
use crate::entity::contact_messages::{ActiveModel, Column, Entity as ContactMessages};
use crate::errors::{EvolvError, Result};
use crate::models::contact::{
    entities::ContactMessage,
    requests::{ContactListQuery, CreateContactRequest},
    responses::ContactListResponse,
};
use crate::storage::ContactStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

#[async_trait]
impl ContactStorage for SeaOrmStorage {
    /// 保存留言；同一邮箱只能留言一次
    async fn create_contact(&self, req: CreateContactRequest) -> Result<ContactMessage> {
        let now = chrono::Utc::now().timestamp();

        let result = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_lowercase()),
            message: Set(req.message),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err("保存留言失败"))?;

        Ok(result.into_contact())
    }

    async fn get_contact_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let result = ContactMessages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询留言失败: {e}")))?;

        Ok(result.map(|m| m.into_contact()))
    }

    async fn get_contact_by_email(&self, email: &str) -> Result<Option<ContactMessage>> {
        let result = ContactMessages::find()
            .filter(lower_eq(Column::Email, email))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询留言失败: {e}")))?;

        Ok(result.map(|m| m.into_contact()))
    }

    async fn list_contacts_with_pagination(
        &self,
        query: ContactListQuery,
    ) -> Result<ContactListResponse> {
        let mut select = ContactMessages::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::Message.like(pattern)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        paginate_select(&self.db, select, &query.pagination, "留言", |m| {
            m.into_contact()
        })
        .await
    }

    async fn delete_contact(&self, id: i64) -> Result<bool> {
        let result = ContactMessages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("删除留言失败"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(email: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: "Kemi".to_string(),
            email: email.to_string(),
            message: "When does the next cohort start?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_one_message_per_email() {
        let storage = SeaOrmStorage::in_memory().await;
        let saved = storage.create_contact(message("Kemi@Example.com")).await.unwrap();
        assert_eq!(saved.email, "kemi@example.com");

        let err = storage
            .create_contact(message("kemi@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let found = storage.get_contact_by_email("KEMI@example.com").await.unwrap();
        assert_eq!(found.map(|m| m.id), Some(saved.id));
    }

    #[tokio::test]
    async fn test_search_and_delete() {
        let storage = SeaOrmStorage::in_memory().await;
        let saved = storage.create_contact(message("kemi@example.com")).await.unwrap();
        storage.create_contact(message("tunde@example.com")).await.unwrap();

        let found = storage
            .list_contacts_with_pagination(ContactListQuery {
                search: Some("tunde".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.pagination.total, 1);

        assert!(storage.delete_contact(saved.id).await.unwrap());
        assert!(storage.get_contact_by_id(saved.id).await.unwrap().is_none());
    }
}
