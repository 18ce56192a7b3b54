//! 文件存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{EvolvError, Result};
use crate::models::files::entities::File;
use crate::storage::FileStorage;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

#[async_trait]
impl FileStorage for SeaOrmStorage {
    /// 创建文件记录
    async fn create_file(
        &self,
        token: &str,
        original_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: Option<i64>,
    ) -> Result<File> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            token: Set(token.to_string()),
            original_name: Set(original_name.to_string()),
            file_size: Set(file_size),
            file_type: Set(file_type.to_string()),
            uploaded_at: Set(now),
            user_id: Set(user_id),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("创建文件记录失败"))?;

        Ok(result.into_file())
    }

    /// 通过 token 获取文件
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::fixtures::seed_user;

    #[tokio::test]
    async fn test_file_record_roundtrip() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = seed_user(&storage, "ada").await;

        storage
            .create_file("tok-1", "poster.png", 2048, "image/png", Some(user.id))
            .await
            .unwrap();

        let file = storage.get_file_by_token("tok-1").await.unwrap().unwrap();
        assert_eq!(file.original_name, "poster.png");
        assert_eq!(file.user_id, Some(user.id));
        assert!(storage.get_file_by_token("missing").await.unwrap().is_none());
    }
}
