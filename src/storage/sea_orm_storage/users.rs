use super::{SeaOrmStorage, db_err, lower_eq, paginate_select};
use crate::entity::profiles::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as Profiles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{EvolvError, Result};
use crate::models::users::{
    entities::{Profile, ProfileRole, User, UserStatus},
    requests::{CreateUserRequest, UpdateProfileRequest, UpdateUserRequest, UserListQuery},
    responses::UserListResponse,
};
use crate::storage::UserStorage;
use crate::utils::contains_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

#[async_trait]
impl UserStorage for SeaOrmStorage {
    /// 创建用户和资料
    async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let sent_at = req.verification_token.as_ref().map(|_| now);

        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let user = ActiveModel {
            username: Set(req.username),
            email: Set(req.email.trim().to_lowercase()),
            password_hash: Set(req.password_hash),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            is_email_verified: Set(req.is_email_verified),
            email_verification_token: Set(req.verification_token),
            email_verification_sent_at: Set(sent_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建用户失败"))?;

        ProfileActiveModel {
            user_id: Set(user.id),
            role: Set(req.profile_role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err("创建用户资料失败"))?;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        Ok(user.into_user())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(lower_eq(Column::Email, email))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(lower_eq(Column::Email, identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_verification_token(&self, token: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::EmailVerificationToken.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询验证令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = contains_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(pattern.clone()))
                    .add(Column::Email.like(pattern.clone()))
                    .add(Column::FirstName.like(pattern.clone()))
                    .add(Column::LastName.like(pattern)),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(verified) = query.is_email_verified {
            select = select.filter(Column::IsEmailVerified.eq(verified));
        }

        select = select.order_by_desc(Column::CreatedAt);

        paginate_select(&self.db, select, &query.pagination, "用户", |m| m.into_user()).await
    }

    /// 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        if self.get_user_by_id(id).await?.is_none() {
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
        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }
        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(verified) = update.is_email_verified {
            model.is_email_verified = Set(verified);
            if verified {
                model.email_verification_token = Set(None);
                model.email_verification_sent_at = Set(None);
            }
        }

        let updated = model.update(&self.db).await.map_err(db_err("更新用户失败"))?;

        Ok(Some(updated.into_user()))
    }

    /// 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn set_verification_token(&self, id: i64, token: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                Column::EmailVerificationToken,
                sea_orm::sea_query::Expr::value(token),
            )
            .col_expr(
                Column::EmailVerificationSentAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("写入验证令牌失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn mark_email_verified(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::IsEmailVerified, sea_orm::sea_query::Expr::value(true))
            .col_expr(
                Column::EmailVerificationToken,
                sea_orm::sea_query::Expr::value(Option::<String>::None),
            )
            .col_expr(
                Column::EmailVerificationSentAt,
                sea_orm::sea_query::Expr::value(Option::<i64>::None),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("标记邮箱已验证失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    async fn count_users(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("统计用户数量失败: {e}")))
    }

    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 更新资料；老用户没有资料时补建一条
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
        role: Option<ProfileRole>,
    ) -> Result<Option<Profile>> {
        let now = chrono::Utc::now().timestamp();

        let existing = Profiles::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户资料失败: {e}")))?;

        let (mut model, is_new) = match existing {
            Some(profile) => (
                ProfileActiveModel {
                    id: Set(profile.id),
                    updated_at: Set(now),
                    ..Default::default()
                },
                false,
            ),
            None => {
                if self.get_user_by_id(user_id).await?.is_none() {
                    return Ok(None);
                }
                (
                    ProfileActiveModel {
                        user_id: Set(user_id),
                        role: Set(ProfileRole::Student.to_string()),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    },
                    true,
                )
            }
        };

        if let Some(role) = role {
            model.role = Set(role.to_string());
        }
        if let Some(picture) = update.picture {
            model.picture = Set(Some(picture).filter(|s| !s.is_empty()));
        }
        if let Some(title) = update.title {
            model.title = Set(Some(title));
        }
        if let Some(bio) = update.bio {
            model.bio = Set(Some(bio));
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email).filter(|s| !s.is_empty()));
        }
        if let Some(twitter) = update.twitter {
            model.twitter = Set(Some(twitter));
        }
        if let Some(linkedin) = update.linkedin {
            model.linkedin = Set(Some(linkedin));
        }

        let saved = if is_new {
            model.insert(&self.db).await
        } else {
            model.update(&self.db).await
        }
        .map_err(db_err("更新用户资料失败"))?;

        Ok(Some(saved.into_profile()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationQuery;
    use crate::storage::sea_orm_storage::fixtures::new_user;

    #[tokio::test]
    async fn test_create_user_with_profile() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage
            .create_user(new_user("ada", "Ada@Example.com"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert!(user.email_verification_sent_at.is_some());
        let profile = storage.get_profile_by_user_id(user.id).await.unwrap().unwrap();
        assert_eq!(profile.role, ProfileRole::Student);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let storage = SeaOrmStorage::in_memory().await;
        storage.create_user(new_user("ada", "ada@example.com")).await.unwrap();

        assert!(storage.get_user_by_email("ADA@example.COM").await.unwrap().is_some());
        assert!(
            storage
                .get_user_by_username_or_email("Ada@Example.com")
                .await
                .unwrap()
                .is_some()
        );
        assert!(storage.get_user_by_username_or_email("ada").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await;
        storage.create_user(new_user("ada", "ada@example.com")).await.unwrap();

        let err = storage
            .create_user(new_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_verification_lifecycle() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage.create_user(new_user("ada", "ada@example.com")).await.unwrap();

        let found = storage
            .get_user_by_verification_token("token-ada")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(storage.mark_email_verified(user.id).await.unwrap());
        let verified = storage.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(verified.is_email_verified);
        assert!(verified.email_verification_token.is_none());
        assert!(verified.email_verification_sent_at.is_none());
        assert!(
            storage
                .get_user_by_verification_token("token-ada")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_verified_and_search() {
        let storage = SeaOrmStorage::in_memory().await;
        let ada = storage.create_user(new_user("ada", "ada@example.com")).await.unwrap();
        storage.create_user(new_user("bola", "bola@example.com")).await.unwrap();
        storage.mark_email_verified(ada.id).await.unwrap();

        let verified = storage
            .list_users_with_pagination(UserListQuery {
                is_email_verified: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(verified.pagination.total, 1);
        assert_eq!(verified.items[0].username, "ada");

        let searched = storage
            .list_users_with_pagination(UserListQuery {
                pagination: PaginationQuery { page: 1, size: 10 },
                search: Some("bol".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].username, "bola");
    }

    #[tokio::test]
    async fn test_update_profile_keeps_unset_fields() {
        let storage = SeaOrmStorage::in_memory().await;
        let user = storage.create_user(new_user("ada", "ada@example.com")).await.unwrap();

        storage
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    title: Some("Data mentor".to_string()),
                    ..Default::default()
                },
                Some(ProfileRole::Instructor),
            )
            .await
            .unwrap();
        let profile = storage
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    bio: Some("Ten years in analytics".to_string()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(profile.title.as_deref(), Some("Data mentor"));
        assert_eq!(profile.role, ProfileRole::Instructor);
        let missing = storage
            .update_profile(999, UpdateProfileRequest::default(), None)
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
