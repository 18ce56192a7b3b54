//! 账号足迹清理
//!
//! 删除用户时连带清理学员档案、校友记录、留言和资料，所有删除落在同一事务中。
//! 关联表（报名、选课、排期、选拔进度）依赖外键级联。

use super::{SeaOrmStorage, db_err, lower_eq};
use crate::entity::alumni::{Column as AlumniColumn, Entity as AlumniEntity};
use crate::entity::contact_messages::{Column as ContactColumn, Entity as ContactMessages};
use crate::entity::profiles::{Column as ProfileColumn, Entity as Profiles};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users, Model as UserModel};
use crate::errors::{EvolvError, Result};
use crate::models::users::responses::FootprintPurgeReport;
use crate::storage::CleanupStorage;
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter, TransactionTrait,
};
use tracing::info;

/// 在事务内清理单个用户
async fn purge_user(txn: &DatabaseTransaction, user: &UserModel) -> Result<FootprintPurgeReport> {
    let students = Students::delete_many()
        .filter(
            Condition::any()
                .add(StudentColumn::UserId.eq(user.id))
                .add(lower_eq(StudentColumn::Email, &user.email)),
        )
        .exec(txn)
        .await
        .map_err(db_err("删除学员档案失败"))?;

    let alumni = AlumniEntity::delete_many()
        .filter(AlumniColumn::UserId.eq(user.id))
        .exec(txn)
        .await
        .map_err(db_err("删除校友记录失败"))?;

    let contacts = ContactMessages::delete_many()
        .filter(lower_eq(ContactColumn::Email, &user.email))
        .exec(txn)
        .await
        .map_err(db_err("删除留言失败"))?;

    let profiles = Profiles::delete_many()
        .filter(ProfileColumn::UserId.eq(user.id))
        .exec(txn)
        .await
        .map_err(db_err("删除用户资料失败"))?;

    let users = Users::delete_by_id(user.id)
        .exec(txn)
        .await
        .map_err(db_err("删除用户失败"))?;

    Ok(FootprintPurgeReport {
        users: users.rows_affected,
        profiles: profiles.rows_affected,
        students: students.rows_affected,
        alumni: alumni.rows_affected,
        contact_messages: contacts.rows_affected,
    })
}

#[async_trait]
impl CleanupStorage for SeaOrmStorage {
    async fn purge_user_footprint(&self, user_id: i64) -> Result<FootprintPurgeReport> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let user = Users::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(user) = user else {
            return Ok(FootprintPurgeReport::default());
        };

        let report = purge_user(&txn, &user).await?;
        txn.commit().await.map_err(db_err("提交事务失败"))?;

        info!(user_id, removed = report.total(), "用户足迹已清理");
        Ok(report)
    }

    async fn purge_email(&self, email: &str) -> Result<FootprintPurgeReport> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let users = Users::find()
            .filter(lower_eq(UserColumn::Email, email))
            .all(&txn)
            .await
            .map_err(|e| EvolvError::database_operation(format!("查询用户失败: {e}")))?;

        let mut report = FootprintPurgeReport::default();
        for user in &users {
            report.absorb(purge_user(&txn, user).await?);
        }

        // 没有账号的申请和留言
        let students = Students::delete_many()
            .filter(lower_eq(StudentColumn::Email, email))
            .exec(&txn)
            .await
            .map_err(db_err("删除学员档案失败"))?;
        let contacts = ContactMessages::delete_many()
            .filter(lower_eq(ContactColumn::Email, email))
            .exec(&txn)
            .await
            .map_err(db_err("删除留言失败"))?;
        report.students += students.rows_affected;
        report.contact_messages += contacts.rows_affected;

        txn.commit().await.map_err(db_err("提交事务失败"))?;

        if report.total() > 0 {
            info!(removed = report.total(), "邮箱占用已释放");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::community::requests::CreateAlumniRequest;
    use crate::models::contact::requests::CreateContactRequest;
    use crate::storage::sea_orm_storage::fixtures::{new_application, seed_course, seed_user};
    use crate::storage::{CommunityStorage, ContactStorage, StudentStorage, UserStorage};

    fn contact(email: &str) -> CreateContactRequest {
        CreateContactRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn test_purge_user_footprint() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Web").await;
        let ada = seed_user(&storage, "ada").await;
        let other = seed_user(&storage, "bo").await;

        let student = storage
            .create_application(ada.id, new_application("ada@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        storage
            .create_alumni(CreateAlumniRequest {
                user_id: ada.id,
                graduation_year: 2025,
                current_position: "Engineer".to_string(),
                success_story: "Shipped".to_string(),
                course_id: Some(course.id),
                location_id: None,
            })
            .await
            .unwrap();
        storage.create_contact(contact("ADA@example.com")).await.unwrap();

        let report = storage.purge_user_footprint(ada.id).await.unwrap();
        assert_eq!(
            report,
            FootprintPurgeReport {
                users: 1,
                profiles: 1,
                students: 1,
                alumni: 1,
                contact_messages: 1,
            }
        );

        assert!(storage.get_user_by_id(ada.id).await.unwrap().is_none());
        assert!(storage.get_student_by_id(student.id).await.unwrap().is_none());
        assert!(storage.get_contact_by_email("ada@example.com").await.unwrap().is_none());
        assert!(storage.get_user_by_id(other.id).await.unwrap().is_some());

        // 再次清理不报错
        let again = storage.purge_user_footprint(ada.id).await.unwrap();
        assert_eq!(again.total(), 0);
    }

    #[tokio::test]
    async fn test_purge_email_without_account() {
        let storage = SeaOrmStorage::in_memory().await;
        let course = seed_course(&storage, "Data").await;
        let owner = seed_user(&storage, "owner").await;

        // 申请邮箱与账号邮箱不同
        storage
            .create_application(owner.id, new_application("guest@example.com", vec![course.id]), 2026)
            .await
            .unwrap();
        storage.create_contact(contact("guest@example.com")).await.unwrap();

        let report = storage.purge_email("Guest@Example.com").await.unwrap();
        assert_eq!(report.users, 0);
        assert_eq!(report.students, 1);
        assert_eq!(report.contact_messages, 1);

        assert!(storage.get_student_by_email("guest@example.com").await.unwrap().is_none());
        assert!(storage.get_user_by_id(owner.id).await.unwrap().is_some());
    }
}
