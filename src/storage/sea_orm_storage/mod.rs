//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod about;
mod catalog;
mod cleanup;
mod community;
mod contact;
mod dashboard;
mod files;
mod learning;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{EvolvError, Result};
use crate::models::{PaginatedResponse, PaginationInfo, PaginationQuery};
use migration::{Migrator, MigratorTrait};
use sea_orm::sea_query::{Expr, ExprTrait, Func, IntoColumnRef};
use sea_orm::{
    Condition, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, Select, SqlErr,
};
use std::time::Duration;
use tracing::info;
use ts_rs::TS;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 使用已有连接创建存储实例，并执行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| EvolvError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite，单连接保证所有查询落在同一个库上
    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("连接内存数据库失败");
        Self::from_connection(db).await.expect("迁移内存数据库失败")
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EvolvError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| EvolvError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EvolvError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EvolvError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误转换：唯一约束冲突归为 Conflict，其余归为 DatabaseOperation
pub(crate) fn db_err(action: &'static str) -> impl FnOnce(DbErr) -> EvolvError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            EvolvError::conflict(format!("{action}: {msg}"))
        }
        _ => EvolvError::database_operation(format!("{action}: {e}")),
    }
}

/// 不区分大小写的等值匹配（邮箱）
pub(crate) fn lower_eq<C: IntoColumnRef>(col: C, value: &str) -> Condition {
    Condition::all().add(Expr::expr(Func::lower(Expr::col(col))).eq(value.trim().to_lowercase()))
}

/// 去重并保持首次出现的顺序
pub(crate) fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// 对查询做分页，并把模型映射为业务实体
pub(crate) async fn paginate_select<E, M, T, F>(
    db: &DatabaseConnection,
    select: Select<E>,
    pagination: &PaginationQuery,
    what: &str,
    map: F,
) -> Result<PaginatedResponse<T>>
where
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'static,
    T: TS,
    F: FnMut(M) -> T,
{
    let (page, size) = pagination.normalized();

    let paginator = select.paginate(db, size);
    let total = paginator
        .num_items()
        .await
        .map_err(|e| EvolvError::database_operation(format!("查询{what}总数失败: {e}")))?;

    let pages = paginator
        .num_pages()
        .await
        .map_err(|e| EvolvError::database_operation(format!("查询{what}页数失败: {e}")))?;

    let items = paginator
        .fetch_page(page - 1)
        .await
        .map_err(|e| EvolvError::database_operation(format!("查询{what}列表失败: {e}")))?;

    Ok(PaginatedResponse {
        items: items.into_iter().map(map).collect(),
        pagination: PaginationInfo::new(page, size, total, pages),
    })
}

/// 存储测试共用的数据构造
#[cfg(test)]
pub(crate) mod fixtures {
    use super::SeaOrmStorage;
    use crate::models::catalog::entities::{Category, Course, Location, LocationType};
    use crate::models::catalog::requests::{
        CreateCategoryRequest, CreateCourseRequest, CreateLocationRequest,
    };
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::{ProfileRole, User, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::{CatalogStorage, UserStorage};

    pub fn new_user(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            role: UserRole::User,
            profile_role: ProfileRole::Student,
            is_email_verified: false,
            verification_token: Some(format!("token-{username}")),
        }
    }

    pub async fn seed_user(storage: &SeaOrmStorage, username: &str) -> User {
        storage
            .create_user(new_user(username, &format!("{username}@example.com")))
            .await
            .unwrap()
    }

    pub async fn seed_category(storage: &SeaOrmStorage, name: &str) -> Category {
        storage
            .create_category(CreateCategoryRequest {
                name: name.to_string(),
                description: None,
                icon: None,
                image: None,
                color: None,
                is_active: true,
                order: 0,
            })
            .await
            .unwrap()
    }

    pub async fn seed_location(storage: &SeaOrmStorage, name: &str) -> Location {
        storage
            .create_location(CreateLocationRequest {
                name: name.to_string(),
                location_type: LocationType::Campus,
                online_region: None,
                country: Some("Nigeria".to_string()),
                state: Some("Lagos".to_string()),
            })
            .await
            .unwrap()
    }

    pub fn new_course(name: &str, category_id: i64) -> CreateCourseRequest {
        serde_json::from_value(serde_json::json!({
            "name": name,
            "category_id": category_id,
            "github": format!("https://github.com/evolv/{name}"),
            "discord": "https://discord.gg/evolv",
        }))
        .unwrap()
    }

    pub async fn seed_course(storage: &SeaOrmStorage, name: &str) -> Course {
        let category = seed_category(storage, &format!("{name} category")).await;
        storage
            .create_course(new_course(name, category.id))
            .await
            .unwrap()
    }

    pub fn new_application(email: &str, course_ids: Vec<i64>) -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "phone": "+2348000000000",
            "first_name": "Ada",
            "last_name": "Obi",
            "gender": "female",
            "birth_date": "2000-04-12",
            "zip_code": "100001",
            "country_of_birth": "NG",
            "nationality": "NG",
            "diploma_level": "bachelor",
            "job_status": "Unemployed",
            "motivation": "Build products",
            "future_goals": "Data engineer",
            "proudest_moment": "Graduating",
            "english_level": 4,
            "how_heard": "Friend",
            "has_laptop": true,
            "course_ids": course_ids,
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("evolv.db").unwrap(),
            "sqlite://evolv.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u:p@localhost/evolv").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }

    #[test]
    fn test_unique_ids_keeps_order() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(unique_ids(&[]).is_empty());
    }

    #[test]
    fn test_db_err_keeps_action() {
        let err = db_err("创建分类失败")(DbErr::Custom("boom".to_string()));
        assert!(!err.is_conflict());
        assert!(err.message().starts_with("创建分类失败"));
    }
}
