pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_accounts;
mod m20260101_000002_create_catalog;
mod m20260101_000003_create_students;
mod m20260101_000004_create_community;
mod tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_accounts::Migration),
            Box::new(m20260101_000002_create_catalog::Migration),
            Box::new(m20260101_000003_create_students::Migration),
            Box::new(m20260101_000004_create_community::Migration),
        ]
    }
}

/// 自增主键列
pub(crate) fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 建立普通索引
pub(crate) fn index<T, C>(name: &str, table: T, col: C) -> IndexCreateStatement
where
    T: IntoIden,
    C: IntoIden,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(col)
        .to_owned()
}

/// 建立单列唯一索引
pub(crate) fn unique<T, C>(name: &str, table: T, col: C) -> IndexCreateStatement
where
    T: IntoIden,
    C: IntoIden,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(col)
        .unique()
        .to_owned()
}

/// 建立两列唯一索引
pub(crate) fn unique_pair<T, A, B>(name: &str, table: T, a: A, b: B) -> IndexCreateStatement
where
    T: IntoIden,
    A: IntoIden,
    B: IntoIden,
{
    Index::create()
        .if_not_exists()
        .name(name)
        .table(table)
        .col(a)
        .col(b)
        .unique()
        .to_owned()
}
