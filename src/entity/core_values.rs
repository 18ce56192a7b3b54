//! 核心价值观实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "core_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub about_us_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_core_value(self) -> crate::models::about::entities::CoreValue {
        crate::models::about::entities::CoreValue {
            id: self.id,
            about_us_id: self.about_us_id,
            title: self.title,
            description: self.description,
        }
    }
}
