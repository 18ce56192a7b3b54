//! 关于我们实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "about_us")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub mission: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vision: Option<String>,
    pub image: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_about_us(self) -> crate::models::about::entities::AboutUs {
        use crate::models::about::entities::AboutUs;
        use chrono::{DateTime, Utc};

        AboutUs {
            id: self.id,
            title: self.title,
            description: self.description,
            mission: self.mission,
            vision: self.vision,
            image: self.image,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
