//! 评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub about_us_id: Option<i64>,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub review_text: String,
    pub course_id: Option<i64>,
    pub alumni_id: Option<i64>,
    pub rating: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_review(self) -> crate::models::community::entities::Review {
        use crate::models::community::entities::Review;
        use chrono::{DateTime, Utc};

        Review {
            id: self.id,
            about_us_id: self.about_us_id,
            name: self.name,
            review_text: self.review_text,
            course_id: self.course_id,
            alumni_id: self.alumni_id,
            rating: self.rating,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
