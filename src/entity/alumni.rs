//! 校友实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "alumni")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub graduation_year: i32,
    pub current_position: String,
    #[sea_orm(column_type = "Text")]
    pub success_story: String,
    pub course_id: Option<i64>,
    pub location_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_alumni(self) -> crate::models::community::entities::Alumni {
        crate::models::community::entities::Alumni {
            id: self.id,
            user_id: self.user_id,
            graduation_year: self.graduation_year,
            current_position: self.current_position,
            success_story: self.success_story,
            course_id: self.course_id,
            location_id: self.location_id,
        }
    }
}
