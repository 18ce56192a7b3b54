//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub material_type: String,
    pub file_token: String,
    pub file_size: i64,
    pub uploaded_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::catalog::entities::CourseMaterial {
        use crate::models::catalog::entities::{CourseMaterial, MaterialType};
        use chrono::{DateTime, Utc};

        CourseMaterial {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            material_type: self
                .material_type
                .parse::<MaterialType>()
                .unwrap_or(MaterialType::Other),
            file_token: self.file_token,
            file_size: self.file_size,
            uploaded_by: self.uploaded_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
