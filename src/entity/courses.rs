//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub parent_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub software_tools: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub topics_covered: Option<String>,
    pub instructor_id: Option<i64>,
    pub registration_deadline: Option<Date>,
    pub selection_date: Option<Date>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub github: Option<String>,
    pub discord: Option<String>,
    pub video_content: Option<String>,
    pub additional_materials: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::catalog::entities::Course {
        use crate::models::catalog::entities::Course;
        use chrono::{DateTime, Utc};

        Course {
            id: self.id,
            name: self.name,
            category_id: self.category_id,
            parent_id: self.parent_id,
            description: self.description,
            software_tools: self.software_tools,
            topics_covered: self.topics_covered,
            instructor_id: self.instructor_id,
            registration_deadline: self.registration_deadline,
            selection_date: self.selection_date,
            start_date: self.start_date,
            end_date: self.end_date,
            github: self.github,
            discord: self.discord,
            video_content: self.video_content,
            additional_materials: self.additional_materials,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
