//! 学员选拔进度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_selections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub step_id: i64,
    pub status: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::selection_procedures::Entity",
        from = "Column::StepId",
        to = "super::selection_procedures::Column::Id"
    )]
    Step,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::selection_procedures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Step.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_selection(self) -> crate::models::students::entities::StudentSelection {
        use crate::models::students::entities::{SelectionStatus, StudentSelection};
        use chrono::{DateTime, Utc};

        StudentSelection {
            id: self.id,
            student_id: self.student_id,
            step_id: self.step_id,
            status: self
                .status
                .parse::<SelectionStatus>()
                .unwrap_or(SelectionStatus::Pending),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
