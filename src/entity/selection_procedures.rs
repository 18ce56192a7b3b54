//! 选拔步骤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "selection_procedures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub step_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_procedure(self) -> crate::models::students::entities::SelectionProcedure {
        crate::models::students::entities::SelectionProcedure {
            id: self.id,
            step_name: self.step_name,
            description: self.description,
            order: self.sort_order,
        }
    }
}
