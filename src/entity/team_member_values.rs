//! 团队成员与价值观关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "team_member_core_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub team_member_id: i64,
    pub core_value_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_members::Entity",
        from = "Column::TeamMemberId",
        to = "super::team_members::Column::Id"
    )]
    TeamMember,
    #[sea_orm(
        belongs_to = "super::core_values::Entity",
        from = "Column::CoreValueId",
        to = "super::core_values::Column::Id"
    )]
    CoreValue,
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl Related<super::core_values::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoreValue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
