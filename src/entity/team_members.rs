//! 团队成员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub about_us_id: i64,
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_team_member(self) -> crate::models::about::entities::TeamMember {
        crate::models::about::entities::TeamMember {
            id: self.id,
            about_us_id: self.about_us_id,
            name: self.name,
            role: self.role,
            image: self.image,
            bio: self.bio,
            linkedin: self.linkedin,
            twitter: self.twitter,
        }
    }
}
