//! 授课地点实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub location_type: String,
    pub online_region: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_location(self) -> crate::models::catalog::entities::Location {
        use crate::models::catalog::entities::{Location, LocationType, OnlineRegion};
        use chrono::{DateTime, Utc};

        Location {
            id: self.id,
            name: self.name,
            location_type: self
                .location_type
                .parse::<LocationType>()
                .unwrap_or(LocationType::Campus),
            online_region: self
                .online_region
                .and_then(|r| r.parse::<OnlineRegion>().ok()),
            country: self.country,
            state: self.state,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }

    /// 展示用名称，例如 `Lagos Campus (campus)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.location_type)
    }
}
