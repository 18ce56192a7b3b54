//! 学员申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: Option<i64>,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: Date,
    pub zip_code: String,
    pub country_of_birth: String,
    pub nationality: String,
    pub register_number: Option<String>,
    pub diploma_level: String,
    pub job_status: String,
    #[sea_orm(column_type = "Text")]
    pub motivation: String,
    #[sea_orm(column_type = "Text")]
    pub future_goals: String,
    #[sea_orm(column_type = "Text")]
    pub proudest_moment: String,
    pub english_level: i32,
    pub how_heard: String,
    pub referral_person: Option<String>,
    pub has_laptop: bool,
    pub created_at: i64,
    pub updated_at: i64,
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
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{DiplomaLevel, Gender, Student};
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            user_id: self.user_id,
            email: self.email,
            phone: self.phone,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            birth_date: self.birth_date,
            zip_code: self.zip_code,
            country_of_birth: self.country_of_birth,
            nationality: self.nationality,
            register_number: self.register_number,
            diploma_level: self
                .diploma_level
                .parse::<DiplomaLevel>()
                .unwrap_or(DiplomaLevel::NoOption),
            job_status: self.job_status,
            motivation: self.motivation,
            future_goals: self.future_goals,
            proudest_moment: self.proudest_moment,
            english_level: self.english_level,
            how_heard: self.how_heard,
            referral_person: self.referral_person,
            has_laptop: self.has_laptop,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
