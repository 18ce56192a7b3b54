use sea_orm_migration::prelude::*;

use crate::tables::{
    AboutUs, Alumni, ContactMessages, CoreValues, Courses, EventAttendance, EventPartners, Events,
    Locations, Partners, Reviews, Students, TeamMemberValues, TeamMembers, Users,
};
use crate::{id_col, index, unique_pair};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 活动
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(id_col(Events::Id))
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).text().not_null())
                    .col(ColumnDef::new(Events::EventDate).big_integer().not_null())
                    .col(ColumnDef::new(Events::LocationId).big_integer().null())
                    .col(ColumnDef::new(Events::CourseId).big_integer().null())
                    .col(ColumnDef::new(Events::IsVirtual).boolean().not_null().default(false))
                    .col(ColumnDef::new(Events::Image).string().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Events::Table, Events::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动-合作伙伴 多对多
        manager
            .create_table(
                Table::create()
                    .table(EventPartners::Table)
                    .if_not_exists()
                    .col(id_col(EventPartners::Id))
                    .col(ColumnDef::new(EventPartners::EventId).big_integer().not_null())
                    .col(ColumnDef::new(EventPartners::PartnerId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventPartners::Table, EventPartners::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventPartners::Table, EventPartners::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动出勤
        manager
            .create_table(
                Table::create()
                    .table(EventAttendance::Table)
                    .if_not_exists()
                    .col(id_col(EventAttendance::Id))
                    .col(ColumnDef::new(EventAttendance::EventId).big_integer().not_null())
                    .col(ColumnDef::new(EventAttendance::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(EventAttendance::Attended)
                            .boolean()
                            .not_null()
                            .default(false)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventAttendance::Table, EventAttendance::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventAttendance::Table, EventAttendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 校友
        manager
            .create_table(
                Table::create()
                    .table(Alumni::Table)
                    .if_not_exists()
                    .col(id_col(Alumni::Id))
                    .col(ColumnDef::new(Alumni::UserId).big_integer().not_null().unique_key())
                    .col(ColumnDef::new(Alumni::GraduationYear).integer().not_null())
                    .col(ColumnDef::new(Alumni::CurrentPosition).string().not_null())
                    .col(ColumnDef::new(Alumni::SuccessStory).text().not_null())
                    .col(ColumnDef::new(Alumni::CourseId).big_integer().null())
                    .col(ColumnDef::new(Alumni::LocationId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alumni::Table, Alumni::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alumni::Table, Alumni::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alumni::Table, Alumni::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 关于我们（单例）
        manager
            .create_table(
                Table::create()
                    .table(AboutUs::Table)
                    .if_not_exists()
                    .col(id_col(AboutUs::Id))
                    .col(ColumnDef::new(AboutUs::Title).string().not_null())
                    .col(ColumnDef::new(AboutUs::Description).text().not_null())
                    .col(ColumnDef::new(AboutUs::Mission).text().null())
                    .col(ColumnDef::new(AboutUs::Vision).text().null())
                    .col(ColumnDef::new(AboutUs::Image).string().null())
                    .col(ColumnDef::new(AboutUs::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 核心价值
        manager
            .create_table(
                Table::create()
                    .table(CoreValues::Table)
                    .if_not_exists()
                    .col(id_col(CoreValues::Id))
                    .col(ColumnDef::new(CoreValues::AboutUsId).big_integer().not_null())
                    .col(ColumnDef::new(CoreValues::Title).string().not_null())
                    .col(ColumnDef::new(CoreValues::Description).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoreValues::Table, CoreValues::AboutUsId)
                            .to(AboutUs::Table, AboutUs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 团队成员
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(id_col(TeamMembers::Id))
                    .col(ColumnDef::new(TeamMembers::AboutUsId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::Name).string().not_null())
                    .col(ColumnDef::new(TeamMembers::Role).string().not_null())
                    .col(ColumnDef::new(TeamMembers::Image).string().null())
                    .col(ColumnDef::new(TeamMembers::Bio).text().null())
                    .col(ColumnDef::new(TeamMembers::Linkedin).string().null())
                    .col(ColumnDef::new(TeamMembers::Twitter).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::AboutUsId)
                            .to(AboutUs::Table, AboutUs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 团队成员-核心价值 多对多
        manager
            .create_table(
                Table::create()
                    .table(TeamMemberValues::Table)
                    .if_not_exists()
                    .col(id_col(TeamMemberValues::Id))
                    .col(ColumnDef::new(TeamMemberValues::TeamMemberId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMemberValues::CoreValueId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMemberValues::Table, TeamMemberValues::TeamMemberId)
                            .to(TeamMembers::Table, TeamMembers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMemberValues::Table, TeamMemberValues::CoreValueId)
                            .to(CoreValues::Table, CoreValues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 评价
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(id_col(Reviews::Id))
                    .col(ColumnDef::new(Reviews::AboutUsId).big_integer().null())
                    .col(ColumnDef::new(Reviews::Name).string().not_null())
                    .col(ColumnDef::new(Reviews::ReviewText).text().not_null())
                    .col(ColumnDef::new(Reviews::CourseId).big_integer().null())
                    .col(ColumnDef::new(Reviews::AlumniId).big_integer().null())
                    .col(ColumnDef::new(Reviews::Rating).integer().not_null().default(5))
                    .col(ColumnDef::new(Reviews::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::AboutUsId)
                            .to(AboutUs::Table, AboutUs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reviews::Table, Reviews::AlumniId)
                            .to(Alumni::Table, Alumni::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 联系留言（邮箱唯一）
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(id_col(ContactMessages::Id))
                    .col(ColumnDef::new(ContactMessages::Name).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(ColumnDef::new(ContactMessages::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(index(
                "idx_events_event_date",
                Events::Table,
                Events::EventDate,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_event_partners",
                EventPartners::Table,
                EventPartners::EventId,
                EventPartners::PartnerId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_event_attendance_event_student",
                EventAttendance::Table,
                EventAttendance::EventId,
                EventAttendance::StudentId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_core_values_about_title",
                CoreValues::Table,
                CoreValues::AboutUsId,
                CoreValues::Title,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_team_member_values",
                TeamMemberValues::Table,
                TeamMemberValues::TeamMemberId,
                TeamMemberValues::CoreValueId,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_reviews_course_id",
                Reviews::Table,
                Reviews::CourseId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMemberValues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoreValues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AboutUs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alumni::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventPartners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        Ok(())
    }
}
