use sea_orm_migration::prelude::*;

use crate::tables::{
    Categories, CourseLocations, CourseMaterials, CoursePartners, Courses, Lessons, Locations,
    Modules, Partners, Schedules, Users,
};
use crate::{id_col, index, unique_pair};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 课程分类
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id_col(Categories::Id))
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .col(ColumnDef::new(Categories::Icon).string().null())
                    .col(ColumnDef::new(Categories::Image).string().null())
                    .col(ColumnDef::new(Categories::Color).string().null())
                    .col(
                        ColumnDef::new(Categories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Categories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 地点
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(id_col(Locations::Id))
                    .col(
                        ColumnDef::new(Locations::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Locations::LocationType).string().not_null())
                    .col(ColumnDef::new(Locations::OnlineRegion).string().null())
                    .col(ColumnDef::new(Locations::Country).string().null())
                    .col(ColumnDef::new(Locations::State).string().null())
                    .col(
                        ColumnDef::new(Locations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 合作伙伴
        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(id_col(Partners::Id))
                    .col(
                        ColumnDef::new(Partners::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Partners::Description).text().null())
                    .col(ColumnDef::new(Partners::Website).string().null())
                    .col(ColumnDef::new(Partners::ContactEmail).string().null())
                    .col(
                        ColumnDef::new(Partners::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程（分类受保护，父课程级联，讲师置空）
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id_col(Courses::Id))
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::ParentId).big_integer().null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::SoftwareTools).text().null())
                    .col(ColumnDef::new(Courses::TopicsCovered).text().null())
                    .col(ColumnDef::new(Courses::InstructorId).big_integer().null())
                    .col(ColumnDef::new(Courses::RegistrationDeadline).date().null())
                    .col(ColumnDef::new(Courses::SelectionDate).date().null())
                    .col(ColumnDef::new(Courses::StartDate).date().null())
                    .col(ColumnDef::new(Courses::EndDate).date().null())
                    .col(ColumnDef::new(Courses::Github).string().null())
                    .col(ColumnDef::new(Courses::Discord).string().null())
                    .col(ColumnDef::new(Courses::VideoContent).string().null())
                    .col(ColumnDef::new(Courses::AdditionalMaterials).string().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::ParentId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::InstructorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程-地点 多对多
        manager
            .create_table(
                Table::create()
                    .table(CourseLocations::Table)
                    .if_not_exists()
                    .col(id_col(CourseLocations::Id))
                    .col(
                        ColumnDef::new(CourseLocations::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseLocations::LocationId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseLocations::Table, CourseLocations::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseLocations::Table, CourseLocations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程-合作伙伴 多对多
        manager
            .create_table(
                Table::create()
                    .table(CoursePartners::Table)
                    .if_not_exists()
                    .col(id_col(CoursePartners::Id))
                    .col(
                        ColumnDef::new(CoursePartners::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoursePartners::PartnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePartners::Table, CoursePartners::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CoursePartners::Table, CoursePartners::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程资料
        manager
            .create_table(
                Table::create()
                    .table(CourseMaterials::Table)
                    .if_not_exists()
                    .col(id_col(CourseMaterials::Id))
                    .col(
                        ColumnDef::new(CourseMaterials::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseMaterials::Title).string().not_null())
                    .col(ColumnDef::new(CourseMaterials::Description).text().null())
                    .col(
                        ColumnDef::new(CourseMaterials::MaterialType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::FileToken)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::UploadedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMaterials::Table, CourseMaterials::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseMaterials::Table, CourseMaterials::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 学习排期
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(id_col(Schedules::Id))
                    .col(ColumnDef::new(Schedules::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::StartDate).date().not_null())
                    .col(ColumnDef::new(Schedules::EndDate).date().not_null())
                    .col(ColumnDef::new(Schedules::InstructorId).big_integer().null())
                    .col(
                        ColumnDef::new(Schedules::LocationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schedules::DurationMonths).integer().not_null())
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::InstructorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 模块
        manager
            .create_table(
                Table::create()
                    .table(Modules::Table)
                    .if_not_exists()
                    .col(id_col(Modules::Id))
                    .col(ColumnDef::new(Modules::ScheduleId).big_integer().not_null())
                    .col(ColumnDef::new(Modules::Title).string().not_null())
                    .col(ColumnDef::new(Modules::Description).text().null())
                    .col(ColumnDef::new(Modules::SortOrder).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Modules::Table, Modules::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课时
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(id_col(Lessons::Id))
                    .col(ColumnDef::new(Lessons::ModuleId).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::Description).text().null())
                    .col(ColumnDef::new(Lessons::Content).text().null())
                    .col(ColumnDef::new(Lessons::ResourcesUrl).string().null())
                    .col(
                        ColumnDef::new(Lessons::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::ModuleId)
                            .to(Modules::Table, Modules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(index(
                "idx_courses_category_id",
                Courses::Table,
                Courses::CategoryId,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_courses_parent_id",
                Courses::Table,
                Courses::ParentId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_course_locations",
                CourseLocations::Table,
                CourseLocations::CourseId,
                CourseLocations::LocationId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_course_partners",
                CoursePartners::Table,
                CoursePartners::CourseId,
                CoursePartners::PartnerId,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_course_materials_course_id",
                CourseMaterials::Table,
                CourseMaterials::CourseId,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_schedules_course_id",
                Schedules::Table,
                Schedules::CourseId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_modules_schedule_order",
                Modules::Table,
                Modules::ScheduleId,
                Modules::SortOrder,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_lessons_module_id",
                Lessons::Table,
                Lessons::ModuleId,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Modules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoursePartners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseLocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Partners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}
