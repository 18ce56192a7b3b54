use sea_orm_migration::prelude::*;

use crate::tables::{
    Courses, Enrollments, Schedules, SelectionProcedures, StudentCourses, StudentSchedules,
    StudentSelections, Students, Users,
};
use crate::{id_col, index, unique, unique_pair};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 学生申请档案（与用户一对一，邮箱唯一）
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(id_col(Students::Id))
                    .col(ColumnDef::new(Students::UserId).big_integer().null().unique_key())
                    .col(ColumnDef::new(Students::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Students::Phone).string().not_null())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Gender).string().not_null())
                    .col(ColumnDef::new(Students::BirthDate).date().not_null())
                    .col(ColumnDef::new(Students::ZipCode).string().not_null())
                    .col(ColumnDef::new(Students::CountryOfBirth).string().not_null())
                    .col(ColumnDef::new(Students::Nationality).string().not_null())
                    .col(ColumnDef::new(Students::RegisterNumber).string().null())
                    .col(ColumnDef::new(Students::DiplomaLevel).string().not_null())
                    .col(ColumnDef::new(Students::JobStatus).string().not_null())
                    .col(ColumnDef::new(Students::Motivation).text().not_null())
                    .col(ColumnDef::new(Students::FutureGoals).text().not_null())
                    .col(ColumnDef::new(Students::ProudestMoment).text().not_null())
                    .col(ColumnDef::new(Students::EnglishLevel).integer().not_null())
                    .col(ColumnDef::new(Students::HowHeard).string().not_null())
                    .col(ColumnDef::new(Students::ReferralPerson).string().null())
                    .col(ColumnDef::new(Students::HasLaptop).boolean().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生-课程 多对多
        manager
            .create_table(
                Table::create()
                    .table(StudentCourses::Table)
                    .if_not_exists()
                    .col(id_col(StudentCourses::Id))
                    .col(ColumnDef::new(StudentCourses::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(StudentCourses::CourseId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentCourses::Table, StudentCourses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentCourses::Table, StudentCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生-排期 多对多
        manager
            .create_table(
                Table::create()
                    .table(StudentSchedules::Table)
                    .if_not_exists()
                    .col(id_col(StudentSchedules::Id))
                    .col(ColumnDef::new(StudentSchedules::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(StudentSchedules::ScheduleId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentSchedules::Table, StudentSchedules::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentSchedules::Table, StudentSchedules::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程报名
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(id_col(Enrollments::Id))
                    .col(ColumnDef::new(Enrollments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(ColumnDef::new(Enrollments::EnrolledAt).big_integer().not_null())
                    .col(ColumnDef::new(Enrollments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 选拔步骤
        manager
            .create_table(
                Table::create()
                    .table(SelectionProcedures::Table)
                    .if_not_exists()
                    .col(id_col(SelectionProcedures::Id))
                    .col(ColumnDef::new(SelectionProcedures::StepName).string().not_null())
                    .col(ColumnDef::new(SelectionProcedures::Description).text().null())
                    .col(
                        ColumnDef::new(SelectionProcedures::SortOrder)
                            .integer()
                            .not_null()
                            .default(0)
                    )
                    .to_owned(),
            )
            .await?;

        // 学生选拔进度
        manager
            .create_table(
                Table::create()
                    .table(StudentSelections::Table)
                    .if_not_exists()
                    .col(id_col(StudentSelections::Id))
                    .col(ColumnDef::new(StudentSelections::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(StudentSelections::StepId).big_integer().not_null())
                    .col(ColumnDef::new(StudentSelections::Status).string().not_null())
                    .col(ColumnDef::new(StudentSelections::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentSelections::Table, StudentSelections::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentSelections::Table, StudentSelections::StepId)
                            .to(SelectionProcedures::Table, SelectionProcedures::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(unique_pair(
                "uq_student_courses",
                StudentCourses::Table,
                StudentCourses::StudentId,
                StudentCourses::CourseId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_student_schedules",
                StudentSchedules::Table,
                StudentSchedules::StudentId,
                StudentSchedules::ScheduleId,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_enrollments_student_course",
                Enrollments::Table,
                Enrollments::StudentId,
                Enrollments::CourseId,
            ))
            .await?;
        manager
            .create_index(index(
                "idx_enrollments_status",
                Enrollments::Table,
                Enrollments::Status,
            ))
            .await?;
        manager
            .create_index(unique_pair(
                "uq_student_selections_student_step",
                StudentSelections::Table,
                StudentSelections::StudentId,
                StudentSelections::StepId,
            ))
            .await?;
        manager
            .create_index(unique(
                "uq_students_register_number",
                Students::Table,
                Students::RegisterNumber,
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentSelections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SelectionProcedures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}
