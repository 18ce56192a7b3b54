//! 表与列标识符

use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
pub enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Role,
    Status,
    IsEmailVerified,
    EmailVerificationToken,
    EmailVerificationSentAt,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Profiles {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    UserId,
    Role,
    Picture,
    Title,
    Bio,
    Email,
    Twitter,
    Linkedin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Files {
    #[sea_orm(iden = "files")]
    Table,
    Token,
    OriginalName,
    FileSize,
    FileType,
    UploadedAt,
    UserId,
}

#[derive(DeriveIden)]
pub enum Categories {
    #[sea_orm(iden = "course_categories")]
    Table,
    Id,
    Name,
    Description,
    Icon,
    Image,
    Color,
    IsActive,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Locations {
    #[sea_orm(iden = "locations")]
    Table,
    Id,
    Name,
    LocationType,
    OnlineRegion,
    Country,
    State,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Partners {
    #[sea_orm(iden = "partners")]
    Table,
    Id,
    Name,
    Description,
    Website,
    ContactEmail,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Name,
    CategoryId,
    ParentId,
    Description,
    SoftwareTools,
    TopicsCovered,
    InstructorId,
    RegistrationDeadline,
    SelectionDate,
    StartDate,
    EndDate,
    Github,
    Discord,
    VideoContent,
    AdditionalMaterials,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CourseLocations {
    #[sea_orm(iden = "course_locations")]
    Table,
    Id,
    CourseId,
    LocationId,
}

#[derive(DeriveIden)]
pub enum CoursePartners {
    #[sea_orm(iden = "course_partners")]
    Table,
    Id,
    CourseId,
    PartnerId,
}

#[derive(DeriveIden)]
pub enum CourseMaterials {
    #[sea_orm(iden = "course_materials")]
    Table,
    Id,
    CourseId,
    Title,
    Description,
    MaterialType,
    FileToken,
    FileSize,
    UploadedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Schedules {
    #[sea_orm(iden = "learning_schedules")]
    Table,
    Id,
    CourseId,
    StartDate,
    EndDate,
    InstructorId,
    LocationId,
    DurationMonths,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Modules {
    #[sea_orm(iden = "modules")]
    Table,
    Id,
    ScheduleId,
    Title,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
pub enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    ModuleId,
    Title,
    Description,
    Content,
    ResourcesUrl,
    SortOrder,
}

#[derive(DeriveIden)]
pub enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    UserId,
    Email,
    Phone,
    FirstName,
    LastName,
    Gender,
    BirthDate,
    ZipCode,
    CountryOfBirth,
    Nationality,
    RegisterNumber,
    DiplomaLevel,
    JobStatus,
    Motivation,
    FutureGoals,
    ProudestMoment,
    EnglishLevel,
    HowHeard,
    ReferralPerson,
    HasLaptop,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum StudentCourses {
    #[sea_orm(iden = "student_courses")]
    Table,
    Id,
    StudentId,
    CourseId,
}

#[derive(DeriveIden)]
pub enum StudentSchedules {
    #[sea_orm(iden = "student_schedules")]
    Table,
    Id,
    StudentId,
    ScheduleId,
}

#[derive(DeriveIden)]
pub enum Enrollments {
    #[sea_orm(iden = "course_enrollments")]
    Table,
    Id,
    StudentId,
    CourseId,
    Status,
    EnrolledAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum SelectionProcedures {
    #[sea_orm(iden = "selection_procedures")]
    Table,
    Id,
    StepName,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
pub enum StudentSelections {
    #[sea_orm(iden = "student_selections")]
    Table,
    Id,
    StudentId,
    StepId,
    Status,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    Title,
    Description,
    EventDate,
    LocationId,
    CourseId,
    IsVirtual,
    Image,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum EventPartners {
    #[sea_orm(iden = "event_partners")]
    Table,
    Id,
    EventId,
    PartnerId,
}

#[derive(DeriveIden)]
pub enum EventAttendance {
    #[sea_orm(iden = "event_attendance")]
    Table,
    Id,
    EventId,
    StudentId,
    Attended,
}

#[derive(DeriveIden)]
pub enum Alumni {
    #[sea_orm(iden = "alumni")]
    Table,
    Id,
    UserId,
    GraduationYear,
    CurrentPosition,
    SuccessStory,
    CourseId,
    LocationId,
}

#[derive(DeriveIden)]
pub enum AboutUs {
    #[sea_orm(iden = "about_us")]
    Table,
    Id,
    Title,
    Description,
    Mission,
    Vision,
    Image,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum CoreValues {
    #[sea_orm(iden = "core_values")]
    Table,
    Id,
    AboutUsId,
    Title,
    Description,
}

#[derive(DeriveIden)]
pub enum TeamMembers {
    #[sea_orm(iden = "team_members")]
    Table,
    Id,
    AboutUsId,
    Name,
    Role,
    Image,
    Bio,
    Linkedin,
    Twitter,
}

#[derive(DeriveIden)]
pub enum TeamMemberValues {
    #[sea_orm(iden = "team_member_core_values")]
    Table,
    Id,
    TeamMemberId,
    CoreValueId,
}

#[derive(DeriveIden)]
pub enum Reviews {
    #[sea_orm(iden = "reviews")]
    Table,
    Id,
    AboutUsId,
    Name,
    ReviewText,
    CourseId,
    AlumniId,
    Rating,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ContactMessages {
    #[sea_orm(iden = "contact_messages")]
    Table,
    Id,
    Name,
    Email,
    Message,
    CreatedAt,
}
