//! 数据存储层
//!
//! 服务层只依赖这里声明的 trait。每个业务域一个子 trait，
//! `Storage` 把它们组合在一起，供 `web::Data<Arc<dyn Storage>>` 使用。

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::{
    about::{
        entities::{AboutUs, CoreValue, TeamMember},
        requests::{
            CreateCoreValueRequest, CreateTeamMemberRequest, UpdateAboutUsRequest,
            UpdateCoreValueRequest, UpdateTeamMemberRequest,
        },
        responses::{AboutUsDetail, TeamMemberDetail},
    },
    catalog::{
        entities::{Category, Course, CourseMaterial, Location, Partner},
        requests::{
            CategoryListQuery, CourseListQuery, CreateCategoryRequest, CreateCourseRequest,
            CreateLocationRequest, CreateMaterialRequest, CreatePartnerRequest,
            LocationListQuery, PartnerListQuery, UpdateCategoryRequest, UpdateCourseRequest,
            UpdateLocationRequest, UpdatePartnerRequest,
        },
        responses::{
            CategoryListResponse, CourseDetail, CourseListResponse, LocationListResponse,
            PartnerListResponse,
        },
    },
    community::{
        entities::{Alumni, Event, EventAttendance, Review},
        requests::{
            AlumniListQuery, AttendanceListQuery, CreateAlumniRequest, CreateAttendanceRequest,
            CreateEventRequest, CreateReviewRequest, EventListQuery, ReviewListQuery,
            UpdateAlumniRequest, UpdateEventRequest, UpdateReviewRequest,
        },
        responses::{
            AlumniDetail, AlumniListResponse, AttendanceListResponse, EventDetail,
            EventListResponse, ReviewListResponse,
        },
    },
    contact::{
        entities::ContactMessage,
        requests::{ContactListQuery, CreateContactRequest},
        responses::ContactListResponse,
    },
    dashboard::responses::AdminDashboardResponse,
    files::entities::File,
    learning::{
        entities::{Lesson, Module, Schedule},
        requests::{
            CreateLessonRequest, CreateModuleRequest, CreateScheduleRequest, LessonListQuery,
            ModuleListQuery, ScheduleListQuery, UpdateLessonRequest, UpdateModuleRequest,
            UpdateScheduleRequest,
        },
        responses::{LessonListResponse, ModuleListResponse, ScheduleDetail, ScheduleListResponse},
    },
    students::{
        entities::{
            Enrollment, EnrollmentStatus, SelectionProcedure, SelectionStatus, Student,
            StudentSelection,
        },
        requests::{
            CreateSelectionProcedureRequest, CreateStudentRequest,
            CreateStudentSelectionRequest, EnrollmentListQuery, StudentListQuery,
            StudentSelectionListQuery, UpdateSelectionProcedureRequest, UpdateStudentRequest,
        },
        responses::{
            CourseSummary, EnrollmentListResponse, ScheduleSummary, SelectionProcedureListResponse,
            StudentDetail, StudentListResponse, StudentSelectionListResponse,
        },
    },
    users::{
        entities::{Profile, ProfileRole, User},
        requests::{CreateUserRequest, UpdateProfileRequest, UpdateUserRequest, UserListQuery},
        responses::{FootprintPurgeReport, UserListResponse},
    },
    PaginationQuery,
};

pub mod sea_orm_storage;

/// 用户与资料
#[async_trait::async_trait]
pub trait UserStorage: Send + Sync {
    // 创建用户，同时创建一对一的资料
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 邮箱不区分大小写
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn get_user_by_verification_token(&self, token: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 写入新的验证 token，并把发送时间设为当前时间
    async fn set_verification_token(&self, id: i64, token: &str) -> Result<bool>;
    // 标记邮箱已验证，清空 token 与发送时间
    async fn mark_email_verified(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    async fn get_profile_by_user_id(&self, user_id: i64) -> Result<Option<Profile>>;
    // role 为 None 时不修改资料角色
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
        role: Option<ProfileRole>,
    ) -> Result<Option<Profile>>;
}

/// 上传文件记录
#[async_trait::async_trait]
pub trait FileStorage: Send + Sync {
    async fn create_file(
        &self,
        token: &str,
        original_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: Option<i64>,
    ) -> Result<File>;
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

/// 课程目录：分类、地点、合作伙伴、课程、课程资料
#[async_trait::async_trait]
pub trait CatalogStorage: Send + Sync {
    async fn create_category(&self, req: CreateCategoryRequest) -> Result<Category>;
    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn list_categories_with_pagination(
        &self,
        query: CategoryListQuery,
    ) -> Result<CategoryListResponse>;
    async fn update_category(
        &self,
        id: i64,
        update: UpdateCategoryRequest,
    ) -> Result<Option<Category>>;
    async fn delete_category(&self, id: i64) -> Result<bool>;
    // 引用该分类的课程数
    async fn count_courses_in_category(&self, category_id: i64) -> Result<u64>;

    async fn create_location(&self, req: CreateLocationRequest) -> Result<Location>;
    async fn get_location_by_id(&self, id: i64) -> Result<Option<Location>>;
    async fn list_locations_with_pagination(
        &self,
        query: LocationListQuery,
    ) -> Result<LocationListResponse>;
    async fn update_location(
        &self,
        id: i64,
        update: UpdateLocationRequest,
    ) -> Result<Option<Location>>;
    async fn delete_location(&self, id: i64) -> Result<bool>;
    // 给定 id 中实际存在的地点数
    async fn count_locations_by_ids(&self, ids: &[i64]) -> Result<u64>;

    async fn create_partner(&self, req: CreatePartnerRequest) -> Result<Partner>;
    async fn get_partner_by_id(&self, id: i64) -> Result<Option<Partner>>;
    async fn list_partners_with_pagination(
        &self,
        query: PartnerListQuery,
    ) -> Result<PartnerListResponse>;
    async fn update_partner(
        &self,
        id: i64,
        update: UpdatePartnerRequest,
    ) -> Result<Option<Partner>>;
    async fn delete_partner(&self, id: i64) -> Result<bool>;
    async fn count_partners_by_ids(&self, ids: &[i64]) -> Result<u64>;

    // 创建课程并写入地点、合作伙伴关联（同一事务）
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn list_courses_by_ids(&self, ids: &[i64]) -> Result<Vec<Course>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    async fn create_material(
        &self,
        course_id: i64,
        req: CreateMaterialRequest,
        file_size: i64,
        uploaded_by: i64,
    ) -> Result<CourseMaterial>;
    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>>;
    async fn list_materials_for_courses(&self, course_ids: &[i64]) -> Result<Vec<CourseMaterial>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;
}

/// 学习排期、模块、课时
#[async_trait::async_trait]
pub trait LearningStorage: Send + Sync {
    async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
        duration_months: i32,
    ) -> Result<Schedule>;
    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>>;
    async fn get_schedule_detail(&self, id: i64) -> Result<Option<ScheduleDetail>>;
    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<ScheduleListResponse>;
    // 同一课程、同一地点的全部排期，用于冲突检查
    async fn list_schedules_for_slot(&self, course_id: i64, location_id: i64)
    -> Result<Vec<Schedule>>;
    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
        duration_months: i32,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, id: i64) -> Result<bool>;

    async fn create_module(&self, req: CreateModuleRequest) -> Result<Module>;
    async fn get_module_by_id(&self, id: i64) -> Result<Option<Module>>;
    async fn list_modules_with_pagination(
        &self,
        query: ModuleListQuery,
    ) -> Result<ModuleListResponse>;
    // 该排期下 order 是否已被其它模块占用
    async fn module_order_taken(
        &self,
        schedule_id: i64,
        order: i32,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn update_module(&self, id: i64, update: UpdateModuleRequest) -> Result<Option<Module>>;
    async fn delete_module(&self, id: i64) -> Result<bool>;

    async fn create_lesson(&self, req: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons_with_pagination(
        &self,
        query: LessonListQuery,
    ) -> Result<LessonListResponse>;
    async fn update_lesson(&self, id: i64, update: UpdateLessonRequest) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, id: i64) -> Result<bool>;
}

/// 学员申请、报名与选拔
#[async_trait::async_trait]
pub trait StudentStorage: Send + Sync {
    // 创建申请：分配学号、关联课程、为每门课程创建待审核报名（同一事务）
    async fn create_application(
        &self,
        user_id: i64,
        req: CreateStudentRequest,
        year: i32,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn get_student_detail(&self, id: i64) -> Result<Option<StudentDetail>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;

    async fn list_student_courses(&self, student_id: i64) -> Result<Vec<CourseSummary>>;
    async fn list_student_schedules(&self, student_id: i64) -> Result<Vec<ScheduleSummary>>;
    async fn is_enrolled_in_schedule(&self, student_id: i64, schedule_id: i64) -> Result<bool>;
    // 加入排期并补齐课程关联（同一事务）
    async fn enroll_in_schedule(&self, student_id: i64, schedule: &Schedule) -> Result<()>;

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    async fn update_enrollment_status(
        &self,
        id: i64,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>>;

    async fn create_selection_procedure(
        &self,
        req: CreateSelectionProcedureRequest,
    ) -> Result<SelectionProcedure>;
    async fn get_selection_procedure_by_id(&self, id: i64) -> Result<Option<SelectionProcedure>>;
    async fn list_selection_procedures_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<SelectionProcedureListResponse>;
    async fn update_selection_procedure(
        &self,
        id: i64,
        update: UpdateSelectionProcedureRequest,
    ) -> Result<Option<SelectionProcedure>>;
    async fn delete_selection_procedure(&self, id: i64) -> Result<bool>;

    async fn create_student_selection(
        &self,
        req: CreateStudentSelectionRequest,
    ) -> Result<StudentSelection>;
    async fn get_student_selection_by_id(&self, id: i64) -> Result<Option<StudentSelection>>;
    async fn list_student_selections_with_pagination(
        &self,
        query: StudentSelectionListQuery,
    ) -> Result<StudentSelectionListResponse>;
    // 某学员的全部选拔进度，按步骤顺序
    async fn list_selections_for_student(&self, student_id: i64) -> Result<Vec<StudentSelection>>;
    async fn update_student_selection(
        &self,
        id: i64,
        status: SelectionStatus,
    ) -> Result<Option<StudentSelection>>;
    async fn delete_student_selection(&self, id: i64) -> Result<bool>;
}

/// 活动、签到、校友、评价
#[async_trait::async_trait]
pub trait CommunityStorage: Send + Sync {
    async fn create_event(&self, req: CreateEventRequest) -> Result<Event>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn get_event_detail(&self, id: i64) -> Result<Option<EventDetail>>;
    async fn list_events_with_pagination(
        &self,
        query: EventListQuery,
        now: i64,
    ) -> Result<EventListResponse>;
    // 未来活动：属于给定课程或不属于任何课程，按时间升序
    async fn list_upcoming_events_for_courses(
        &self,
        course_ids: &[i64],
        now: i64,
        limit: Option<u64>,
    ) -> Result<Vec<Event>>;
    async fn update_event(&self, id: i64, update: UpdateEventRequest) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    async fn create_attendance(&self, req: CreateAttendanceRequest) -> Result<EventAttendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<EventAttendance>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse>;
    async fn update_attendance(&self, id: i64, attended: bool)
    -> Result<Option<EventAttendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    // 创建校友记录并把用户资料角色设为 alumni（同一事务）
    async fn create_alumni(&self, req: CreateAlumniRequest) -> Result<Alumni>;
    async fn get_alumni_by_id(&self, id: i64) -> Result<Option<Alumni>>;
    async fn get_alumni_detail(&self, id: i64) -> Result<Option<AlumniDetail>>;
    async fn list_alumni_with_pagination(&self, query: AlumniListQuery)
    -> Result<AlumniListResponse>;
    async fn update_alumni(&self, id: i64, update: UpdateAlumniRequest) -> Result<Option<Alumni>>;
    async fn delete_alumni(&self, id: i64) -> Result<bool>;

    async fn create_review(
        &self,
        req: CreateReviewRequest,
        about_us_id: Option<i64>,
    ) -> Result<Review>;
    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>>;
    async fn list_reviews_with_pagination(
        &self,
        query: ReviewListQuery,
    ) -> Result<ReviewListResponse>;
    async fn update_review(&self, id: i64, update: UpdateReviewRequest) -> Result<Option<Review>>;
    async fn delete_review(&self, id: i64) -> Result<bool>;
}

/// 关于我们（单例）、核心价值、团队成员
#[async_trait::async_trait]
pub trait AboutStorage: Send + Sync {
    async fn get_or_create_about_us(&self) -> Result<AboutUs>;
    async fn get_about_us_detail(&self) -> Result<AboutUsDetail>;
    async fn update_about_us(&self, update: UpdateAboutUsRequest) -> Result<AboutUs>;

    async fn create_core_value(&self, req: CreateCoreValueRequest) -> Result<CoreValue>;
    async fn get_core_value_by_id(&self, id: i64) -> Result<Option<CoreValue>>;
    async fn list_core_values(&self) -> Result<Vec<CoreValue>>;
    async fn update_core_value(
        &self,
        id: i64,
        update: UpdateCoreValueRequest,
    ) -> Result<Option<CoreValue>>;
    async fn delete_core_value(&self, id: i64) -> Result<bool>;
    async fn count_core_values_by_ids(&self, ids: &[i64]) -> Result<u64>;

    async fn create_team_member(&self, req: CreateTeamMemberRequest) -> Result<TeamMember>;
    async fn get_team_member_detail(&self, id: i64) -> Result<Option<TeamMemberDetail>>;
    async fn list_team_members(&self) -> Result<Vec<TeamMemberDetail>>;
    async fn update_team_member(
        &self,
        id: i64,
        update: UpdateTeamMemberRequest,
    ) -> Result<Option<TeamMember>>;
    async fn delete_team_member(&self, id: i64) -> Result<bool>;
}

/// 联系我们留言
#[async_trait::async_trait]
pub trait ContactStorage: Send + Sync {
    async fn create_contact(&self, req: CreateContactRequest) -> Result<ContactMessage>;
    async fn get_contact_by_id(&self, id: i64) -> Result<Option<ContactMessage>>;
    async fn get_contact_by_email(&self, email: &str) -> Result<Option<ContactMessage>>;
    async fn list_contacts_with_pagination(
        &self,
        query: ContactListQuery,
    ) -> Result<ContactListResponse>;
    async fn delete_contact(&self, id: i64) -> Result<bool>;
}

/// 后台统计
#[async_trait::async_trait]
pub trait DashboardStorage: Send + Sync {
    async fn dashboard_stats(&self, now: i64, today: NaiveDate) -> Result<AdminDashboardResponse>;
}

/// 账号注销时的级联清理
#[async_trait::async_trait]
pub trait CleanupStorage: Send + Sync {
    // 删除用户及其学员档案、校友记录、留言、资料（同一事务）
    async fn purge_user_footprint(&self, user_id: i64) -> Result<FootprintPurgeReport>;
    // 释放一个邮箱：删除所有匹配的用户、学员档案和留言
    async fn purge_email(&self, email: &str) -> Result<FootprintPurgeReport>;
}

pub trait Storage:
    UserStorage
    + FileStorage
    + CatalogStorage
    + LearningStorage
    + StudentStorage
    + CommunityStorage
    + AboutStorage
    + ContactStorage
    + DashboardStorage
    + CleanupStorage
{
}

impl<T> Storage for T where
    T: UserStorage
        + FileStorage
        + CatalogStorage
        + LearningStorage
        + StudentStorage
        + CommunityStorage
        + AboutStorage
        + ContactStorage
        + DashboardStorage
        + CleanupStorage
{
}

/// 按配置创建存储实例（连接数据库并执行迁移）
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
