//! 数据模型
//!
//! 与数据库实体分离的业务模型、请求体和响应体。

pub mod about;
pub mod auth;
pub mod catalog;
pub mod common;
pub mod community;
pub mod contact;
pub mod dashboard;
pub mod files;
pub mod learning;
pub mod students;
pub mod system;
pub mod users;

pub use common::{
    ApiResponse, FieldErrors, PaginatedResponse, PaginationInfo, PaginationQuery,
};

/// 程序启动时间，用于健康检查计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，序列化到 ApiResponse.code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    ValidationFailed = 1022,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    EmailNotVerified = 2001,
    VerificationTokenInvalid = 2002,
    VerificationTokenExpired = 2003,
    RegisterFailed = 2004,

    // 用户
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserEmailAlreadyExists = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CannotDeleteSelf = 3008,

    // 课程目录
    CategoryNotFound = 4000,
    CategoryInUse = 4001,
    CategoryAlreadyExists = 4002,
    LocationNotFound = 4010,
    LocationAlreadyExists = 4011,
    PartnerNotFound = 4020,
    PartnerAlreadyExists = 4021,
    CourseNotFound = 4030,
    MaterialNotFound = 4040,

    // 学习排期
    ScheduleNotFound = 5000,
    ScheduleConflict = 5001,
    ModuleNotFound = 5010,
    LessonNotFound = 5020,

    // 学生与报名
    StudentNotFound = 6000,
    ApplicationAlreadyExists = 6001,
    ApplicationNotApproved = 6002,
    AlreadyEnrolled = 6003,
    EnrollmentNotFound = 6010,
    SelectionStepNotFound = 6020,
    StudentSelectionNotFound = 6021,

    // 社区内容
    EventNotFound = 7000,
    AttendanceNotFound = 7001,
    AlumniNotFound = 7010,
    AlumniAlreadyExists = 7011,
    ReviewNotFound = 7020,
    CoreValueNotFound = 7030,
    TeamMemberNotFound = 7031,
    ContactNotFound = 7040,
    ContactAlreadyExists = 7041,

    // 文件
    FileNotFound = 8000,
    FileUploadFailed = 8001,
    FileTypeNotAllowed = 8002,
    FileSizeExceeded = 8003,
    MultifileUploadNotAllowed = 8004,
}
