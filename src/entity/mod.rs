//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳以 unix 秒保存，日历日期以 Date 保存。

pub mod prelude;

pub mod about_us;
pub mod alumni;
pub mod categories;
pub mod contact_messages;
pub mod core_values;
pub mod course_locations;
pub mod course_materials;
pub mod course_partners;
pub mod courses;
pub mod enrollments;
pub mod event_attendance;
pub mod event_partners;
pub mod events;
pub mod files;
pub mod lessons;
pub mod locations;
pub mod modules;
pub mod partners;
pub mod profiles;
pub mod reviews;
pub mod schedules;
pub mod selection_procedures;
pub mod student_courses;
pub mod student_schedules;
pub mod student_selections;
pub mod students;
pub mod team_member_values;
pub mod team_members;
pub mod users;
