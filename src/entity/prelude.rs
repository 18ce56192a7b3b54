//! 预导入模块，方便使用

pub use super::about_us::{
    ActiveModel as AboutUsActiveModel, Entity as AboutUs, Model as AboutUsModel,
};
pub use super::alumni::{ActiveModel as AlumniActiveModel, Entity as Alumni, Model as AlumniModel};
pub use super::categories::{
    ActiveModel as CategoryActiveModel, Entity as Categories, Model as CategoryModel,
};
pub use super::contact_messages::{
    ActiveModel as ContactMessageActiveModel, Entity as ContactMessages, Model as ContactMessageModel,
};
pub use super::core_values::{
    ActiveModel as CoreValueActiveModel, Entity as CoreValues, Model as CoreValueModel,
};
pub use super::course_locations::{
    ActiveModel as CourseLocationActiveModel, Entity as CourseLocations, Model as CourseLocationModel,
};
pub use super::course_materials::{
    ActiveModel as CourseMaterialActiveModel, Entity as CourseMaterials, Model as CourseMaterialModel,
};
pub use super::course_partners::{
    ActiveModel as CoursePartnerActiveModel, Entity as CoursePartners, Model as CoursePartnerModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::event_attendance::{
    ActiveModel as EventAttendanceActiveModel, Entity as EventAttendance, Model as EventAttendanceModel,
};
pub use super::event_partners::{
    ActiveModel as EventPartnerActiveModel, Entity as EventPartners, Model as EventPartnerModel,
};
pub use super::events::{ActiveModel as EventActiveModel, Entity as Events, Model as EventModel};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::lessons::{ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel};
pub use super::locations::{
    ActiveModel as LocationActiveModel, Entity as Locations, Model as LocationModel,
};
pub use super::modules::{ActiveModel as ModuleActiveModel, Entity as Modules, Model as ModuleModel};
pub use super::partners::{
    ActiveModel as PartnerActiveModel, Entity as Partners, Model as PartnerModel,
};
pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::reviews::{ActiveModel as ReviewActiveModel, Entity as Reviews, Model as ReviewModel};
pub use super::schedules::{
    ActiveModel as ScheduleActiveModel, Entity as Schedules, Model as ScheduleModel,
};
pub use super::selection_procedures::{
    ActiveModel as SelectionProcedureActiveModel, Entity as SelectionProcedures, Model as SelectionProcedureModel,
};
pub use super::student_courses::{
    ActiveModel as StudentCourseActiveModel, Entity as StudentCourses, Model as StudentCourseModel,
};
pub use super::student_schedules::{
    ActiveModel as StudentScheduleActiveModel, Entity as StudentSchedules, Model as StudentScheduleModel,
};
pub use super::student_selections::{
    ActiveModel as StudentSelectionActiveModel, Entity as StudentSelections, Model as StudentSelectionModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::team_member_values::{
    ActiveModel as TeamMemberValueActiveModel, Entity as TeamMemberValues, Model as TeamMemberValueModel,
};
pub use super::team_members::{
    ActiveModel as TeamMemberActiveModel, Entity as TeamMembers, Model as TeamMemberModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
