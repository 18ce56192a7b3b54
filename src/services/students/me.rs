use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::admin::check_student_update;
use super::{LoadedApplication, StudentService, load_application};
use crate::models::students::entities::{ApplicationStatus, Student};
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::students::responses::{
    ApplicationStatusResponse, CourseSummary, EnrollScheduleResponse, LearningLinks,
    LearningMaterialsResponse, StudentDashboardResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, forbidden, not_found, storage_failure};

const DASHBOARD_EVENT_LIMIT: u64 = 5;

fn no_application() -> HttpResponse {
    not_found(
        ErrorCode::StudentNotFound,
        "Student profile not found. Please complete your application.",
    )
}

/// 取当前用户的申请；未登录或尚未申请时返回对应响应
async fn my_application(
    service: &StudentService,
    request: &HttpRequest,
    action: &str,
) -> Result<(Student, LoadedApplication), HttpResponse> {
    let user = current_user(request)?;
    let storage = service.get_storage(request);
    let mut loaded = load_application(&storage, user.id)
        .await
        .map_err(|e| storage_failure(action, e))?;
    match loaded.student.take() {
        Some(student) => Ok((student, loaded)),
        None => Err(no_application()),
    }
}

fn status_response(loaded: LoadedApplication) -> ApplicationStatusResponse {
    ApplicationStatusResponse {
        message: loaded.status.message(),
        application: loaded.status,
        steps: loaded.steps,
    }
}

/// 申请通过后才给出课程的 GitHub 与 Discord 链接
fn learning_links(status: &ApplicationStatus, courses: &[CourseSummary]) -> LearningLinks {
    if !status.is_approved {
        return LearningLinks {
            github: None,
            discord: None,
            message: "Complete your application to access learning materials".to_string(),
        };
    }
    LearningLinks {
        github: courses.iter().find_map(|c| c.github.clone()),
        discord: courses.iter().find_map(|c| c.discord.clone()),
        message: "Access granted".to_string(),
    }
}

/// 没有选拔步骤时可直接报名；有步骤则必须全部完成
fn may_enroll(status: &ApplicationStatus) -> bool {
    status.completed_steps == status.total_steps
}

pub async fn get_my_student(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (student, _) = match my_application(service, request, "Failed to load student").await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage.get_student_detail(student.id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(no_application()),
        Err(e) => Ok(storage_failure("Failed to load student", e)),
    }
}

pub async fn update_my_student(
    service: &StudentService,
    req: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (student, _) = match my_application(service, request, "Failed to update student").await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = check_student_update(&storage, &req).await {
        return Ok(response);
    }

    match storage.update_student(student.id, req).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(no_application()),
        Err(e) => Ok(storage_failure("Failed to update student", e)),
    }
}

/// 未申请时返回 not_applied 状态而不是 404
pub async fn my_application_status(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match load_application(&storage, user.id).await {
        Ok(loaded) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            status_response(loaded),
            "Application status retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to load application status", e)),
    }
}

pub async fn my_dashboard(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to load dashboard";
    let (student, loaded) = match my_application(service, request, action).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let profile = match storage.get_student_detail(student.id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Ok(no_application()),
        Err(e) => return Ok(storage_failure(action, e)),
    };

    let course_ids: Vec<i64> = profile.courses.iter().map(|c| c.id).collect();
    let now = chrono::Utc::now().timestamp();
    let upcoming_events = match storage
        .list_upcoming_events_for_courses(&course_ids, now, Some(DASHBOARD_EVENT_LIMIT))
        .await
    {
        Ok(events) => events,
        Err(e) => return Ok(storage_failure(action, e)),
    };

    let learning_materials = learning_links(&loaded.status, &profile.courses);
    let enrolled_schedules = profile.schedules.clone();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDashboardResponse {
            profile,
            application: status_response(loaded),
            enrolled_schedules,
            upcoming_events,
            learning_materials,
        },
        "Dashboard retrieved successfully",
    )))
}

pub async fn my_courses(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (student, _) = match my_application(service, request, "Failed to load courses").await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage.list_student_courses(student.id).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            courses,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to load courses", e)),
    }
}

/// 所选课程的未来活动，加上不属于任何课程的公共活动
pub async fn my_events(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to load events";
    let (student, _) = match my_application(service, request, action).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let course_ids: Vec<i64> = match storage.list_student_courses(student.id).await {
        Ok(courses) => courses.iter().map(|c| c.id).collect(),
        Err(e) => return Ok(storage_failure(action, e)),
    };

    let now = chrono::Utc::now().timestamp();
    match storage
        .list_upcoming_events_for_courses(&course_ids, now, None)
        .await
    {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

pub async fn my_learning_materials(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to load learning materials";
    let (student, loaded) = match my_application(service, request, action).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    if !loaded.status.is_approved {
        return Ok(forbidden(
            "Complete your application to access learning materials.",
        ));
    }

    let storage = service.get_storage(request);
    let courses = match storage.list_student_courses(student.id).await {
        Ok(courses) => courses,
        Err(e) => return Ok(storage_failure(action, e)),
    };
    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();

    match storage.list_materials_for_courses(&course_ids).await {
        Ok(materials) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LearningMaterialsResponse { courses, materials },
            "Learning materials retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(action, e)),
    }
}

/// 报名排期，同时补齐课程关联
pub async fn enroll_schedule(
    service: &StudentService,
    schedule_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let action = "Failed to enroll in schedule";
    let (student, loaded) = match my_application(service, request, action).await {
        Ok(found) => found,
        Err(response) => return Ok(response),
    };

    if !may_enroll(&loaded.status) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ApplicationNotApproved,
            "Your application must be approved before enrolling in a schedule.",
        )));
    }

    let storage = service.get_storage(request);

    let schedule = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found.")),
        Err(e) => return Ok(storage_failure(action, e)),
    };

    let already_enrolled = || {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AlreadyEnrolled,
            "You are already enrolled in this schedule.",
        ))
    };
    match storage.is_enrolled_in_schedule(student.id, schedule.id).await {
        Ok(false) => {}
        Ok(true) => return Ok(already_enrolled()),
        Err(e) => return Ok(storage_failure(action, e)),
    }

    match storage.enroll_in_schedule(student.id, &schedule).await {
        Ok(()) => {}
        Err(e) if e.is_conflict() => return Ok(already_enrolled()),
        Err(e) => return Ok(storage_failure(action, e)),
    }
    tracing::info!("Student {} enrolled in schedule {}", student.id, schedule.id);

    let summary = match storage.list_student_schedules(student.id).await {
        Ok(schedules) => schedules.into_iter().find(|s| s.id == schedule.id),
        Err(e) => return Ok(storage_failure(action, e)),
    };
    match summary {
        Some(schedule) => Ok(HttpResponse::Created().json(ApiResponse::success(
            EnrollScheduleResponse {
                message: "Successfully enrolled in the schedule!".to_string(),
                schedule,
            },
            "Enrolled successfully",
        ))),
        None => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::SelectionStatus::{Completed, Pending};

    fn course(id: i64, github: Option<&str>, discord: Option<&str>) -> CourseSummary {
        CourseSummary {
            id,
            name: format!("Course {id}"),
            github: github.map(str::to_string),
            discord: discord.map(str::to_string),
        }
    }

    #[test]
    fn test_links_hidden_until_approved() {
        let courses = vec![course(1, Some("https://github.com/evolv/cloud"), None)];
        let pending = ApplicationStatus::derive(true, &[Completed, Pending]);
        let links = learning_links(&pending, &courses);
        assert!(links.github.is_none());
        assert!(links.discord.is_none());

        let approved = ApplicationStatus::derive(true, &[Completed]);
        let links = learning_links(&approved, &courses);
        assert_eq!(links.github.as_deref(), Some("https://github.com/evolv/cloud"));
    }

    #[test]
    fn test_links_taken_from_first_course_that_has_them() {
        let courses = vec![
            course(1, None, None),
            course(2, None, Some("https://discord.gg/evolv")),
            course(3, Some("https://github.com/evolv/data"), Some("https://discord.gg/other")),
        ];
        let approved = ApplicationStatus::derive(true, &[Completed, Completed]);
        let links = learning_links(&approved, &courses);
        assert_eq!(links.github.as_deref(), Some("https://github.com/evolv/data"));
        assert_eq!(links.discord.as_deref(), Some("https://discord.gg/evolv"));
    }

    #[test]
    fn test_enroll_gate() {
        assert!(may_enroll(&ApplicationStatus::derive(true, &[])));
        assert!(may_enroll(&ApplicationStatus::derive(true, &[Completed, Completed])));
        assert!(!may_enroll(&ApplicationStatus::derive(true, &[Completed, Pending])));
    }
}
