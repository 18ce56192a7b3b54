use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::LearningService;
use crate::errors::Result;
use crate::models::learning::entities::{Schedule, ScheduleSlot, months_between};
use crate::models::learning::requests::{
    CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest,
};
use crate::models::users::entities::{ProfileRole, User};
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{current_user, forbidden, not_found, storage_failure, validation_failed};
use crate::storage::Storage;

async fn is_instructor(storage: &Arc<dyn Storage>, user: &User) -> Result<bool> {
    Ok(storage
        .get_profile_by_user_id(user.id)
        .await?
        .is_some_and(|profile| profile.role == ProfileRole::Instructor))
}

/// 决定新排期的讲师：管理员可任意指定，讲师只能指定自己
fn assign_instructor(
    user: &User,
    is_instructor: bool,
    requested: Option<i64>,
) -> std::result::Result<Option<i64>, &'static str> {
    if user.is_admin() {
        return Ok(requested);
    }
    if !is_instructor {
        return Err("Only admins and instructors can create schedules");
    }
    match requested {
        None => Ok(Some(user.id)),
        Some(id) if id == user.id => Ok(Some(user.id)),
        Some(_) => Err("Instructors can only create schedules for themselves"),
    }
}

/// 管理员或该排期的讲师可修改、删除
fn can_manage(user: &User, schedule: &Schedule) -> bool {
    user.is_admin() || schedule.instructor_id == Some(user.id)
}

/// 校验地点、讲师存在以及时间段冲突
async fn check_slot(
    storage: &Arc<dyn Storage>,
    slot: ScheduleSlot,
    instructor_id: Option<i64>,
    exclude_id: Option<i64>,
) -> std::result::Result<(), HttpResponse> {
    let failure = |e| storage_failure("Failed to validate schedule", e);
    let mut errors = FieldErrors::new();

    if storage
        .get_location_by_id(slot.location_id)
        .await
        .map_err(failure)?
        .is_none()
    {
        errors.add("location_id", "Location does not exist.");
    }
    if let Some(id) = instructor_id
        && storage.get_user_by_id(id).await.map_err(failure)?.is_none()
    {
        errors.add("instructor_id", "Instructor does not exist.");
    }

    let existing = storage
        .list_schedules_for_slot(slot.course_id, slot.location_id)
        .await
        .map_err(failure)?;
    if let Err(conflicts) = slot.validate(&existing, exclude_id) {
        errors.merge(conflicts);
    }

    errors.into_result().map_err(validation_failed)
}

pub async fn list_schedules(
    service: &LearningService,
    query: ScheduleListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.list_schedules_with_pagination(query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Schedules retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list schedules", e)),
    }
}

/// 排期详情附带模块与课时
pub async fn get_schedule(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    match storage.get_schedule_detail(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Schedule retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
        Err(e) => Ok(storage_failure("Failed to load schedule", e)),
    }
}

pub async fn create_schedule(
    service: &LearningService,
    mut req: CreateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let instructor = match is_instructor(&storage, &user).await {
        Ok(flag) => flag,
        Err(e) => return Ok(storage_failure("Failed to create schedule", e)),
    };
    req.instructor_id = match assign_instructor(&user, instructor, req.instructor_id) {
        Ok(id) => id,
        Err(message) => return Ok(forbidden(message)),
    };

    match storage.get_course_by_id(req.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(validation_failed(FieldErrors::single(
                "course_id",
                "Course does not exist.",
            )));
        }
        Err(e) => return Ok(storage_failure("Failed to create schedule", e)),
    }

    let slot = ScheduleSlot {
        course_id: req.course_id,
        location_id: req.location_id,
        start_date: req.start_date,
        end_date: req.end_date,
    };
    if let Err(response) = check_slot(&storage, slot, req.instructor_id, None).await {
        return Ok(response);
    }

    let duration = months_between(req.start_date, req.end_date);
    match storage.create_schedule(req, duration).await {
        Ok(schedule) => {
            tracing::info!(
                "Schedule {} created for course {} by {}",
                schedule.id,
                schedule.course_id,
                user.username
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                schedule,
                "Schedule created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to create schedule", e)),
    }
}

pub async fn update_schedule(
    service: &LearningService,
    id: i64,
    req: UpdateScheduleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let current = match storage.get_schedule_by_id(id).await {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
        Err(e) => return Ok(storage_failure("Failed to update schedule", e)),
    };

    if !can_manage(&user, &current) {
        return Ok(forbidden("You can only modify your own schedules"));
    }
    if !user.is_admin()
        && let Some(instructor_id) = req.instructor_id
        && instructor_id != Some(user.id)
    {
        return Ok(forbidden("Only admins can reassign a schedule"));
    }

    let slot = ScheduleSlot {
        course_id: current.course_id,
        location_id: req.location_id.unwrap_or(current.location_id),
        start_date: req.start_date.unwrap_or(current.start_date),
        end_date: req.end_date.unwrap_or(current.end_date),
    };
    if let Err(response) = check_slot(&storage, slot, req.instructor_id.flatten(), Some(id)).await {
        return Ok(response);
    }

    let duration = months_between(slot.start_date, slot.end_date);
    match storage.update_schedule(id, req, duration).await {
        Ok(Some(schedule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedule,
            "Schedule updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
        Err(e) => Ok(storage_failure("Failed to update schedule", e)),
    }
}

pub async fn delete_schedule(
    service: &LearningService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_schedule_by_id(id).await {
        Ok(Some(schedule)) if can_manage(&user, &schedule) => {}
        Ok(Some(_)) => return Ok(forbidden("You can only delete your own schedules")),
        Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
        Err(e) => return Ok(storage_failure("Failed to delete schedule", e)),
    }

    match storage.delete_schedule(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Schedule deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
        Err(e) => Ok(storage_failure("Failed to delete schedule", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, sample_user};
    use chrono::NaiveDate;

    fn schedule(instructor_id: Option<i64>) -> Schedule {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        Schedule {
            id: 5,
            course_id: 1,
            start_date: start,
            end_date: end,
            instructor_id,
            location_id: 1,
            duration_months: months_between(start, end),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_admin_assigns_anyone() {
        let admin = sample_user(UserRole::Admin, true);
        assert_eq!(assign_instructor(&admin, false, Some(42)), Ok(Some(42)));
        assert_eq!(assign_instructor(&admin, false, None), Ok(None));
    }

    #[test]
    fn test_instructor_assigns_only_self() {
        let user = sample_user(UserRole::User, true);
        assert_eq!(assign_instructor(&user, true, None), Ok(Some(user.id)));
        assert_eq!(assign_instructor(&user, true, Some(user.id)), Ok(Some(user.id)));
        assert!(assign_instructor(&user, true, Some(user.id + 1)).is_err());
        assert!(assign_instructor(&user, false, None).is_err());
    }

    #[test]
    fn test_only_owner_or_admin_manages() {
        let user = sample_user(UserRole::User, true);
        assert!(can_manage(&user, &schedule(Some(user.id))));
        assert!(!can_manage(&user, &schedule(Some(user.id + 1))));
        assert!(!can_manage(&user, &schedule(None)));
        assert!(can_manage(&sample_user(UserRole::Admin, true), &schedule(None)));
    }
}
