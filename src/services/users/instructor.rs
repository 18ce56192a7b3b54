use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::entities::ProfileRole;
use crate::models::users::responses::InstructorProfileResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_failure};

pub async fn get_instructor_profile(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Instructor not found")),
        Err(e) => return Ok(storage_failure("Failed to load instructor", e)),
    };

    let profile = match storage.get_profile_by_user_id(user.id).await {
        Ok(Some(profile)) if profile.role == ProfileRole::Instructor => profile,
        Ok(_) => return Ok(not_found(ErrorCode::UserNotFound, "Instructor not found")),
        Err(e) => return Ok(storage_failure("Failed to load instructor", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        InstructorProfileResponse {
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            title: profile.title,
            bio: profile.bio,
            picture: profile.picture,
            twitter: profile.twitter,
            linkedin: profile.linkedin,
        },
        "Instructor profile retrieved successfully",
    )))
}
