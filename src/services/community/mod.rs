//! 社区服务：活动、签到、校友、评价

pub mod alumni;
pub mod attendance;
pub mod events;
pub mod reviews;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::FieldErrors;
use crate::models::community::requests::{
    AlumniListQuery, AttendanceListQuery, CreateAlumniRequest, CreateAttendanceRequest,
    CreateEventRequest, CreateReviewRequest, EventListQuery, ReviewListQuery,
    UpdateAlumniRequest, UpdateAttendanceRequest, UpdateEventRequest, UpdateReviewRequest,
};
use crate::storage::Storage;

/// 课程与地点外键校验，缺失的记入 `errors`
pub(super) async fn check_course_and_location(
    storage: &Arc<dyn Storage>,
    course_id: Option<i64>,
    location_id: Option<i64>,
    errors: &mut FieldErrors,
) -> Result<()> {
    if let Some(id) = course_id
        && storage.get_course_by_id(id).await?.is_none()
    {
        errors.add("course_id", "Course does not exist.");
    }
    if let Some(id) = location_id
        && storage.get_location_by_id(id).await?.is_none()
    {
        errors.add("location_id", "Location does not exist.");
    }
    Ok(())
}

pub struct CommunityService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommunityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 活动
    pub async fn list_events(
        &self,
        query: EventListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        events::list_events(self, query, request).await
    }

    pub async fn get_event(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        events::get_event(self, id, request).await
    }

    pub async fn create_event(
        &self,
        req: CreateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        events::create_event(self, req, request).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        req: UpdateEventRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        events::update_event(self, id, req, request).await
    }

    pub async fn delete_event(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        events::delete_event(self, id, request).await
    }

    // 签到
    pub async fn list_attendance(
        &self,
        query: AttendanceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::list_attendance(self, query, request).await
    }

    pub async fn get_attendance(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        attendance::get_attendance(self, id, request).await
    }

    pub async fn create_attendance(
        &self,
        req: CreateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::create_attendance(self, req, request).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::update_attendance(self, id, req, request).await
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::delete_attendance(self, id, request).await
    }

    // 校友
    pub async fn list_alumni(
        &self,
        query: AlumniListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        alumni::list_alumni(self, query, request).await
    }

    pub async fn get_alumni(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        alumni::get_alumni(self, id, request).await
    }

    pub async fn create_alumni(
        &self,
        req: CreateAlumniRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        alumni::create_alumni(self, req, request).await
    }

    pub async fn update_alumni(
        &self,
        id: i64,
        req: UpdateAlumniRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        alumni::update_alumni(self, id, req, request).await
    }

    pub async fn delete_alumni(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        alumni::delete_alumni(self, id, request).await
    }

    // 评价
    pub async fn list_reviews(
        &self,
        query: ReviewListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reviews::list_reviews(self, query, request).await
    }

    pub async fn get_review(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reviews::get_review(self, id, request).await
    }

    pub async fn create_review(
        &self,
        req: CreateReviewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reviews::create_review(self, req, request).await
    }

    pub async fn update_review(
        &self,
        id: i64,
        req: UpdateReviewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reviews::update_review(self, id, req, request).await
    }

    pub async fn delete_review(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reviews::delete_review(self, id, request).await
    }
}
