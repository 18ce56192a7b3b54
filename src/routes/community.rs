use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares;
use crate::models::community::requests::{
    AlumniListQuery, AttendanceListQuery, CreateAlumniRequest, CreateAttendanceRequest,
    CreateEventRequest, CreateReviewRequest, EventListQuery, ReviewListQuery,
    UpdateAlumniRequest, UpdateAttendanceRequest, UpdateEventRequest, UpdateReviewRequest,
};
use crate::services::CommunityService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CommunityService 实例
static COMMUNITY_SERVICE: Lazy<CommunityService> = Lazy::new(CommunityService::new_lazy);

// 活动
pub async fn list_events(
    req: HttpRequest,
    query: web::Query<EventListQuery>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.list_events(query.into_inner(), &req).await
}

pub async fn get_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.get_event(id.0, &req).await
}

pub async fn create_event(
    req: HttpRequest,
    body: web::Json<CreateEventRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.create_event(body.into_inner(), &req).await
}

pub async fn update_event(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEventRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE
        .update_event(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_event(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.delete_event(id.0, &req).await
}

// 签到
pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.list_attendance(query.into_inner(), &req).await
}

pub async fn get_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.get_attendance(id.0, &req).await
}

pub async fn create_attendance(
    req: HttpRequest,
    body: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.create_attendance(body.into_inner(), &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE
        .update_attendance(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.delete_attendance(id.0, &req).await
}

// 校友
pub async fn list_alumni(
    req: HttpRequest,
    query: web::Query<AlumniListQuery>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.list_alumni(query.into_inner(), &req).await
}

pub async fn get_alumni(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.get_alumni(id.0, &req).await
}

pub async fn create_alumni(
    req: HttpRequest,
    body: web::Json<CreateAlumniRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.create_alumni(body.into_inner(), &req).await
}

pub async fn update_alumni(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAlumniRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE
        .update_alumni(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_alumni(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.delete_alumni(id.0, &req).await
}

// 评价
pub async fn list_reviews(
    req: HttpRequest,
    query: web::Query<ReviewListQuery>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.list_reviews(query.into_inner(), &req).await
}

pub async fn get_review(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.get_review(id.0, &req).await
}

pub async fn create_review(
    req: HttpRequest,
    body: web::Json<CreateReviewRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.create_review(body.into_inner(), &req).await
}

pub async fn update_review(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateReviewRequest>,
) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE
        .update_review(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_review(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMUNITY_SERVICE.delete_review(id.0, &req).await
}

// 配置路由
pub fn configure_community_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/events")
            .route("", web::get().to(list_events))
            .route("", admin_only(web::post().to(create_event)))
            .route("/{id}", web::get().to(get_event))
            .route("/{id}", admin_only(web::patch().to(update_event)))
            .route("/{id}", admin_only(web::delete().to(delete_event))),
    )
    .service(
        web::scope("/api/v1/event-attendance")
            .wrap(middlewares::RequireRole::admin())
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_attendance))
            .route("", web::post().to(create_attendance))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::patch().to(update_attendance))
            .route("/{id}", web::delete().to(delete_attendance)),
    )
    .service(
        web::scope("/api/v1/alumni")
            .route("", web::get().to(list_alumni))
            .route("", admin_only(web::post().to(create_alumni)))
            .route("/{id}", web::get().to(get_alumni))
            .route("/{id}", admin_only(web::patch().to(update_alumni)))
            .route("/{id}", admin_only(web::delete().to(delete_alumni))),
    )
    .service(
        web::scope("/api/v1/reviews")
            .route("", web::get().to(list_reviews))
            // 任何人都可以留下评价
            .route("", web::post().to(create_review))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", admin_only(web::patch().to(update_review)))
            .route("/{id}", admin_only(web::delete().to(delete_review))),
    );
}
