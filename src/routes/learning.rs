use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_only, authenticated};
use crate::models::learning::requests::{
    CreateLessonRequest, CreateModuleRequest, CreateScheduleRequest, LessonListQuery,
    ModuleListQuery, ScheduleListQuery, UpdateLessonRequest, UpdateModuleRequest,
    UpdateScheduleRequest,
};
use crate::services::LearningService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LearningService 实例
static LEARNING_SERVICE: Lazy<LearningService> = Lazy::new(LearningService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListQuery>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.list_schedules(query.into_inner(), &req).await
}

pub async fn get_schedule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.get_schedule(id.0, &req).await
}

pub async fn create_schedule(
    req: HttpRequest,
    body: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.create_schedule(body.into_inner(), &req).await
}

pub async fn update_schedule(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE
        .update_schedule(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_schedule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.delete_schedule(id.0, &req).await
}

pub async fn list_modules(
    req: HttpRequest,
    query: web::Query<ModuleListQuery>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.list_modules(query.into_inner(), &req).await
}

pub async fn get_module(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.get_module(id.0, &req).await
}

pub async fn create_module(
    req: HttpRequest,
    body: web::Json<CreateModuleRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.create_module(body.into_inner(), &req).await
}

pub async fn update_module(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateModuleRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE
        .update_module(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_module(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.delete_module(id.0, &req).await
}

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListQuery>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.list_lessons(query.into_inner(), &req).await
}

pub async fn get_lesson(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.get_lesson(id.0, &req).await
}

pub async fn create_lesson(
    req: HttpRequest,
    body: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.create_lesson(body.into_inner(), &req).await
}

pub async fn update_lesson(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE
        .update_lesson(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_lesson(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LEARNING_SERVICE.delete_lesson(id.0, &req).await
}

// 配置路由
pub fn configure_learning_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .route("", web::get().to(list_schedules))
            // 讲师也可维护自己的排期，权限在业务层检查
            .route("", authenticated(web::post().to(create_schedule)))
            .route("/{id}", web::get().to(get_schedule))
            .route("/{id}", authenticated(web::patch().to(update_schedule)))
            .route("/{id}", authenticated(web::delete().to(delete_schedule))),
    )
    .service(
        web::scope("/api/v1/modules")
            .route("", web::get().to(list_modules))
            .route("", admin_only(web::post().to(create_module)))
            .route("/{id}", web::get().to(get_module))
            .route("/{id}", admin_only(web::patch().to(update_module)))
            .route("/{id}", admin_only(web::delete().to(delete_module))),
    )
    .service(
        web::scope("/api/v1/lessons")
            .route("", web::get().to(list_lessons))
            .route("", admin_only(web::post().to(create_lesson)))
            .route("/{id}", web::get().to(get_lesson))
            .route("/{id}", admin_only(web::patch().to(update_lesson)))
            .route("/{id}", admin_only(web::delete().to(delete_lesson))),
    );
}
