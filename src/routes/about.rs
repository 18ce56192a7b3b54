use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::models::about::requests::{
    CreateCoreValueRequest, CreateTeamMemberRequest, UpdateAboutUsRequest,
    UpdateCoreValueRequest, UpdateTeamMemberRequest,
};
use crate::services::AboutService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AboutService 实例
static ABOUT_SERVICE: Lazy<AboutService> = Lazy::new(AboutService::new_lazy);

pub async fn get_about(req: HttpRequest) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.get_about(&req).await
}

pub async fn update_about(
    req: HttpRequest,
    body: web::Json<UpdateAboutUsRequest>,
) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.update_about(body.into_inner(), &req).await
}

pub async fn list_core_values(req: HttpRequest) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.list_core_values(&req).await
}

pub async fn get_core_value(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.get_core_value(id.0, &req).await
}

pub async fn create_core_value(
    req: HttpRequest,
    body: web::Json<CreateCoreValueRequest>,
) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.create_core_value(body.into_inner(), &req).await
}

pub async fn update_core_value(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCoreValueRequest>,
) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE
        .update_core_value(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_core_value(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.delete_core_value(id.0, &req).await
}

pub async fn list_team_members(req: HttpRequest) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.list_team_members(&req).await
}

pub async fn get_team_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.get_team_member(id.0, &req).await
}

pub async fn create_team_member(
    req: HttpRequest,
    body: web::Json<CreateTeamMemberRequest>,
) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.create_team_member(body.into_inner(), &req).await
}

pub async fn update_team_member(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTeamMemberRequest>,
) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE
        .update_team_member(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_team_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ABOUT_SERVICE.delete_team_member(id.0, &req).await
}

// 配置路由
pub fn configure_about_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/about", web::get().to(get_about))
        .route("/api/v1/about", admin_only(web::put().to(update_about)))
        .service(
            web::scope("/api/v1/core-values")
                .route("", web::get().to(list_core_values))
                .route("", admin_only(web::post().to(create_core_value)))
                .route("/{id}", web::get().to(get_core_value))
                .route("/{id}", admin_only(web::patch().to(update_core_value)))
                .route("/{id}", admin_only(web::delete().to(delete_core_value))),
        )
        .service(
            web::scope("/api/v1/team-members")
                .route("", web::get().to(list_team_members))
                .route("", admin_only(web::post().to(create_team_member)))
                .route("/{id}", web::get().to(get_team_member))
                .route("/{id}", admin_only(web::patch().to(update_team_member)))
                .route("/{id}", admin_only(web::delete().to(delete_team_member))),
        );
}
