use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::users::USER_SERVICE;
use crate::middlewares;
use crate::models::users::requests::{
    AdminUpdateUserRequest, CleanupEmailRequest, CreateAdminRequest, ResetPasswordRequest,
    UserListQuery,
};
use crate::services::DashboardService;
use crate::utils::SafeIDI64;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_admin(
    req: HttpRequest,
    user_data: web::Json<CreateAdminRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_admin(user_data.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeIDI64,
    update_data: web::Json<AdminUpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn reset_password(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<ResetPasswordRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .reset_password(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn cleanup_email(
    req: HttpRequest,
    body: web::Json<CleanupEmailRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.cleanup_email(body.into_inner(), &req).await
}

pub async fn get_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_dashboard(&req).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireRole::admin())
            .wrap(middlewares::RequireJWT)
            .route("/users", web::get().to(list_users))
            .route("/users", web::post().to(create_admin))
            .route("/users/{id}", web::get().to(get_user))
            .route("/users/{id}", web::patch().to(update_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/users/{id}/reset-password", web::post().to(reset_password))
            .route("/cleanup-email", web::post().to(cleanup_email))
            .route("/dashboard", web::get().to(get_dashboard)),
    );
}
