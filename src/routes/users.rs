use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::requests::{DeleteAccountRequest, UpdateProfileRequest};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
pub(super) static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_own_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_own_profile(update_data.into_inner(), &req)
        .await
}

pub async fn delete_account(
    req: HttpRequest,
    body: web::Json<DeleteAccountRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_own_account(body.into_inner(), &req).await
}

pub async fn get_instructor_profile(
    req: HttpRequest,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_instructor_profile(user_id.0, &req).await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/profile")
            .wrap(middlewares::RequireJWT)
            .route(web::get().to(get_profile))
            .route(web::patch().to(update_profile))
            .route(web::delete().to(delete_account)),
    )
    .route(
        "/api/v1/instructors/{user_id}/profile",
        web::get().to(get_instructor_profile),
    );
}
