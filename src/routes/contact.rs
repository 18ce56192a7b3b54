use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares::RateLimit;
use crate::models::contact::requests::{ContactListQuery, CreateContactRequest};
use crate::services::ContactService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ContactService 实例
static CONTACT_SERVICE: Lazy<ContactService> = Lazy::new(ContactService::new_lazy);

pub async fn submit_contact(
    req: HttpRequest,
    body: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.submit(body.into_inner(), &req).await
}

pub async fn list_contacts(
    req: HttpRequest,
    query: web::Query<ContactListQuery>,
) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.list_contacts(query.into_inner(), &req).await
}

pub async fn get_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.get_contact(id.0, &req).await
}

pub async fn delete_contact(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CONTACT_SERVICE.delete_contact(id.0, &req).await
}

// 配置路由
pub fn configure_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/contact")
            // 3 次/小时/IP
            .route(
                "",
                web::post().to(submit_contact).wrap(RateLimit::contact()),
            )
            .route("", admin_only(web::get().to(list_contacts)))
            .route("/{id}", admin_only(web::get().to(get_contact)))
            .route("/{id}", admin_only(web::delete().to(delete_contact))),
    );
}
