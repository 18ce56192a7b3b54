use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::{admin_only, authenticated};
use crate::models::catalog::requests::{
    CategoryListQuery, CourseListQuery, CreateCategoryRequest, CreateCourseRequest,
    CreateLocationRequest, CreateMaterialRequest, CreatePartnerRequest, LocationListQuery,
    PartnerListQuery, UpdateCategoryRequest, UpdateCourseRequest, UpdateLocationRequest,
    UpdatePartnerRequest,
};
use crate::services::CatalogService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CatalogService 实例
static CATALOG_SERVICE: Lazy<CatalogService> = Lazy::new(CatalogService::new_lazy);

// 分类
pub async fn list_categories(
    req: HttpRequest,
    query: web::Query<CategoryListQuery>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_categories(query.into_inner(), &req).await
}

pub async fn get_category(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_category(id.0, &req).await
}

pub async fn create_category(
    req: HttpRequest,
    body: web::Json<CreateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_category(body.into_inner(), &req).await
}

pub async fn update_category(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_category(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_category(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_category(id.0, &req).await
}

// 地点
pub async fn list_locations(
    req: HttpRequest,
    query: web::Query<LocationListQuery>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_locations(query.into_inner(), &req).await
}

pub async fn get_location(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_location(id.0, &req).await
}

pub async fn create_location(
    req: HttpRequest,
    body: web::Json<CreateLocationRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_location(body.into_inner(), &req).await
}

pub async fn update_location(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateLocationRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_location(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_location(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_location(id.0, &req).await
}

// 合作伙伴
pub async fn list_partners(
    req: HttpRequest,
    query: web::Query<PartnerListQuery>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_partners(query.into_inner(), &req).await
}

pub async fn get_partner(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_partner(id.0, &req).await
}

pub async fn create_partner(
    req: HttpRequest,
    body: web::Json<CreatePartnerRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_partner(body.into_inner(), &req).await
}

pub async fn update_partner(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePartnerRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_partner(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_partner(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_partner(id.0, &req).await
}

// 课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.get_course(id.0, &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .update_course(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_course(id.0, &req).await
}

// 课程资料
pub async fn list_materials(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.list_materials(course_id.0, &req).await
}

pub async fn create_material(
    req: HttpRequest,
    course_id: SafeIDI64,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE
        .create_material(course_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_material(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATALOG_SERVICE.delete_material(id.0, &req).await
}

// 配置路由：读取公开，写入仅管理员
pub fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/categories")
            .route("", web::get().to(list_categories))
            .route("", admin_only(web::post().to(create_category)))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", admin_only(web::patch().to(update_category)))
            .route("/{id}", admin_only(web::delete().to(delete_category))),
    )
    .service(
        web::scope("/api/v1/locations")
            .route("", web::get().to(list_locations))
            .route("", admin_only(web::post().to(create_location)))
            .route("/{id}", web::get().to(get_location))
            .route("/{id}", admin_only(web::patch().to(update_location)))
            .route("/{id}", admin_only(web::delete().to(delete_location))),
    )
    .service(
        web::scope("/api/v1/partners")
            .route("", web::get().to(list_partners))
            .route("", admin_only(web::post().to(create_partner)))
            .route("/{id}", web::get().to(get_partner))
            .route("/{id}", admin_only(web::patch().to(update_partner)))
            .route("/{id}", admin_only(web::delete().to(delete_partner))),
    )
    .service(
        web::scope("/api/v1/courses")
            .route("", web::get().to(list_courses))
            .route("", admin_only(web::post().to(create_course)))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", admin_only(web::patch().to(update_course)))
            .route("/{id}", admin_only(web::delete().to(delete_course)))
            // 资料权限在业务层按申请状态判断
            .route("/{id}/materials", authenticated(web::get().to(list_materials)))
            .route("/{id}/materials", admin_only(web::post().to(create_material))),
    )
    .route(
        "/api/v1/materials/{id}",
        admin_only(web::delete().to(delete_material)),
    );
}
