//! 课程目录服务：分类、地点、合作伙伴、课程、课程资料

pub mod categories;
pub mod courses;
pub mod locations;
pub mod materials;
pub mod partners;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::catalog::requests::{
    CategoryListQuery, CourseListQuery, CreateCategoryRequest, CreateCourseRequest,
    CreateLocationRequest, CreateMaterialRequest, CreatePartnerRequest, LocationListQuery,
    PartnerListQuery, UpdateCategoryRequest, UpdateCourseRequest, UpdateLocationRequest,
    UpdatePartnerRequest,
};
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
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

    // 分类
    pub async fn list_categories(
        &self,
        query: CategoryListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::list_categories(self, query, request).await
    }

    pub async fn get_category(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        categories::get_category(self, id, request).await
    }

    pub async fn create_category(
        &self,
        req: CreateCategoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::create_category(self, req, request).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        req: UpdateCategoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::update_category(self, id, req, request).await
    }

    pub async fn delete_category(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        categories::delete_category(self, id, request).await
    }

    // 地点
    pub async fn list_locations(
        &self,
        query: LocationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        locations::list_locations(self, query, request).await
    }

    pub async fn get_location(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        locations::get_location(self, id, request).await
    }

    pub async fn create_location(
        &self,
        req: CreateLocationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        locations::create_location(self, req, request).await
    }

    pub async fn update_location(
        &self,
        id: i64,
        req: UpdateLocationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        locations::update_location(self, id, req, request).await
    }

    pub async fn delete_location(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        locations::delete_location(self, id, request).await
    }

    // 合作伙伴
    pub async fn list_partners(
        &self,
        query: PartnerListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        partners::list_partners(self, query, request).await
    }

    pub async fn get_partner(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        partners::get_partner(self, id, request).await
    }

    pub async fn create_partner(
        &self,
        req: CreatePartnerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        partners::create_partner(self, req, request).await
    }

    pub async fn update_partner(
        &self,
        id: i64,
        req: UpdatePartnerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        partners::update_partner(self, id, req, request).await
    }

    pub async fn delete_partner(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        partners::delete_partner(self, id, request).await
    }

    // 课程
    pub async fn list_courses(
        &self,
        query: CourseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        courses::list_courses(self, query, request).await
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        courses::get_course(self, id, request).await
    }

    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        courses::create_course(self, req, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        req: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        courses::update_course(self, id, req, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        courses::delete_course(self, id, request).await
    }

    // 课程资料
    pub async fn list_materials(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        materials::list_materials(self, course_id, request).await
    }

    pub async fn create_material(
        &self,
        course_id: i64,
        req: CreateMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        materials::create_material(self, course_id, req, request).await
    }

    pub async fn delete_material(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        materials::delete_material(self, id, request).await
    }
}
