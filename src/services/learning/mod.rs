//! 学习排期服务：排期、模块、课时

pub mod lessons;
pub mod modules;
pub mod schedules;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::learning::requests::{
    CreateLessonRequest, CreateModuleRequest, CreateScheduleRequest, LessonListQuery,
    ModuleListQuery, ScheduleListQuery, UpdateLessonRequest, UpdateModuleRequest,
    UpdateScheduleRequest,
};
use crate::storage::Storage;

pub struct LearningService {
    storage: Option<Arc<dyn Storage>>,
}

impl LearningService {
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

    // 排期
    pub async fn list_schedules(
        &self,
        query: ScheduleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::list_schedules(self, query, request).await
    }

    pub async fn get_schedule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        schedules::get_schedule(self, id, request).await
    }

    pub async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::create_schedule(self, req, request).await
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::update_schedule(self, id, req, request).await
    }

    pub async fn delete_schedule(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedules::delete_schedule(self, id, request).await
    }

    // 模块
    pub async fn list_modules(
        &self,
        query: ModuleListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        modules::list_modules(self, query, request).await
    }

    pub async fn get_module(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        modules::get_module(self, id, request).await
    }

    pub async fn create_module(
        &self,
        req: CreateModuleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        modules::create_module(self, req, request).await
    }

    pub async fn update_module(
        &self,
        id: i64,
        req: UpdateModuleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        modules::update_module(self, id, req, request).await
    }

    pub async fn delete_module(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        modules::delete_module(self, id, request).await
    }

    // 课时
    pub async fn list_lessons(
        &self,
        query: LessonListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lessons::list_lessons(self, query, request).await
    }

    pub async fn get_lesson(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lessons::get_lesson(self, id, request).await
    }

    pub async fn create_lesson(
        &self,
        req: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lessons::create_lesson(self, req, request).await
    }

    pub async fn update_lesson(
        &self,
        id: i64,
        req: UpdateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lessons::update_lesson(self, id, req, request).await
    }

    pub async fn delete_lesson(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lessons::delete_lesson(self, id, request).await
    }
}
