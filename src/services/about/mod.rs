//! 关于我们：单例介绍、核心价值观、团队成员

pub mod core_values;
pub mod team;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::about::requests::{
    CreateCoreValueRequest, CreateTeamMemberRequest, UpdateAboutUsRequest,
    UpdateCoreValueRequest, UpdateTeamMemberRequest,
};
use crate::models::ApiResponse;
use crate::services::{storage_failure, validation_failed};
use crate::storage::Storage;

pub struct AboutService {
    storage: Option<Arc<dyn Storage>>,
}

impl AboutService {
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

    /// 不存在时自动创建默认内容
    pub async fn get_about(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.get_about_us_detail().await {
            Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                detail,
                "About us retrieved successfully",
            ))),
            Err(e) => Ok(storage_failure("Failed to load about us", e)),
        }
    }

    pub async fn update_about(
        &self,
        req: UpdateAboutUsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(errors) = req.validate() {
            return Ok(validation_failed(errors));
        }

        let storage = self.get_storage(request);
        match storage.update_about_us(req).await {
            Ok(about) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                about,
                "About us updated successfully",
            ))),
            Err(e) => Ok(storage_failure("Failed to update about us", e)),
        }
    }

    // 核心价值观
    pub async fn list_core_values(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        core_values::list_core_values(self, request).await
    }

    pub async fn get_core_value(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        core_values::get_core_value(self, id, request).await
    }

    pub async fn create_core_value(
        &self,
        req: CreateCoreValueRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        core_values::create_core_value(self, req, request).await
    }

    pub async fn update_core_value(
        &self,
        id: i64,
        req: UpdateCoreValueRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        core_values::update_core_value(self, id, req, request).await
    }

    pub async fn delete_core_value(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        core_values::delete_core_value(self, id, request).await
    }

    // 团队成员
    pub async fn list_team_members(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        team::list_team_members(self, request).await
    }

    pub async fn get_team_member(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        team::get_team_member(self, id, request).await
    }

    pub async fn create_team_member(
        &self,
        req: CreateTeamMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        team::create_team_member(self, req, request).await
    }

    pub async fn update_team_member(
        &self,
        id: i64,
        req: UpdateTeamMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        team::update_team_member(self, id, req, request).await
    }

    pub async fn delete_team_member(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        team::delete_team_member(self, id, request).await
    }
}
