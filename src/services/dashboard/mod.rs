use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ApiResponse;
use crate::services::storage_failure;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    /// 管理后台统计
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        let now = chrono::Utc::now();
        match storage.dashboard_stats(now.timestamp(), now.date_naive()).await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Dashboard statistics retrieved successfully",
            ))),
            Err(e) => Ok(storage_failure("Failed to load dashboard statistics", e)),
        }
    }
}
