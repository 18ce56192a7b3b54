//! 联系我们留言

pub mod admin;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::contact::requests::{ContactListQuery, CreateContactRequest};
use crate::storage::Storage;

pub struct ContactService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContactService {
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

    pub async fn submit(
        &self,
        req: CreateContactRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_contact(self, req, request).await
    }

    pub async fn list_contacts(
        &self,
        query: ContactListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::list_contacts(self, query, request).await
    }

    pub async fn get_contact(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::get_contact(self, id, request).await
    }

    pub async fn delete_contact(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::delete_contact(self, id, request).await
    }
}
