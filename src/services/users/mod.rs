pub mod cleanup;
pub mod create;
pub mod delete;
pub mod get;
pub mod instructor;
pub mod list;
pub mod password;
pub mod profile;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::{
    AdminUpdateUserRequest, CleanupEmailRequest, CreateAdminRequest, DeleteAccountRequest,
    ResetPasswordRequest, UpdateProfileRequest, UserListQuery,
};
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
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

    // 当前用户资料
    pub async fn get_own_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_own_profile(self, request).await
    }

    pub async fn update_own_profile(
        &self,
        update_data: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_own_profile(self, update_data, request).await
    }

    // 注销账号
    pub async fn delete_own_account(
        &self,
        delete_request: DeleteAccountRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::delete_own_account(self, delete_request, request).await
    }

    // 讲师公开资料
    pub async fn get_instructor_profile(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        instructor::get_instructor_profile(self, user_id, request).await
    }

    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建管理员
    pub async fn create_admin(
        &self,
        create_request: CreateAdminRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_admin(self, create_request, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: AdminUpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    // 删除用户
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 重置密码
    pub async fn reset_password(
        &self,
        user_id: i64,
        reset_request: ResetPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::reset_password(self, user_id, reset_request, request).await
    }

    // 释放邮箱
    pub async fn cleanup_email(
        &self,
        cleanup_request: CleanupEmailRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        cleanup::cleanup_email(self, cleanup_request, request).await
    }
}
