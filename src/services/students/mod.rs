//! 学员服务：申请、档案、报名、选拔流程
//!
//! 申请状态由学员的选拔进度推导（见 `ApplicationStatus::derive`），
//! 报名排期、学习资料等操作都以它为准。

pub mod admin;
pub mod application;
pub mod enrollments;
pub mod me;
pub mod procedures;
pub mod selections;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result;
use crate::models::PaginationQuery;
use crate::models::students::entities::{ApplicationStatus, Student, StudentSelection};
use crate::models::students::requests::{
    CreateSelectionProcedureRequest, CreateStudentRequest, CreateStudentSelectionRequest,
    EnrollmentListQuery, StudentListQuery, StudentSelectionListQuery,
    UpdateEnrollmentRequest, UpdateSelectionProcedureRequest, UpdateStudentRequest,
    UpdateStudentSelectionRequest,
};
use crate::storage::Storage;

/// 某用户的申请及其选拔进度
pub(crate) struct LoadedApplication {
    pub student: Option<Student>,
    pub steps: Vec<StudentSelection>,
    pub status: ApplicationStatus,
}

pub(crate) async fn load_application(
    storage: &Arc<dyn Storage>,
    user_id: i64,
) -> Result<LoadedApplication> {
    let student = storage.get_student_by_user_id(user_id).await?;
    let steps = match &student {
        Some(student) => storage.list_selections_for_student(student.id).await?,
        None => Vec::new(),
    };
    let statuses: Vec<_> = steps.iter().map(|s| s.status).collect();
    let status = ApplicationStatus::derive(student.is_some(), &statuses);
    Ok(LoadedApplication {
        student,
        steps,
        status,
    })
}

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 提交申请
    pub async fn create_application(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        application::create_application(self, req, request).await
    }

    // 管理员：学员档案
    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::list_students(self, query, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::update_student(self, id, req, request).await
    }

    pub async fn delete_student(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        admin::delete_student(self, id, request).await
    }

    // 当前学员
    pub async fn get_my_student(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::get_my_student(self, request).await
    }

    pub async fn update_my_student(
        &self,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        me::update_my_student(self, req, request).await
    }

    pub async fn my_application_status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_application_status(self, request).await
    }

    pub async fn my_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_dashboard(self, request).await
    }

    pub async fn my_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_courses(self, request).await
    }

    pub async fn my_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_events(self, request).await
    }

    pub async fn my_learning_materials(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::my_learning_materials(self, request).await
    }

    pub async fn enroll_schedule(
        &self,
        schedule_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        me::enroll_schedule(self, schedule_id, request).await
    }

    // 课程报名
    pub async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::list_enrollments(self, query, request).await
    }

    pub async fn get_enrollment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        enrollments::get_enrollment(self, id, request).await
    }

    pub async fn update_enrollment(
        &self,
        id: i64,
        req: UpdateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::update_enrollment(self, id, req, request).await
    }

    // 选拔步骤
    pub async fn list_selection_procedures(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        procedures::list_procedures(self, query, request).await
    }

    pub async fn get_selection_procedure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        procedures::get_procedure(self, id, request).await
    }

    pub async fn create_selection_procedure(
        &self,
        req: CreateSelectionProcedureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        procedures::create_procedure(self, req, request).await
    }

    pub async fn update_selection_procedure(
        &self,
        id: i64,
        req: UpdateSelectionProcedureRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        procedures::update_procedure(self, id, req, request).await
    }

    pub async fn delete_selection_procedure(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        procedures::delete_procedure(self, id, request).await
    }

    // 学员选拔进度
    pub async fn list_student_selections(
        &self,
        query: StudentSelectionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        selections::list_selections(self, query, request).await
    }

    pub async fn get_student_selection(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        selections::get_selection(self, id, request).await
    }

    pub async fn create_student_selection(
        &self,
        req: CreateStudentSelectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        selections::create_selection(self, req, request).await
    }

    pub async fn update_student_selection(
        &self,
        id: i64,
        req: UpdateStudentSelectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        selections::update_selection(self, id, req, request).await
    }

    pub async fn delete_student_selection(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        selections::delete_selection(self, id, request).await
    }
}
