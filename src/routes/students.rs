use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::admin_only;
use crate::middlewares::{self, RateLimit};
use crate::models::PaginationQuery;
use crate::models::students::requests::{
    CreateSelectionProcedureRequest, CreateStudentRequest, CreateStudentSelectionRequest,
    EnrollmentListQuery, StudentListQuery, StudentSelectionListQuery, UpdateEnrollmentRequest,
    UpdateSelectionProcedureRequest, UpdateStudentRequest, UpdateStudentSelectionRequest,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// 申请与管理
pub async fn create_application(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_application(body.into_inner(), &req).await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

// 当前学员
pub async fn get_my_student(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_my_student(&req).await
}

pub async fn update_my_student(
    req: HttpRequest,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.update_my_student(body.into_inner(), &req).await
}

pub async fn my_application_status(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_application_status(&req).await
}

pub async fn my_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_dashboard(&req).await
}

pub async fn my_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_courses(&req).await
}

pub async fn my_events(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_events(&req).await
}

pub async fn my_learning_materials(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_learning_materials(&req).await
}

pub async fn enroll_schedule(req: HttpRequest, schedule_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.enroll_schedule(schedule_id.0, &req).await
}

// 报名记录
pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_enrollments(query.into_inner(), &req).await
}

pub async fn get_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_enrollment(id.0, &req).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_enrollment(id.0, body.into_inner(), &req)
        .await
}

// 选拔步骤
pub async fn list_selection_procedures(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_selection_procedures(query.into_inner(), &req)
        .await
}

pub async fn get_selection_procedure(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_selection_procedure(id.0, &req).await
}

pub async fn create_selection_procedure(
    req: HttpRequest,
    body: web::Json<CreateSelectionProcedureRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_selection_procedure(body.into_inner(), &req)
        .await
}

pub async fn update_selection_procedure(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSelectionProcedureRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_selection_procedure(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_selection_procedure(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_selection_procedure(id.0, &req).await
}

// 学员选拔进度
pub async fn list_student_selections(
    req: HttpRequest,
    query: web::Query<StudentSelectionListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_student_selections(query.into_inner(), &req)
        .await
}

pub async fn get_student_selection(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student_selection(id.0, &req).await
}

pub async fn create_student_selection(
    req: HttpRequest,
    body: web::Json<CreateStudentSelectionRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student_selection(body.into_inner(), &req)
        .await
}

pub async fn update_student_selection(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentSelectionRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student_selection(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student_selection(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student_selection(id.0, &req).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            // 按用户限流，限流器须在 RequireJWT 内层
            .route(
                "",
                web::post()
                    .to(create_application)
                    .wrap(RateLimit::application())
                    .wrap(middlewares::RequireJWT),
            )
            .route("", admin_only(web::get().to(list_students)))
            // `/me` 须先于 `/{id}` 注册
            .service(
                web::scope("/me")
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(get_my_student))
                    .route("", web::patch().to(update_my_student))
                    .route("/application-status", web::get().to(my_application_status))
                    .route("/dashboard", web::get().to(my_dashboard))
                    .route("/courses", web::get().to(my_courses))
                    .route("/events", web::get().to(my_events))
                    .route("/learning-materials", web::get().to(my_learning_materials))
                    .route("/enroll/{schedule_id}", web::post().to(enroll_schedule)),
            )
            .route("/{id}", admin_only(web::get().to(get_student)))
            .route("/{id}", admin_only(web::patch().to(update_student)))
            .route("/{id}", admin_only(web::delete().to(delete_student))),
    )
    .service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireRole::admin())
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_enrollments))
            .route("/{id}", web::get().to(get_enrollment))
            .route("/{id}", web::patch().to(update_enrollment)),
    )
    .service(
        web::scope("/api/v1/selection-procedures")
            .route("", web::get().to(list_selection_procedures))
            .route("", admin_only(web::post().to(create_selection_procedure)))
            .route("/{id}", web::get().to(get_selection_procedure))
            .route("/{id}", admin_only(web::patch().to(update_selection_procedure)))
            .route("/{id}", admin_only(web::delete().to(delete_selection_procedure))),
    )
    .service(
        web::scope("/api/v1/student-selections")
            .wrap(middlewares::RequireRole::admin())
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_student_selections))
            .route("", web::post().to(create_student_selection))
            .route("/{id}", web::get().to(get_student_selection))
            .route("/{id}", web::patch().to(update_student_selection))
            .route("/{id}", web::delete().to(delete_student_selection)),
    );
}
