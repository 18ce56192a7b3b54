pub mod about;

pub mod admin;

pub mod auth;

pub mod catalog;

pub mod community;

pub mod contact;

pub mod files;

pub mod learning;

pub mod students;

pub mod system;

pub mod users;

pub use about::configure_about_routes;
pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use community::configure_community_routes;
pub use contact::configure_contact_routes;
pub use files::configure_file_routes;
pub use learning::configure_learning_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::Route;

use crate::middlewares;

// 公开资源上的写操作：先认证，再要求管理员
pub(crate) fn admin_only(route: Route) -> Route {
    route
        .wrap(middlewares::RequireRole::admin())
        .wrap(middlewares::RequireJWT)
}

pub(crate) fn authenticated(route: Route) -> Route {
    route.wrap(middlewares::RequireJWT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use chrono::{TimeDelta, Utc};
    use sea_orm::{ActiveModelTrait, Set};
    use serde_json::json;

    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::entity::users::ActiveModel as UserActiveModel;
    use crate::models::users::entities::{ProfileRole, User, UserRole};
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::fixtures::{
        new_user, seed_course, seed_location, seed_user,
    };
    use crate::storage::{Storage, UserStorage};
    use crate::utils::jwt::JwtUtils;

    macro_rules! init_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($storage.clone() as Arc<dyn Storage>))
                    .app_data(web::Data::new(
                        Arc::new(MokaCacheWrapper::new().unwrap()) as Arc<dyn ObjectCache>
                    ))
                    .configure(configure_auth_routes)
                    .configure(configure_admin_routes)
                    .configure(configure_learning_routes),
            )
            .await
        };
    }

    async fn seed_account(
        storage: &SeaOrmStorage,
        username: &str,
        role: UserRole,
        profile_role: ProfileRole,
    ) -> User {
        let mut req = new_user(username, &format!("{username}@example.com"));
        req.role = role;
        req.profile_role = profile_role;
        req.is_email_verified = true;
        storage.create_user(req).await.unwrap()
    }

    fn bearer(user: &User) -> (&'static str, String) {
        let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    fn schedule_body(course_id: i64, location_id: i64) -> serde_json::Value {
        json!({
            "course_id": course_id,
            "location_id": location_id,
            "start_date": "2026-01-10",
            "end_date": "2026-04-10",
        })
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let app = init_app!(storage);

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/users")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/modules")
            .set_json(json!({ "schedule_id": 1, "title": "Intro", "order": 1 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_non_admin_is_forbidden_on_admin_routes() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let student = seed_account(&storage, "ada", UserRole::User, ProfileRole::Student).await;
        let app = init_app!(storage);

        let req = test::TestRequest::get()
            .uri("/api/v1/admin/dashboard")
            .insert_header(bearer(&student))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/modules")
            .insert_header(bearer(&student))
            .set_json(json!({ "schedule_id": 1, "title": "Intro", "order": 1 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn test_only_instructors_and_admins_create_schedules() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let course = seed_course(&storage, "Cloud").await;
        let location = seed_location(&storage, "Lagos Hub").await;
        let student = seed_account(&storage, "ada", UserRole::User, ProfileRole::Student).await;
        let instructor =
            seed_account(&storage, "bola", UserRole::User, ProfileRole::Instructor).await;
        let app = init_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/schedules")
            .insert_header(bearer(&student))
            .set_json(schedule_body(course.id, location.id))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/schedules")
            .insert_header(bearer(&instructor))
            .set_json(schedule_body(course.id, location.id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["instructor_id"], json!(instructor.id));
    }

    #[actix_web::test]
    async fn test_expired_verification_token_is_kept() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let user = seed_user(&storage, "ada").await;
        let stale = (Utc::now() - TimeDelta::hours(25)).timestamp();
        UserActiveModel {
            id: Set(user.id),
            email_verification_sent_at: Set(Some(stale)),
            ..Default::default()
        }
        .update(&storage.db)
        .await
        .unwrap();
        let app = init_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-email")
            .set_json(json!({ "token": "token-ada" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let unchanged = storage
            .get_user_by_verification_token("token-ada")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.id, user.id);
        assert!(!unchanged.is_email_verified);
    }

    #[actix_web::test]
    async fn test_fresh_verification_token_verifies() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let user = seed_user(&storage, "ada").await;
        let app = init_app!(storage);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-email")
            .set_json(json!({ "token": "token-ada" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let verified = storage.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(verified.is_email_verified);
        assert!(
            storage
                .get_user_by_verification_token("token-ada")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn test_suspension_applies_to_cached_session() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let admin = seed_account(&storage, "root", UserRole::Admin, ProfileRole::Instructor).await;
        let student = seed_account(&storage, "ada", UserRole::User, ProfileRole::Student).await;
        let app = init_app!(storage);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&student))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/v1/admin/users/{}", student.id))
            .insert_header(bearer(&admin))
            .set_json(json!({ "status": "suspended" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer(&student))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn test_admin_cannot_delete_self() {
        let storage = Arc::new(SeaOrmStorage::in_memory().await);
        let admin = seed_account(&storage, "root", UserRole::Admin, ProfileRole::Instructor).await;
        let app = init_app!(storage);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/users/{}", admin.id))
            .insert_header(bearer(&admin))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
        assert!(storage.get_user_by_id(admin.id).await.unwrap().is_some());
    }
}
