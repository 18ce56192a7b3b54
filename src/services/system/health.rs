use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{ApiResponse, AppStartTime};

fn uptime_seconds(started: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    now.signed_duration_since(started).num_seconds().max(0)
}

/// 存活探针，不访问数据库
pub async fn health(_service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let uptime = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| uptime_seconds(start.start_datetime, Utc::now()))
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthResponse {
            status: "ok".to_string(),
            uptime_seconds: uptime,
        },
        "Service is healthy",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use actix_web::body::to_bytes;

    #[test]
    fn test_uptime_never_negative() {
        let now = Utc::now();
        assert_eq!(uptime_seconds(now, now + chrono::TimeDelta::seconds(90)), 90);
        assert_eq!(uptime_seconds(now + chrono::TimeDelta::seconds(5), now), 0);
    }

    #[actix_web::test]
    async fn test_health_reports_ok() {
        let request = TestRequest::default()
            .app_data(web::Data::new(AppStartTime {
                start_datetime: Utc::now() - chrono::TimeDelta::seconds(30),
            }))
            .to_http_request();
        let response = health(&SystemService::new_lazy(), &request).await.unwrap();
        assert!(response.status().is_success());

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["status"], "ok");
        assert!(json["data"]["uptime_seconds"].as_i64().unwrap() >= 30);
    }
}
