use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub methods: &'static str,
    pub auth: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceIndex {
    pub name: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<i64>,
    pub endpoints: Vec<EndpointInfo>,
}

const ENDPOINTS: [(&str, &str, &str); 10] = [
    ("/users/", "GET, POST", "public"),
    ("/users/{id}/", "GET", "public"),
    ("/subjects/", "GET, POST", "bearer"),
    ("/subjects/{id}/", "GET, PUT, DELETE", "bearer"),
    ("/students/", "GET, POST", "public"),
    ("/students/{id}/", "GET, PUT, DELETE", "public"),
    ("/teachers/", "GET, POST", "public"),
    ("/teachers/{id}/", "GET, PUT, DELETE", "public"),
    ("/api/token/", "POST", "public"),
    ("/api/token/refresh/", "POST", "public"),
];

pub async fn index(req: HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = req.app_data::<web::Data<AppStartTime>>().map(|start| {
        chrono::Utc::now()
            .signed_duration_since(start.start_datetime)
            .num_seconds()
    });

    let endpoints = ENDPOINTS
        .iter()
        .map(|&(path, methods, auth)| EndpointInfo {
            path,
            methods,
            auth,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ServiceIndex {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds,
            endpoints,
        },
        "School API",
    )))
}

// 配置路由
pub fn configure_index_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}
