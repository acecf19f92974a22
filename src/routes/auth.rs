use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::auth::requests::{TokenObtainRequest, TokenRefreshRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn obtain_token(
    req: HttpRequest,
    credentials: web::Json<TokenObtainRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.obtain_token(credentials.into_inner(), &req).await
}

pub async fn refresh_token(
    req: HttpRequest,
    refresh_data: web::Json<TokenRefreshRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .refresh_token(refresh_data.into_inner(), &req)
        .await
}

// 配置路由（令牌端点本身不需要认证）
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/api/token", "/api/token/"]).route(web::post().to(obtain_token)))
        .service(
            web::resource(["/api/token/refresh", "/api/token/refresh/"])
                .route(web::post().to(refresh_token)),
        );
}
