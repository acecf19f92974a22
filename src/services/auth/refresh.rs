use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::TokenRefreshRequest, responses::TokenRefreshResponse},
};
use crate::utils::jwt::JwtUtils;

const INVALID_TOKEN: &str = "Token is invalid or expired";

fn invalid_token_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::TokenInvalid,
        INVALID_TOKEN,
    ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    refresh_request: TokenRefreshRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let claims = match JwtUtils::verify_refresh_token(&refresh_request.refresh) {
        Ok(claims) => claims,
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            return Ok(invalid_token_response());
        }
    };

    let Some(user_id) = claims.user_id() else {
        return Ok(invalid_token_response());
    };

    // 令牌签发后被停用或删除的用户不能续期
    let storage = service.get_storage(request);
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.is_active => {}
        Ok(_) => {
            info!("Refresh rejected for inactive or missing user {}", user_id);
            return Ok(invalid_token_response());
        }
        Err(e) => {
            error!("Refresh lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Token refresh failed: {e}"),
                )),
            );
        }
    }

    match JwtUtils::generate_access_token(user_id) {
        Ok(access) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TokenRefreshResponse { access },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            error!("Failed to generate access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed",
                )),
            )
        }
    }
}
