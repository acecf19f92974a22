use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::TokenObtainRequest, responses::TokenPairResponse},
};
use crate::services::validation_error_response;
use crate::utils::password::verify_password;
use crate::utils::validate::{FieldErrors, normalize_email, validate_password};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

pub async fn handle_obtain_token(
    service: &AuthService,
    obtain_request: TokenObtainRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = normalize_email(&obtain_request.email);

    let mut errors = FieldErrors::new();
    if email.is_empty() {
        errors.add("email", "This field may not be blank.");
    }
    errors.check("password", validate_password(&obtain_request.password));
    if let Err(errors) = errors.into_result() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    // 1. 只有活跃用户可以登录
    let user = match storage.get_active_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            info!("Login rejected: no active account for {}", email);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&obtain_request.password, &user.password_hash) {
        info!("Login rejected: wrong password for user {}", user.id);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            INVALID_CREDENTIALS,
        )));
    }

    // 3. 生成令牌对
    match user.generate_token_pair() {
        Ok(tokens) => {
            info!("User {} logged in successfully", user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TokenPairResponse {
                    refresh: tokens.refresh_token,
                    access: tokens.access_token,
                },
                "Login successful",
            )))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
