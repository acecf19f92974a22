use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserCreatedResponse},
};
use crate::services::validation_error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    FieldErrors, normalize_email, validate_email, validate_password, validate_username,
};

const USER_EXISTS_MESSAGE: &str = "User already exists.";

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.username = user_data.username.trim().to_string();
    user_data.email = normalize_email(&user_data.email);

    let mut errors = FieldErrors::new();
    errors.check("username", validate_username(&user_data.username));
    errors.check("email", validate_email(&user_data.email));
    errors.check("password", validate_password(&user_data.password));
    if let Err(errors) = errors.into_result() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    // 活跃用户已占用该邮箱
    match storage.get_active_user_by_email(&user_data.email).await {
        Ok(Some(_)) => {
            return Ok(validation_error_response(FieldErrors::single(
                "email",
                USER_EXISTS_MESSAGE,
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing user: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("User creation failed: {e}"),
                )),
            );
        }
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let user = match storage.create_user(user_data).await {
        Ok(user) => user,
        // 邮箱被非活跃用户占用时由唯一索引拦截
        Err(e) if e.is_unique_violation() => {
            return Ok(validation_error_response(FieldErrors::single(
                "email",
                USER_EXISTS_MESSAGE,
            )));
        }
        Err(e) => {
            error!("User creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("User creation failed: {e}"),
                )),
            );
        }
    };

    match user.generate_token_pair() {
        Ok(tokens) => {
            info!("User {} registered", user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserCreatedResponse {
                    user,
                    refresh_token: tokens.refresh_token,
                    access_token: tokens.access_token,
                },
                "User created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "User created, but token generation failed",
                )),
            )
        }
    }
}
