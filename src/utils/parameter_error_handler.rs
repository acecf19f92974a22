use actix_web::{HttpRequest, HttpResponse, error::InternalError, error::JsonPayloadError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::FieldErrors;

static MISSING_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"missing field `([^`]+)`").expect("Invalid missing field regex"));

/// 把 serde 的报错转换成字段级错误；无法定位字段时归入 non_field_errors
fn deserialize_field_errors(message: &str) -> FieldErrors {
    match MISSING_FIELD_RE.captures(message) {
        Some(caps) => FieldErrors::single(&caps[1], "This field is required."),
        None => FieldErrors::single("non_field_errors", message.to_string()),
    }
}

/// JSON 请求体错误处理器
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);

    let response = match &err {
        JsonPayloadError::Deserialize(e) => HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ValidationFailed,
            deserialize_field_errors(&e.to_string()),
            "Validation failed",
        )),
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, "Content type must be application/json"),
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Request body is too large",
            ))
        }
        _ => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid JSON payload: {err}"),
        )),
    };

    InternalError::from_response(err, response).into()
}
