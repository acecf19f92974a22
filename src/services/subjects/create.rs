use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::SubjectRequest};
use crate::services::validation_error_response;
use crate::utils::validate::{FieldErrors, validate_name};

pub async fn create_subject(
    service: &SubjectService,
    subject_data: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = subject_data.name.trim();
    if let Err(msg) = validate_name(name) {
        return Ok(validation_error_response(FieldErrors::single("name", msg)));
    }

    let storage = service.get_storage(request);

    // 同名科目已存在时返回该科目，状态码同样为 201
    match storage.get_or_create_subject(name).await {
        Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
            subject,
            "Subject saved successfully",
        ))),
        Err(e) => {
            error!("Subject creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Subject creation failed: {e}"),
                )),
            )
        }
    }
}
