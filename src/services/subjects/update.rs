use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubjectService;
use crate::errors::SchoolApiError;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::SubjectRequest};
use crate::services::validation_error_response;
use crate::utils::validate::{FieldErrors, validate_name};

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    subject_data: SubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = subject_data.name.trim();
    if let Err(msg) = validate_name(name) {
        return Ok(validation_error_response(FieldErrors::single("name", msg)));
    }

    let storage = service.get_storage(request);

    match storage.update_subject(subject_id, name).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Subject not found.",
        ))),
        Err(SchoolApiError::Validation(msg)) => {
            Ok(validation_error_response(FieldErrors::single("name", msg)))
        }
        Err(e) => {
            error!("Subject update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Subject update failed: {e}"),
                )),
            )
        }
    }
}
