use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::UpdateTeacherRequest};
use crate::services::{normalize_subjects, validation_error_response};
use crate::utils::validate::{FieldErrors, validate_name};

pub async fn update_teacher(
    service: &TeacherService,
    teacher_id: i64,
    mut update_data: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut errors = FieldErrors::new();
    if let Some(name) = update_data.name.as_mut() {
        *name = name.trim().to_string();
        errors.check("name", validate_name(name));
    }
    if let Some(subjects) = update_data.subjects.as_mut() {
        normalize_subjects(subjects, &mut errors);
    }
    if let Err(errors) = errors.into_result() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_teacher(teacher_id, update_data).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found.",
        ))),
        Err(e) => {
            error!("Teacher update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Teacher update failed: {e}"),
                )),
            )
        }
    }
}
