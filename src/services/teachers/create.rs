use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::CreateTeacherRequest};
use crate::services::{normalize_subjects, validation_error_response};
use crate::utils::validate::{FieldErrors, validate_name};

pub async fn create_teacher(
    service: &TeacherService,
    mut teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    teacher_data.name = teacher_data.name.trim().to_string();

    let mut errors = FieldErrors::new();
    errors.check("name", validate_name(&teacher_data.name));
    normalize_subjects(&mut teacher_data.subjects, &mut errors);
    if let Err(errors) = errors.into_result() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} saved", teacher.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher created successfully",
            )))
        }
        Err(e) => {
            error!("Teacher creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Teacher creation failed: {e}"),
                )),
            )
        }
    }
}
