pub mod auth;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use auth::AuthService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::HttpResponse;

use crate::models::{ApiResponse, ErrorCode, subjects::requests::SubjectRequest};
use crate::utils::validate::{FieldErrors, validate_name};

/// 字段校验失败响应（400）
pub(crate) fn validation_error_response(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

/// 规范化嵌套科目名称，并把校验错误记入 `subjects` 字段
pub(crate) fn normalize_subjects(subjects: &mut [SubjectRequest], errors: &mut FieldErrors) {
    for subject in subjects.iter_mut() {
        subject.name = subject.name.trim().to_string();
        errors.check("subjects", validate_name(&subject.name));
    }
}
