use serde::Serialize;

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证授权；3xxx 起按实体划分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1002,
    InternalServerError = 1003,

    // 认证授权
    Unauthorized = 2000,
    Forbidden = 2001,
    AuthFailed = 2002,
    TokenInvalid = 2003,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserCreationFailed = 3002,

    // 科目
    SubjectNotFound = 4000,
    SubjectAlreadyExists = 4001,

    // 学生
    StudentNotFound = 5000,

    // 教师
    TeacherNotFound = 6000,
}
