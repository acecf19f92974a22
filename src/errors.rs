//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和对应的 HTTP 状态码。

use actix_web::http::StatusCode;
use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status_code() 方法 - 返回 HTTP 状态码
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_api_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolApiError {
            $($variant(String),)*
        }

        impl SchoolApiError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolApiError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolApiError::$variant(_) => $type_name,)*
                }
            }

            /// 获取对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(SchoolApiError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolApiError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolApiError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolApiError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_api_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", SERVICE_UNAVAILABLE),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E004", "Validation Error", BAD_REQUEST),
    NotFound("E005", "Resource Not Found", NOT_FOUND),
    Serialization("E006", "Serialization Error", INTERNAL_SERVER_ERROR),
    Authentication("E007", "Authentication Error", UNAUTHORIZED),
    Authorization("E008", "Authorization Error", FORBIDDEN),
    Token("E009", "Token Error", INTERNAL_SERVER_ERROR),
}

impl SchoolApiError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突（不同数据库的报错文本不同）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for SchoolApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolApiError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolApiError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolApiError {
    fn from(err: serde_json::Error) -> Self {
        SchoolApiError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for SchoolApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SchoolApiError::Token(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolApiError::database_config("test").code(), "E001");
        assert_eq!(SchoolApiError::validation("test").code(), "E004");
        assert_eq!(SchoolApiError::authentication("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolApiError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            SchoolApiError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SchoolApiError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolApiError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolApiError::authentication("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SchoolApiError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = SchoolApiError::database_operation(
            "Execution Error: UNIQUE constraint failed: users.email",
        );
        assert!(sqlite.is_unique_violation());

        let postgres = SchoolApiError::database_operation(
            "duplicate key value violates unique constraint \"users_email_key\"",
        );
        assert!(postgres.is_unique_violation());

        assert!(!SchoolApiError::database_operation("connection reset").is_unique_violation());
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolApiError::validation("Invalid name");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid name"));
    }
}
