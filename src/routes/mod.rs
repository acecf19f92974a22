pub mod auth;

pub mod index;

pub mod students;

pub mod subjects;

pub mod teachers;

pub mod users;

pub use auth::configure_auth_routes;
pub use index::configure_index_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::web;

use crate::config::AppConfig;
use crate::utils::json_error_handler;

/// 注册全部路由及 JSON 请求体配置
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let config = AppConfig::get();

    cfg.app_data(
        web::JsonConfig::default()
            .limit(config.server.limits.max_payload_size)
            .error_handler(json_error_handler),
    )
    .configure(configure_index_routes)
    .configure(configure_auth_routes)
    .configure(configure_user_routes)
    .configure(configure_subject_routes)
    .configure(configure_student_routes)
    .configure(configure_teacher_routes);
}
