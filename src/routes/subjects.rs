use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{AccessPolicy, RequireJWT};
use crate::models::subjects::requests::SubjectRequest;
use crate::services::SubjectService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

// HTTP处理程序
pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject_data.into_inner(), &req)
        .await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(subject_id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeIDI64,
    subject_data: web::Json<SubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(subject_id.0, subject_data.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(subject_id.0, &req).await
}

// 配置路由：全部需要登录
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/subjects", "/subjects/"])
            .wrap(RequireJWT::new(AccessPolicy::Authenticated))
            .route(web::get().to(list_subjects))
            .route(web::post().to(create_subject)),
    )
    .service(
        web::resource(["/subjects/{id}", "/subjects/{id}/"])
            .wrap(RequireJWT::new(AccessPolicy::Authenticated))
            .route(web::get().to(get_subject))
            .route(web::put().to(update_subject))
            .route(web::delete().to(delete_subject)),
    );
}
