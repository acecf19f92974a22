/*!
 * JWT 认证中间件
 *
 * 每个路由显式声明自己的访问策略 [`AccessPolicy`]，中间件据此决定是否放行。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::{AccessPolicy, RequireJWT};
 *
 * cfg.service(
 *     web::resource(["/subjects", "/subjects/"])
 *         .wrap(RequireJWT::new(AccessPolicy::Authenticated))
 *         .route(web::get().to(list_subjects)),
 * );
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件验证 access token，并通过缓存或存储层加载活跃用户
 * 3. `Public` 路由在缺少令牌时照常放行；其他策略缺少或令牌无效时返回 401，
 *    `Staff` 策略下非管理用户返回 403
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::{ErrorCode, users::entities};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

/// 路由访问策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// 任何人可访问；携带有效令牌时仍会解析用户
    Public,
    /// 需要有效的 access token
    Authenticated,
    /// 需要有效令牌且用户为 staff / admin / superuser
    Staff,
}

#[derive(Clone)]
pub struct RequireJWT {
    policy: AccessPolicy,
}

impl RequireJWT {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }
}

/// 认证失败原因
enum AuthFailure {
    /// 请求未携带令牌
    Missing,
    /// 令牌或用户无效
    Invalid(String),
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// 辅助函数：提取并验证 JWT access token，返回对应的活跃用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, AuthFailure> {
    let token = bearer_token(req).ok_or(AuthFailure::Missing)?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Invalid("Invalid JWT token".to_string())
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let cache_key = format!("user:{token}");

    // 从缓存中获取用户信息
    if let Some(cache) = &cache {
        match cache.get_raw(&cache_key).await {
            CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
                Ok(user) => return Ok(user),
                Err(_) => {
                    cache.remove(&cache_key).await;
                    debug!("Failed to deserialize cached user, falling back to storage");
                }
            },
            CacheResult::NotFound => {
                debug!("User not found in cache, loading from storage");
            }
        }
    }

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage not found in app data");
            AuthFailure::Invalid("Authentication backend unavailable".to_string())
        })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Invalid("Invalid user ID in JWT".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve user {} from storage: {}", user_id, e);
            AuthFailure::Invalid("Failed to retrieve user from storage".to_string())
        })?
        .ok_or_else(|| AuthFailure::Invalid("User not found".to_string()))?;

    if !user.is_active {
        return Err(AuthFailure::Invalid("User is not active".to_string()));
    }

    // 将用户信息存入缓存
    if let (Some(cache), Ok(user_json)) = (&cache, serde_json::to_string(&user)) {
        cache
            .insert_raw(cache_key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
            policy: self.policy,
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
    policy: AccessPolicy,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let policy = self.policy;
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            let failure = match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    if policy == AccessPolicy::Staff && !user.is_privileged() {
                        info!(
                            "User {} lacks staff privilege for {}",
                            user.id,
                            req.path()
                        );
                        return Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "You do not have permission to perform this action.",
                            )
                            .map_into_right_body(),
                        ));
                    }

                    debug!("JWT authentication successful for ID: {}", user.id);
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                Err(failure) => failure,
            };

            let message = match failure {
                AuthFailure::Missing if policy == AccessPolicy::Public => {
                    return Ok(srv.call(req).await?.map_into_left_body());
                }
                AuthFailure::Missing => {
                    "Authentication credentials were not provided.".to_string()
                }
                AuthFailure::Invalid(err) => err,
            };

            info!(
                "JWT authentication failed for request to {}: {}",
                req.path(),
                message
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    &format!("Unauthorized: {message}"),
                )
                .map_into_right_body(),
            ))
        })
    }
}
