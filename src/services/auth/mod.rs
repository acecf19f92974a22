pub mod obtain;
pub mod refresh;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auth::requests::{TokenObtainRequest, TokenRefreshRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 邮箱 + 密码换取令牌对
    pub async fn obtain_token(
        &self,
        obtain_request: TokenObtainRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        obtain::handle_obtain_token(self, obtain_request, request).await
    }

    // 使用 refresh token 换取新的 access token
    pub async fn refresh_token(
        &self,
        refresh_request: TokenRefreshRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        refresh::handle_refresh_token(self, refresh_request, request).await
    }
}
