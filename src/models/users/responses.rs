use super::entities::User;
use serde::Serialize;

// 注册成功响应：用户信息 + 令牌对
#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    #[serde(flatten)]
    pub user: User,
    pub refresh_token: String,
    pub access_token: String,
}
