use serde::Deserialize;

// 换取令牌请求（邮箱 + 密码）
#[derive(Debug, Deserialize)]
pub struct TokenObtainRequest {
    pub email: String,
    pub password: String,
}

// 刷新令牌请求
#[derive(Debug, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}
