use serde::{Deserialize, Serialize};

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_on: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 是否具备管理权限（staff / admin / superuser 任一即可）
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.is_admin || self.is_superuser
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id)
    }
}
