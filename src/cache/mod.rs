//! 对象缓存
//!
//! 目前仅用于认证中间件缓存 token 对应的用户信息，避免每个请求都查询数据库。

pub mod moka;

use async_trait::async_trait;
use std::sync::Arc;

pub use self::moka::MokaCacheWrapper;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// 按配置创建缓存实例
pub fn create_cache() -> Arc<dyn ObjectCache> {
    Arc::new(MokaCacheWrapper::default())
}
