use serde::{Deserialize, Serialize};

// 教师实体（不含关联）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub created_on: chrono::DateTime<chrono::Utc>,
}
