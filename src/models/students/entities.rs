use serde::{Deserialize, Serialize};

// 学生实体（不含关联）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll: i32,
    pub created_on: chrono::DateTime<chrono::Utc>,
}
