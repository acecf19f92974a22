use crate::models::subjects::requests::SubjectRequest;
use serde::Deserialize;

// 学生创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    #[serde(default)]
    pub roll: i32,
    #[serde(default)]
    pub subjects: Vec<SubjectRequest>,
}

// 学生更新请求，缺省字段保持原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub roll: Option<i32>,
    pub subjects: Option<Vec<SubjectRequest>>,
}
