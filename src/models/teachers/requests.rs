use crate::models::subjects::requests::SubjectRequest;
use serde::Deserialize;

// 教师创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<SubjectRequest>,
}

// 教师更新请求，缺省字段保持原值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub subjects: Option<Vec<SubjectRequest>>,
}
