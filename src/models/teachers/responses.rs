use crate::models::students::responses::StudentSummary;
use crate::models::subjects::entities::Subject;
use serde::Serialize;

// 教师详情：科目 + 派生的学生列表
#[derive(Debug, Clone, Serialize)]
pub struct TeacherResponse {
    pub id: i64,
    pub name: String,
    pub subjects: Vec<Subject>,
    pub students: Vec<StudentSummary>,
    pub created_on: chrono::DateTime<chrono::Utc>,
}

// 嵌套在学生详情中的教师（不再展开学生）
#[derive(Debug, Clone, Serialize)]
pub struct TeacherSummary {
    pub id: i64,
    pub name: String,
    pub subjects: Vec<Subject>,
    pub created_on: chrono::DateTime<chrono::Utc>,
}
