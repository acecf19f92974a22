use crate::models::subjects::entities::Subject;
use crate::models::teachers::responses::TeacherSummary;
use serde::Serialize;

// 学生详情：科目 + 派生的教师列表
#[derive(Debug, Clone, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub roll: i32,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<TeacherSummary>,
    pub created_on: chrono::DateTime<chrono::Utc>,
}

// 嵌套在教师详情中的学生（不再展开教师）
#[derive(Debug, Clone, Serialize)]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub roll: i32,
    pub subjects: Vec<Subject>,
    pub created_on: chrono::DateTime<chrono::Utc>,
}
