use serde::Deserialize;

// 科目请求体，创建/更新以及学生、教师的嵌套科目共用
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectRequest {
    pub name: String,
}
