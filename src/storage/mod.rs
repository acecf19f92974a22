use std::sync::Arc;

use crate::models::{
    students::{
        requests::{CreateStudentRequest, UpdateStudentRequest},
        responses::StudentResponse,
    },
    subjects::entities::Subject,
    teachers::{
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
        responses::TeacherResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段需为哈希后的值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取活跃用户
    async fn get_active_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出全部用户
    async fn list_users(&self) -> Result<Vec<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 科目管理方法
    // 按名称获取或创建科目
    async fn get_or_create_subject(&self, name: &str) -> Result<Subject>;
    // 通过ID获取科目
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    // 列出全部科目
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 更新科目名称
    async fn update_subject(&self, id: i64, name: &str) -> Result<Option<Subject>>;
    // 删除科目（同时移除关联，不影响学生与教师）
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 创建学生并关联科目
    async fn create_student(&self, student: CreateStudentRequest) -> Result<StudentResponse>;
    // 通过ID获取学生详情
    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentResponse>>;
    // 列出全部学生详情
    async fn list_students(&self) -> Result<Vec<StudentResponse>>;
    // 更新学生，提供非空科目列表时整体替换关联
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentResponse>>;
    // 删除学生
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    // 创建教师并关联科目
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<TeacherResponse>;
    // 通过ID获取教师详情
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherResponse>>;
    // 列出全部教师详情
    async fn list_teachers(&self) -> Result<Vec<TeacherResponse>>;
    // 更新教师，提供非空科目列表时整体替换关联
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherResponse>>;
    // 删除教师
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
