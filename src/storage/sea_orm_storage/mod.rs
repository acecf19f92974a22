//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod relations;
mod students;
mod subjects;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolApiError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, SqliteTransactionMode,
    TransactionOptions, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolApiError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300));

        // 内存数据库随连接关闭而消失，连接不能被回收
        if url.contains(":memory:") {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(opt)
            .await
            .map_err(|e| SchoolApiError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolApiError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 开启写事务
    ///
    /// SQLite 下使用 `BEGIN IMMEDIATE`，开启时即持有写锁，锁竞争交给 busy_timeout 等待；
    /// 其他数据库忽略该选项。
    pub(super) async fn begin_write(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin_with_options(TransactionOptions {
                sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
                ..Default::default()
            })
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("开启事务失败: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolApiError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_active_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_active_user_by_email_impl(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.list_users_impl().await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 科目模块
    async fn get_or_create_subject(&self, name: &str) -> Result<Subject> {
        self.get_or_create_subject_impl(name).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn update_subject(&self, id: i64, name: &str) -> Result<Option<Subject>> {
        self.update_subject_impl(id, name).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<StudentResponse> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentResponse>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students(&self) -> Result<Vec<StudentResponse>> {
        self.list_students_impl().await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentResponse>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<TeacherResponse> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<TeacherResponse>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherResponse>> {
        self.list_teachers_impl().await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherResponse>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subjects::requests::SubjectRequest;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }

    fn subjects(names: &[&str]) -> Vec<SubjectRequest> {
        names
            .iter()
            .map(|n| SubjectRequest {
                name: n.to_string(),
            })
            .collect()
    }

    // 多个连接同时写入共享科目的学生和教师，全部成功且科目不重复
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_on_file_database() {
        let file = test_support::FileStorage::open(8).await;
        let storage = file.storage.clone();

        let mut student_handles = Vec::new();
        for i in 0..16 {
            let storage = storage.clone();
            student_handles.push(tokio::spawn(async move {
                storage
                    .create_student_impl(CreateStudentRequest {
                        name: format!("S{i}"),
                        roll: i,
                        subjects: subjects(&["Math", "Physics"]),
                    })
                    .await
            }));
        }
        let mut teacher_handles = Vec::new();
        for i in 0..8 {
            let storage = storage.clone();
            teacher_handles.push(tokio::spawn(async move {
                storage
                    .create_teacher_impl(CreateTeacherRequest {
                        name: format!("T{i}"),
                        subjects: subjects(&["Math", "History"]),
                    })
                    .await
            }));
        }

        let mut student_ids = Vec::new();
        for handle in student_handles {
            student_ids.push(handle.await.unwrap().unwrap().id);
        }
        for handle in teacher_handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(storage.list_subjects_impl().await.unwrap().len(), 3);
        assert_eq!(storage.list_teachers_impl().await.unwrap().len(), 8);

        // 并发替换不同学生的科目
        let mut updates = Vec::new();
        for id in student_ids {
            let storage = storage.clone();
            updates.push(tokio::spawn(async move {
                storage
                    .update_student_impl(
                        id,
                        UpdateStudentRequest {
                            subjects: Some(subjects(&["Science"])),
                            ..Default::default()
                        },
                    )
                    .await
            }));
        }
        for update in updates {
            let updated = update.await.unwrap().unwrap().unwrap();
            let names: Vec<&str> = updated.subjects.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["Science"]);
        }

        let students = storage.list_students_impl().await.unwrap();
        assert_eq!(students.len(), 16);
        assert!(students.iter().all(|s| s.teachers.is_empty()));
    }
}
