//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::student_subjects::{Column as StudentSubjectColumn, Entity as StudentSubjects};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model};
use crate::entity::teacher_subjects::{Column as TeacherSubjectColumn, Entity as TeacherSubjects};
use crate::errors::{Result, SchoolApiError};
use crate::models::subjects::entities::Subject;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::{BTreeSet, HashMap};

/// 按名称获取或创建科目
///
/// 依赖 name 唯一索引做条件插入，冲突时不写入，随后按名称读取，
/// 并发请求下也只会产生一行。
pub(super) async fn get_or_create_subject_on<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Model> {
    let model = ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    Subjects::insert(model)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("创建科目失败: {e}")))?;

    Subjects::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("查询科目失败: {e}")))?
        .ok_or_else(|| SchoolApiError::database_operation(format!("科目写入后未找到: {name}")))
}

/// 依次解析一组科目名称，返回去重后的科目 ID
pub(super) async fn resolve_subject_ids_on<C: ConnectionTrait>(
    conn: &C,
    names: &[String],
) -> Result<BTreeSet<i64>> {
    let mut ids = BTreeSet::new();
    for name in names {
        ids.insert(get_or_create_subject_on(conn, name).await?.id);
    }
    Ok(ids)
}

/// 批量读取科目，返回 ID -> 科目 映射
pub(super) async fn load_subject_map<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i64>,
) -> Result<HashMap<i64, Subject>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let subjects = Subjects::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("批量查询科目失败: {e}")))?;

    Ok(subjects
        .into_iter()
        .map(|m| (m.id, m.into_subject()))
        .collect())
}

/// 按 ID 顺序取出科目列表
pub(super) fn collect_subjects(ids: &BTreeSet<i64>, map: &HashMap<i64, Subject>) -> Vec<Subject> {
    ids.iter().filter_map(|id| map.get(id).cloned()).collect()
}

impl SeaOrmStorage {
    /// 获取或创建科目
    pub async fn get_or_create_subject_impl(&self, name: &str) -> Result<Subject> {
        Ok(get_or_create_subject_on(&self.db, name).await?.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 列出全部科目
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 更新科目名称
    pub async fn update_subject_impl(&self, id: i64, name: &str) -> Result<Option<Subject>> {
        let existing = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询科目失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if existing.name == name {
            return Ok(Some(existing.into_subject()));
        }

        let mut model: ActiveModel = existing.into();
        model.name = Set(name.to_string());

        let result = model.update(&self.db).await.map_err(|e| {
            let err = SchoolApiError::database_operation(format!("更新科目失败: {e}"));
            if err.is_unique_violation() {
                SchoolApiError::validation("subject with this name already exists.")
            } else {
                err
            }
        })?;

        Ok(Some(result.into_subject()))
    }

    /// 删除科目，关联行在同一事务内删除
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let txn = self.begin_write().await?;

        StudentSubjects::delete_many()
            .filter(StudentSubjectColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除学生科目关联失败: {e}")))?;

        TeacherSubjects::delete_many()
            .filter(TeacherSubjectColumn::SubjectId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除教师科目关联失败: {e}")))?;

        let result = Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除科目失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
