//! 教师存储操作

use super::SeaOrmStorage;
use super::relations::{LinkDiff, LinkIndex, derive_via_subjects, group_links, linked};
use super::students::{load_student_summaries, subject_student_index};
use super::subjects::{collect_subjects, load_subject_map, resolve_subject_ids_on};
use crate::entity::teacher_subjects::{
    ActiveModel as TeacherSubjectActiveModel, Column as TeacherSubjectColumn,
    Entity as TeacherSubjects,
};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers, Model};
use crate::errors::{Result, SchoolApiError};
use crate::models::subjects::requests::SubjectRequest;
use crate::models::teachers::{
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
    responses::{TeacherResponse, TeacherSummary},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{BTreeSet, HashMap};

/// 教师 -> 科目 索引
pub(super) async fn teacher_subject_index<C: ConnectionTrait>(
    conn: &C,
    teacher_ids: &BTreeSet<i64>,
) -> Result<LinkIndex> {
    if teacher_ids.is_empty() {
        return Ok(LinkIndex::new());
    }

    let links = TeacherSubjects::find()
        .filter(TeacherSubjectColumn::TeacherId.is_in(teacher_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("查询教师科目关联失败: {e}")))?;

    Ok(group_links(
        links.into_iter().map(|l| (l.teacher_id, l.subject_id)),
    ))
}

/// 科目 -> 教师 索引
pub(super) async fn subject_teacher_index<C: ConnectionTrait>(
    conn: &C,
    subject_ids: &BTreeSet<i64>,
) -> Result<LinkIndex> {
    if subject_ids.is_empty() {
        return Ok(LinkIndex::new());
    }

    let links = TeacherSubjects::find()
        .filter(TeacherSubjectColumn::SubjectId.is_in(subject_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("查询科目教师关联失败: {e}")))?;

    Ok(group_links(
        links.into_iter().map(|l| (l.subject_id, l.teacher_id)),
    ))
}

/// 批量读取教师摘要（含科目，不含学生）
pub(super) async fn load_teacher_summaries<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i64>,
) -> Result<HashMap<i64, TeacherSummary>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let teachers = Teachers::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("批量查询教师失败: {e}")))?;

    let subject_index = teacher_subject_index(conn, ids).await?;
    let subject_ids: BTreeSet<i64> = subject_index.values().flatten().copied().collect();
    let subject_map = load_subject_map(conn, &subject_ids).await?;

    Ok(teachers
        .into_iter()
        .map(|m| {
            let subjects = collect_subjects(&linked(&subject_index, m.id), &subject_map);
            (
                m.id,
                TeacherSummary {
                    id: m.id,
                    name: m.name,
                    subjects,
                    created_on: crate::entity::timestamp_to_datetime(m.created_at),
                },
            )
        })
        .collect())
}

/// 组装教师详情
async fn load_teacher_details<C: ConnectionTrait>(
    conn: &C,
    teachers: Vec<Model>,
) -> Result<Vec<TeacherResponse>> {
    let teacher_ids: BTreeSet<i64> = teachers.iter().map(|m| m.id).collect();
    let teacher_subjects = teacher_subject_index(conn, &teacher_ids).await?;

    let subject_ids: BTreeSet<i64> = teacher_subjects.values().flatten().copied().collect();
    let subject_map = load_subject_map(conn, &subject_ids).await?;

    let subject_students = subject_student_index(conn, &subject_ids).await?;
    let student_ids: BTreeSet<i64> = subject_students.values().flatten().copied().collect();
    let student_map = load_student_summaries(conn, &student_ids).await?;

    Ok(teachers
        .into_iter()
        .map(|m| {
            let own_subjects = linked(&teacher_subjects, m.id);
            let students = derive_via_subjects(&own_subjects, &subject_students)
                .iter()
                .filter_map(|id| student_map.get(id).cloned())
                .collect();

            let teacher = m.into_teacher();
            TeacherResponse {
                id: teacher.id,
                name: teacher.name,
                subjects: collect_subjects(&own_subjects, &subject_map),
                students,
                created_on: teacher.created_on,
            }
        })
        .collect())
}

/// 按计划增删教师的科目关联
async fn apply_teacher_links<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    subjects: &[SubjectRequest],
    replace: bool,
) -> Result<()> {
    let names: Vec<String> = subjects.iter().map(|s| s.name.clone()).collect();
    let desired = resolve_subject_ids_on(conn, &names).await?;
    let existing = linked(
        &teacher_subject_index(conn, &BTreeSet::from([teacher_id])).await?,
        teacher_id,
    );

    let diff = LinkDiff::compute(&existing, &desired, replace);
    if diff.is_empty() {
        return Ok(());
    }

    if !diff.to_delete.is_empty() {
        TeacherSubjects::delete_many()
            .filter(
                Condition::all()
                    .add(TeacherSubjectColumn::TeacherId.eq(teacher_id))
                    .add(TeacherSubjectColumn::SubjectId.is_in(diff.to_delete.clone())),
            )
            .exec(conn)
            .await
            .map_err(|e| {
                SchoolApiError::database_operation(format!("删除教师科目关联失败: {e}"))
            })?;
    }

    for subject_id in diff.to_insert {
        let link = TeacherSubjectActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
        };
        TeacherSubjects::insert(link)
            .exec_without_returning(conn)
            .await
            .map_err(|e| {
                SchoolApiError::database_operation(format!("创建教师科目关联失败: {e}"))
            })?;
    }

    Ok(())
}

impl SeaOrmStorage {
    /// 创建教师，同名教师已存在时复用并合并科目
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<TeacherResponse> {
        let txn = self.begin_write().await?;

        let existing = Teachers::find()
            .filter(Column::Name.eq(req.name.as_str()))
            .order_by_asc(Column::Id)
            .one(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询教师失败: {e}")))?;

        let teacher = match existing {
            Some(teacher) => teacher,
            None => ActiveModel {
                name: Set(req.name.clone()),
                created_at: Set(chrono::Utc::now().timestamp()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("创建教师失败: {e}")))?,
        };

        apply_teacher_links(&txn, teacher.id, &req.subjects, false).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        load_teacher_details(&self.db, vec![teacher])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SchoolApiError::database_operation("教师写入后未找到"))
    }

    /// 通过 ID 获取教师详情
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<TeacherResponse>> {
        let teacher = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询教师失败: {e}")))?;

        match teacher {
            Some(teacher) => Ok(load_teacher_details(&self.db, vec![teacher])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 列出全部教师详情
    pub async fn list_teachers_impl(&self) -> Result<Vec<TeacherResponse>> {
        let teachers = Teachers::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询教师列表失败: {e}")))?;

        load_teacher_details(&self.db, teachers).await
    }

    /// 更新教师
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<TeacherResponse>> {
        let txn = self.begin_write().await?;

        let existing = Teachers::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询教师失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let teacher = match update.name {
            Some(name) if name != existing.name => {
                let mut model: ActiveModel = existing.into();
                model.name = Set(name);
                model
                    .update(&txn)
                    .await
                    .map_err(|e| SchoolApiError::database_operation(format!("更新教师失败: {e}")))?
            }
            _ => existing,
        };

        if let Some(subjects) = update.subjects.filter(|s| !s.is_empty()) {
            apply_teacher_links(&txn, teacher.id, &subjects, true).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(load_teacher_details(&self.db, vec![teacher])
            .await?
            .into_iter()
            .next())
    }

    /// 删除教师
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self.begin_write().await?;

        TeacherSubjects::delete_many()
            .filter(TeacherSubjectColumn::TeacherId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除教师科目关联失败: {e}")))?;

        let result = Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除教师失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;

    fn subjects(names: &[&str]) -> Vec<SubjectRequest> {
        names
            .iter()
            .map(|n| SubjectRequest {
                name: n.to_string(),
            })
            .collect()
    }

    fn teacher(name: &str, names: &[&str]) -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: name.to_string(),
            subjects: subjects(names),
        }
    }

    #[tokio::test]
    async fn test_create_teacher_is_get_or_create_by_name() {
        let storage = memory_storage().await;

        let first = storage
            .create_teacher_impl(teacher("A", &["Math"]))
            .await
            .unwrap();
        let second = storage
            .create_teacher_impl(teacher("A", &["Physics"]))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let names: Vec<&str> = second.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Math", "Physics"]);
        assert_eq!(storage.list_teachers_impl().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_students_derived_via_subjects() {
        let storage = memory_storage().await;

        let t = storage
            .create_teacher_impl(teacher("T", &["Math", "Physics"]))
            .await
            .unwrap();
        assert!(t.students.is_empty());

        for (name, subject) in [("S1", "Math"), ("S2", "Physics"), ("S3", "History")] {
            storage
                .create_student_impl(CreateStudentRequest {
                    name: name.to_string(),
                    roll: 1,
                    subjects: subjects(&[subject]),
                })
                .await
                .unwrap();
        }
        // 同时选两门科目的学生只出现一次
        storage
            .create_student_impl(CreateStudentRequest {
                name: "S4".to_string(),
                roll: 1,
                subjects: subjects(&["Math", "Physics"]),
            })
            .await
            .unwrap();

        let fetched = storage.get_teacher_by_id_impl(t.id).await.unwrap().unwrap();
        let names: Vec<&str> = fetched.students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S1", "S2", "S4"]);
    }

    #[tokio::test]
    async fn test_update_teacher() {
        let storage = memory_storage().await;
        let created = storage
            .create_teacher_impl(teacher("A", &["Math"]))
            .await
            .unwrap();

        let renamed = storage
            .update_teacher_impl(
                created.id,
                UpdateTeacherRequest {
                    name: Some("B".to_string()),
                    subjects: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "B");
        assert_eq!(renamed.subjects.len(), 1);

        let replaced = storage
            .update_teacher_impl(
                created.id,
                UpdateTeacherRequest {
                    name: None,
                    subjects: Some(subjects(&["Science"])),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.name, "B");
        assert_eq!(replaced.subjects[0].name, "Science");
        assert_eq!(replaced.subjects.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_teacher() {
        let storage = memory_storage().await;
        let created = storage
            .create_teacher_impl(teacher("A", &["Math"]))
            .await
            .unwrap();

        assert!(storage.delete_teacher_impl(created.id).await.unwrap());
        assert!(storage.get_teacher_by_id_impl(created.id).await.unwrap().is_none());
        assert!(!storage.delete_teacher_impl(created.id).await.unwrap());
    }

    // 关联替换中途失败时整体回滚
    #[tokio::test]
    async fn test_failed_link_replace_rolls_back() {
        let storage = memory_storage().await;
        let created = storage
            .create_teacher_impl(teacher("A", &["Math"]))
            .await
            .unwrap();
        storage.get_or_create_subject_impl("Science").await.unwrap();

        storage
            .db
            .execute_unprepared(
                "CREATE TRIGGER reject_science BEFORE INSERT ON teacher_subjects \
                 WHEN NEW.subject_id = (SELECT id FROM subjects WHERE name = 'Science') \
                 BEGIN SELECT RAISE(ABORT, 'science rejected'); END;",
            )
            .await
            .unwrap();

        let result = storage
            .update_teacher_impl(
                created.id,
                UpdateTeacherRequest {
                    name: Some("B".to_string()),
                    subjects: Some(subjects(&["Science"])),
                },
            )
            .await;
        assert!(result.is_err());

        let fetched = storage
            .get_teacher_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "A");
        let names: Vec<&str> = fetched.subjects.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Math"]);
    }
}
