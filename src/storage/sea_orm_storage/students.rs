//! 学生存储操作

use super::SeaOrmStorage;
use super::relations::{LinkDiff, LinkIndex, derive_via_subjects, group_links, linked};
use super::subjects::{collect_subjects, load_subject_map, resolve_subject_ids_on};
use super::teachers::{load_teacher_summaries, subject_teacher_index};
use crate::entity::student_subjects::{
    ActiveModel as StudentSubjectActiveModel, Column as StudentSubjectColumn,
    Entity as StudentSubjects,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::errors::{Result, SchoolApiError};
use crate::models::students::{
    requests::{CreateStudentRequest, UpdateStudentRequest},
    responses::{StudentResponse, StudentSummary},
};
use crate::models::subjects::requests::SubjectRequest;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::{BTreeSet, HashMap};

/// 学生 -> 科目 索引
pub(super) async fn student_subject_index<C: ConnectionTrait>(
    conn: &C,
    student_ids: &BTreeSet<i64>,
) -> Result<LinkIndex> {
    if student_ids.is_empty() {
        return Ok(LinkIndex::new());
    }

    let links = StudentSubjects::find()
        .filter(StudentSubjectColumn::StudentId.is_in(student_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("查询学生科目关联失败: {e}")))?;

    Ok(group_links(
        links.into_iter().map(|l| (l.student_id, l.subject_id)),
    ))
}

/// 科目 -> 学生 索引
pub(super) async fn subject_student_index<C: ConnectionTrait>(
    conn: &C,
    subject_ids: &BTreeSet<i64>,
) -> Result<LinkIndex> {
    if subject_ids.is_empty() {
        return Ok(LinkIndex::new());
    }

    let links = StudentSubjects::find()
        .filter(StudentSubjectColumn::SubjectId.is_in(subject_ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("查询科目学生关联失败: {e}")))?;

    Ok(group_links(
        links.into_iter().map(|l| (l.subject_id, l.student_id)),
    ))
}

/// 批量读取学生摘要（含科目，不含教师）
pub(super) async fn load_student_summaries<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i64>,
) -> Result<HashMap<i64, StudentSummary>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let students = Students::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
        .map_err(|e| SchoolApiError::database_operation(format!("批量查询学生失败: {e}")))?;

    let subject_index = student_subject_index(conn, ids).await?;
    let subject_ids: BTreeSet<i64> = subject_index.values().flatten().copied().collect();
    let subject_map = load_subject_map(conn, &subject_ids).await?;

    Ok(students
        .into_iter()
        .map(|m| {
            let subjects = collect_subjects(&linked(&subject_index, m.id), &subject_map);
            (
                m.id,
                StudentSummary {
                    id: m.id,
                    name: m.name,
                    roll: m.roll,
                    subjects,
                    created_on: crate::entity::timestamp_to_datetime(m.created_at),
                },
            )
        })
        .collect())
}

/// 组装学生详情
///
/// 查询次数与学生数量无关：关联、科目、教师及教师科目各一次批量查询。
async fn load_student_details<C: ConnectionTrait>(
    conn: &C,
    students: Vec<Model>,
) -> Result<Vec<StudentResponse>> {
    let student_ids: BTreeSet<i64> = students.iter().map(|m| m.id).collect();
    let student_subjects = student_subject_index(conn, &student_ids).await?;

    let subject_ids: BTreeSet<i64> = student_subjects.values().flatten().copied().collect();
    let subject_map = load_subject_map(conn, &subject_ids).await?;

    let subject_teachers = subject_teacher_index(conn, &subject_ids).await?;
    let teacher_ids: BTreeSet<i64> = subject_teachers.values().flatten().copied().collect();
    let teacher_map = load_teacher_summaries(conn, &teacher_ids).await?;

    Ok(students
        .into_iter()
        .map(|m| {
            let own_subjects = linked(&student_subjects, m.id);
            let teachers = derive_via_subjects(&own_subjects, &subject_teachers)
                .iter()
                .filter_map(|id| teacher_map.get(id).cloned())
                .collect();

            let student = m.into_student();
            StudentResponse {
                id: student.id,
                name: student.name,
                roll: student.roll,
                subjects: collect_subjects(&own_subjects, &subject_map),
                teachers,
                created_on: student.created_on,
            }
        })
        .collect())
}

/// 按计划增删学生的科目关联
async fn apply_student_links<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    subjects: &[SubjectRequest],
    replace: bool,
) -> Result<()> {
    let names: Vec<String> = subjects.iter().map(|s| s.name.clone()).collect();
    let desired = resolve_subject_ids_on(conn, &names).await?;
    let existing = linked(
        &student_subject_index(conn, &BTreeSet::from([student_id])).await?,
        student_id,
    );

    let diff = LinkDiff::compute(&existing, &desired, replace);
    if diff.is_empty() {
        return Ok(());
    }

    if !diff.to_delete.is_empty() {
        StudentSubjects::delete_many()
            .filter(
                Condition::all()
                    .add(StudentSubjectColumn::StudentId.eq(student_id))
                    .add(StudentSubjectColumn::SubjectId.is_in(diff.to_delete.clone())),
            )
            .exec(conn)
            .await
            .map_err(|e| {
                SchoolApiError::database_operation(format!("删除学生科目关联失败: {e}"))
            })?;
    }

    for subject_id in diff.to_insert {
        let link = StudentSubjectActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
        };
        StudentSubjects::insert(link)
            .exec_without_returning(conn)
            .await
            .map_err(|e| {
                SchoolApiError::database_operation(format!("创建学生科目关联失败: {e}"))
            })?;
    }

    Ok(())
}

impl SeaOrmStorage {
    /// 创建学生
    ///
    /// 同名同学号的学生已存在时复用该记录，请求中的科目合并到已有关联上。
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<StudentResponse> {
        let txn = self.begin_write().await?;

        let existing = Students::find()
            .filter(
                Condition::all()
                    .add(Column::Name.eq(req.name.as_str()))
                    .add(Column::Roll.eq(req.roll)),
            )
            .order_by_asc(Column::Id)
            .one(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询学生失败: {e}")))?;

        let student = match existing {
            Some(student) => student,
            None => ActiveModel {
                name: Set(req.name.clone()),
                roll: Set(req.roll),
                created_at: Set(chrono::Utc::now().timestamp()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("创建学生失败: {e}")))?,
        };

        apply_student_links(&txn, student.id, &req.subjects, false).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        load_student_details(&self.db, vec![student])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SchoolApiError::database_operation("学生写入后未找到"))
    }

    /// 通过 ID 获取学生详情
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<StudentResponse>> {
        let student = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询学生失败: {e}")))?;

        match student {
            Some(student) => Ok(load_student_details(&self.db, vec![student])
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// 列出全部学生详情
    pub async fn list_students_impl(&self) -> Result<Vec<StudentResponse>> {
        let students = Students::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询学生列表失败: {e}")))?;

        load_student_details(&self.db, students).await
    }

    /// 更新学生
    ///
    /// 缺省字段保持原值；科目列表非空时整体替换关联，空列表不改动关联。
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentResponse>> {
        let txn = self.begin_write().await?;

        let existing = Students::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("查询学生失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.clone().into();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(roll) = update.roll {
            model.roll = Set(roll);
        }

        let student = if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| SchoolApiError::database_operation(format!("更新学生失败: {e}")))?
        } else {
            existing
        };

        if let Some(subjects) = update.subjects.filter(|s| !s.is_empty()) {
            apply_student_links(&txn, student.id, &subjects, true).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(load_student_details(&self.db, vec![student])
            .await?
            .into_iter()
            .next())
    }

    /// 删除学生，科目和教师不受影响
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.begin_write().await?;

        StudentSubjects::delete_many()
            .filter(StudentSubjectColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除学生科目关联失败: {e}")))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolApiError::database_operation(format!("删除学生失败: {e}")))?;

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
    use crate::models::teachers::requests::CreateTeacherRequest;

    fn subjects(names: &[&str]) -> Vec<SubjectRequest> {
        names
            .iter()
            .map(|n| SubjectRequest {
                name: n.to_string(),
            })
            .collect()
    }

    fn student(name: &str, roll: i32, names: &[&str]) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            roll,
            subjects: subjects(names),
        }
    }

    fn teacher(name: &str, names: &[&str]) -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: name.to_string(),
            subjects: subjects(names),
        }
    }

    fn subject_names(resp: &StudentResponse) -> Vec<&str> {
        resp.subjects.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_student_without_teachers() {
        let storage = memory_storage().await;

        let created = storage
            .create_student_impl(student("X", 5, &["Math"]))
            .await
            .unwrap();
        assert_eq!(created.roll, 5);
        assert_eq!(subject_names(&created), vec!["Math"]);
        assert!(created.teachers.is_empty());

        let fetched = storage
            .get_student_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.roll, 5);
        assert!(fetched.teachers.is_empty());
    }

    #[tokio::test]
    async fn test_create_student_reuses_subjects() {
        let storage = memory_storage().await;
        let math = storage.get_or_create_subject_impl("Math").await.unwrap();

        let created = storage
            .create_student_impl(student("X", 1, &["Math", "Math"]))
            .await
            .unwrap();
        assert_eq!(created.subjects.len(), 1);
        assert_eq!(created.subjects[0].id, math.id);
        assert_eq!(storage.list_subjects_impl().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_same_student_merges_subjects() {
        let storage = memory_storage().await;

        let first = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();
        let second = storage
            .create_student_impl(student("X", 1, &["Physics"]))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(subject_names(&second), vec!["Math", "Physics"]);
        assert_eq!(storage.list_students_impl().await.unwrap().len(), 1);

        // 学号不同视为另一名学生
        let other = storage
            .create_student_impl(student("X", 2, &[]))
            .await
            .unwrap();
        assert_ne!(other.id, first.id);
    }

    #[tokio::test]
    async fn test_teachers_derived_and_deduplicated() {
        let storage = memory_storage().await;

        let a = storage
            .create_teacher_impl(teacher("A", &["Math"]))
            .await
            .unwrap();
        let b = storage
            .create_teacher_impl(teacher("B", &["Physics"]))
            .await
            .unwrap();
        let c = storage
            .create_teacher_impl(teacher("C", &["Math", "Physics"]))
            .await
            .unwrap();
        storage
            .create_teacher_impl(teacher("D", &["History"]))
            .await
            .unwrap();

        let s = storage
            .create_student_impl(student("S", 1, &["Math", "Physics"]))
            .await
            .unwrap();

        let ids: Vec<i64> = s.teachers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id, c.id]);

        let c_summary = &s.teachers[2];
        assert_eq!(c_summary.name, "C");
        assert_eq!(c_summary.subjects.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_subjects() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();

        let updated = storage
            .update_student_impl(
                created.id,
                UpdateStudentRequest {
                    subjects: Some(subjects(&["Science"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(subject_names(&updated), vec!["Science"]);
        assert_eq!(updated.name, "X");
        assert_eq!(updated.roll, 1);
    }

    #[tokio::test]
    async fn test_update_with_empty_subjects_keeps_links() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();

        let updated = storage
            .update_student_impl(
                created.id,
                UpdateStudentRequest {
                    name: Some("Y".to_string()),
                    roll: Some(9),
                    subjects: Some(Vec::new()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Y");
        assert_eq!(updated.roll, 9);
        assert_eq!(subject_names(&updated), vec!["Math"]);

        assert!(
            storage
                .update_student_impl(999, UpdateStudentRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_subject_keeps_student() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();

        let math_id = created.subjects[0].id;
        assert!(storage.delete_subject_impl(math_id).await.unwrap());

        let fetched = storage
            .get_student_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "X");
        assert!(fetched.subjects.is_empty());
    }

    #[tokio::test]
    async fn test_delete_student() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();

        assert!(storage.delete_student_impl(created.id).await.unwrap());
        assert!(!storage.delete_student_impl(created.id).await.unwrap());
        assert!(
            storage
                .get_student_by_id_impl(created.id)
                .await
                .unwrap()
                .is_none()
        );
        // 科目保留
        assert_eq!(storage.list_subjects_impl().await.unwrap().len(), 1);
    }

    // 关联替换中途失败时整体回滚
    #[tokio::test]
    async fn test_failed_link_replace_rolls_back() {
        let storage = memory_storage().await;
        let created = storage
            .create_student_impl(student("X", 1, &["Math"]))
            .await
            .unwrap();
        storage.get_or_create_subject_impl("Science").await.unwrap();

        storage
            .db
            .execute_unprepared(
                "CREATE TRIGGER reject_science BEFORE INSERT ON student_subjects \
                 WHEN NEW.subject_id = (SELECT id FROM subjects WHERE name = 'Science') \
                 BEGIN SELECT RAISE(ABORT, 'science rejected'); END;",
            )
            .await
            .unwrap();

        // 先改字段、删除 Math 关联，插入 Science 时失败
        let result = storage
            .update_student_impl(
                created.id,
                UpdateStudentRequest {
                    name: Some("Y".to_string()),
                    roll: Some(9),
                    subjects: Some(subjects(&["Science"])),
                },
            )
            .await;
        assert!(result.is_err());

        let fetched = storage
            .get_student_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "X");
        assert_eq!(fetched.roll, 1);
        assert_eq!(subject_names(&fetched), vec!["Math"]);
    }
}
