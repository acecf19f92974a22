//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_subjects::Entity")]
    StudentSubjects,
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
}

impl Related<super::student_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentSubjects.def()
    }
}

impl Related<super::teacher_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjects.def()
    }
}

// 科目 <-> 学生（经由 student_subjects）
impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::student_subjects::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::student_subjects::Relation::Subject.def().rev())
    }
}

// 科目 <-> 教师（经由 teacher_subjects）
impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_subjects::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::teacher_subjects::Relation::Subject.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        use crate::models::subjects::entities::Subject;

        Subject {
            id: self.id,
            name: self.name,
            created_on: super::timestamp_to_datetime(self.created_at),
        }
    }
}
