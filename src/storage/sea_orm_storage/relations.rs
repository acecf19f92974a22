//! 多对多关联的通用计算
//!
//! 关联行一次性批量取出后在内存中分组，派生关系（学生的教师、教师的学生）
//! 通过共享科目求并集得到，去重依据主键。

use std::collections::{BTreeSet, HashMap};

/// 关联索引：实体 ID -> 关联实体 ID 集合（按 ID 有序）
pub(super) type LinkIndex = HashMap<i64, BTreeSet<i64>>;

/// 把 (左, 右) 关联对按左侧分组
pub(super) fn group_links<I>(pairs: I) -> LinkIndex
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let mut index = LinkIndex::new();
    for (left, right) in pairs {
        index.entry(left).or_default().insert(right);
    }
    index
}

/// 从索引中取出某个实体的关联集合，不存在时为空
pub(super) fn linked(index: &LinkIndex, id: i64) -> BTreeSet<i64> {
    index.get(&id).cloned().unwrap_or_default()
}

/// 经由共享科目派生关联实体
///
/// `subject_ids` 为本实体的科目，`subject_index` 为 科目 -> 对侧实体 的索引。
pub(super) fn derive_via_subjects(
    subject_ids: &BTreeSet<i64>,
    subject_index: &LinkIndex,
) -> BTreeSet<i64> {
    subject_ids
        .iter()
        .filter_map(|subject_id| subject_index.get(subject_id))
        .flatten()
        .copied()
        .collect()
}

/// 关联集合的变更计划
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct LinkDiff {
    pub to_insert: Vec<i64>,
    pub to_delete: Vec<i64>,
}

impl LinkDiff {
    /// 计算从 `existing` 到目标集合的变更
    ///
    /// `replace` 为 true 时结果集合恰好等于 `desired`；否则只追加缺失的关联。
    pub fn compute(existing: &BTreeSet<i64>, desired: &BTreeSet<i64>, replace: bool) -> Self {
        let to_insert = desired.difference(existing).copied().collect();
        let to_delete = if replace {
            existing.difference(desired).copied().collect()
        } else {
            Vec::new()
        };
        Self {
            to_insert,
            to_delete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_delete.is_empty()
    }
}
