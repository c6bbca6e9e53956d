// ==========================================
// 碳足迹审计系统 - 冲突处理器实现
// ==========================================
// 职责: 检测同一数据集内 (factory_id, month) 重复
// 策略: 保留最后一次出现（按原始文件顺序）
// ==========================================

use crate::domain::record::CanonicalRecord;
use crate::importer::record_cleaner_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashMap;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    /// 检测重复记录
    ///
    /// # 返回
    /// - Vec<usize>: 被覆盖记录的下标（升序,不含每个键的最后一次出现）
    fn detect_duplicates(&self, records: &[CanonicalRecord]) -> Vec<usize> {
        let mut last_occurrence: HashMap<(&str, u32), usize> = HashMap::new();
        let mut superseded = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let key = (record.factory_id.as_str(), record.month);
            if let Some(previous) = last_occurrence.insert(key, idx) {
                // 先前出现的记录被当前记录覆盖
                superseded.push(previous);
            }
        }

        superseded.sort_unstable();
        superseded
    }
}
