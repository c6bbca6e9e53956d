// ==========================================
// 碳足迹审计系统 - 记录清洗 Trait
// ==========================================
// 职责: 定义清洗管道各阶段接口（不包含实现）
// 管道: 解析 → 表头标准化/结构校验 → 字段映射 → 清洗 → 去重 → 排序
// ==========================================

use crate::domain::record::{CanonicalRecord, RawProductionRecord, RawRow};
use crate::domain::types::{EnergySource, Sector};
use crate::importer::error::{ImportError, ImportResult};
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（字段全空的行保留,由清洗阶段计数）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 表头标准化 + 结构校验 + 字段映射（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 标准化列名（去空白 → 小写 → 空格转下划线）
    fn normalize_header(&self, header: &str) -> String;

    /// 标准化整行的列名
    ///
    /// # 返回
    /// - Err(ImportError::Schema): 两列标准化后同名（如 "Month" 与 "month "）
    fn normalize_row(&self, row: RawRow) -> ImportResult<RawRow> {
        let mut normalized = RawRow::with_capacity(row.len());
        for (key, value) in row {
            let header = self.normalize_header(&key);
            if normalized.contains_key(&header) {
                return Err(ImportError::duplicate_column(&header));
            }
            normalized.insert(header, value);
        }
        Ok(normalized)
    }

    /// 校验数据结构
    ///
    /// # 返回
    /// - Ok(()): 非空且包含全部必填列
    /// - Err(ImportError::Schema): 空输入或缺列
    fn validate_schema(&self, rows: &[RawRow]) -> ImportResult<()>;

    /// 将（已标准化列名的）原始行映射为中间结构体
    ///
    /// # 说明
    /// - 数值无法转换时对应字段为 None,不报错
    fn map_to_raw_record(&self, row: &RawRow, row_number: usize) -> RawProductionRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 行业名标准化（title-case）并判定合法性
    ///
    /// # 返回
    /// - Some(Sector): 合法行业
    /// - None: 非法行业（整行丢弃）
    fn normalize_sector(&self, value: &str) -> Option<Sector>;

    /// 能源类型标准化（同义词映射,未知类型回退为 grid）
    fn normalize_energy_source(&self, value: &str) -> EnergySource;

    /// 月份截断取整并钳制到 [1, 12]
    fn clamp_month(&self, value: f64) -> u32;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 重复记录检测（阶段 3）
// 实现者: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// 检测 (factory_id, month) 重复
    ///
    /// # 返回
    /// - Vec<usize>: 被后续同键记录覆盖的下标（保留最后一次出现）
    fn detect_duplicates(&self, records: &[CanonicalRecord]) -> Vec<usize>;

    /// 去重（保留最后一次出现,其余记录相对顺序不变）
    ///
    /// # 返回
    /// (去重后记录, 删除条数)
    fn dedup_keep_last(&self, records: Vec<CanonicalRecord>) -> (Vec<CanonicalRecord>, usize) {
        let superseded = self.detect_duplicates(&records);
        if superseded.is_empty() {
            return (records, 0);
        }

        let removed = superseded.len();
        let mut drop_iter = superseded.into_iter().peekable();
        let kept = records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                if drop_iter.peek() == Some(&idx) {
                    drop_iter.next();
                    None
                } else {
                    Some(record)
                }
            })
            .collect();

        (kept, removed)
    }
}
