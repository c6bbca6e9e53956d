// ==========================================
// 碳足迹审计系统 - 记录清洗器
// ==========================================
// 职责: 整合清洗流程,从原始行到规范记录 + 清洗报告
// 流程: 表头标准化 → 结构校验 → 字段映射 → TRIM → 行业校验
//       → 能源类型映射 → 数值转换 → 月份钳制 → 负值剔除 → 去重 → 排序
// 红线: 步骤顺序不可调整（后一步作用于前一步的结果）
// ==========================================

use crate::domain::record::{CanonicalRecord, CleaningReport, RawProductionRecord, RawRow};
use crate::domain::types::{EnergySource, Sector};
use crate::importer::conflict_handler::ConflictHandler as ConflictHandlerImpl;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_cleaner_trait::{ConflictHandler, DataCleaner, FieldMapper};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, instrument};

// ==========================================
// RecordCleaner - 记录清洗器
// ==========================================
pub struct RecordCleaner {
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    conflict_handler: Box<dyn ConflictHandler>,
}

impl Default for RecordCleaner {
    fn default() -> Self {
        Self::new(
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(ConflictHandlerImpl),
        )
    }
}

impl RecordCleaner {
    /// 创建新的 RecordCleaner 实例
    ///
    /// # 参数
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 数据清洗器
    /// - conflict_handler: 冲突处理器
    pub fn new(
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        conflict_handler: Box<dyn ConflictHandler>,
    ) -> Self {
        Self {
            field_mapper,
            data_cleaner,
            conflict_handler,
        }
    }

    /// 解析文件并清洗
    pub fn clean_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<(Vec<CanonicalRecord>, CleaningReport)> {
        let raw_rows = UniversalFileParser.parse(file_path.as_ref())?;
        info!(
            file_path = %file_path.as_ref().display(),
            total_rows = raw_rows.len(),
            "文件解析完成"
        );
        self.clean(raw_rows)
    }

    /// 清洗原始行
    ///
    /// # 参数
    /// - raw_rows: 原始行记录（列名未标准化）
    ///
    /// # 返回
    /// - Ok((规范记录, 清洗报告)): 记录按 (factory_id, month) 升序
    /// - Err(ImportError::Schema): 空输入、列名冲突或缺少必填列
    #[instrument(skip(self, raw_rows), fields(original_rows = raw_rows.len()))]
    pub fn clean(&self, raw_rows: Vec<RawRow>) -> ImportResult<(Vec<CanonicalRecord>, CleaningReport)> {
        // === 步骤 0: 表头标准化 + 结构校验 ===
        let rows: Vec<RawRow> = raw_rows
            .into_iter()
            .map(|row| self.field_mapper.normalize_row(row))
            .collect::<ImportResult<_>>()?;
        self.field_mapper.validate_schema(&rows)?;

        let original_rows = rows.len();
        let mut actions = Vec::new();

        // === 步骤 1: 字段映射 + TRIM ===
        debug!("步骤 1: 字段映射与文本清洗");
        let mapped: Vec<RawProductionRecord> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let mut record = self.field_mapper.map_to_raw_record(row, idx + 1);
                record.factory_id = self.data_cleaner.clean_text(&record.factory_id);
                record.sector = self.data_cleaner.clean_text(&record.sector);
                record.energy_source_type = self.data_cleaner.clean_text(&record.energy_source_type);
                record
            })
            .collect();

        // === 步骤 2: 行业标准化与校验 ===
        debug!("步骤 2: 行业校验");
        let before = mapped.len();
        let with_sector: Vec<(RawProductionRecord, Sector)> = mapped
            .into_iter()
            .filter_map(|record| {
                let sector = self.data_cleaner.normalize_sector(&record.sector);
                if sector.is_none() {
                    debug!(row = record.row_number, sector = %record.sector, "非法行业,丢弃");
                }
                sector.map(|s| (record, s))
            })
            .collect();
        let dropped = before - with_sector.len();
        if dropped > 0 {
            actions.push(format!("Dropped {} rows with invalid sectors", dropped));
        }

        // === 步骤 3: 能源类型映射（未知 → grid） ===
        debug!("步骤 3: 能源类型映射");
        let with_source: Vec<(RawProductionRecord, Sector, EnergySource)> = with_sector
            .into_iter()
            .map(|(record, sector)| {
                let source = self
                    .data_cleaner
                    .normalize_energy_source(&record.energy_source_type);
                (record, sector, source)
            })
            .collect();

        // === 步骤 4-5: 数值转换 + 月份钳制 ===
        debug!("步骤 4: 数值转换");
        let before = with_source.len();
        let coerced: Vec<CanonicalRecord> = with_source
            .into_iter()
            .filter_map(|(record, sector, source)| self.to_canonical(record, sector, source))
            .collect();
        let dropped = before - coerced.len();
        if dropped > 0 {
            actions.push(format!(
                "Dropped {} rows with non-numeric critical values",
                dropped
            ));
        }

        // === 步骤 6: 负值剔除 ===
        debug!("步骤 6: 负值剔除");
        let before = coerced.len();
        let non_negative: Vec<CanonicalRecord> = coerced
            .into_iter()
            .filter(|r| r.monthly_production_tons >= 0.0 && r.energy_used_mwh >= 0.0)
            .collect();
        let dropped = before - non_negative.len();
        if dropped > 0 {
            actions.push(format!(
                "Dropped {} rows with negative production/energy",
                dropped
            ));
        }

        // === 步骤 7: 去重（保留最后一次出现） ===
        debug!("步骤 7: 去重");
        let (mut records, dropped) = self.conflict_handler.dedup_keep_last(non_negative);
        if dropped > 0 {
            actions.push(format!(
                "Removed {} duplicate (factory_id, month) rows",
                dropped
            ));
        }

        // === 步骤 8: 排序 ===
        records.sort_by(|a, b| {
            a.factory_id
                .cmp(&b.factory_id)
                .then_with(|| a.month.cmp(&b.month))
        });

        let report = self.build_report(original_rows, &records, actions);
        info!(
            original_rows = report.original_rows,
            cleaned_rows = report.cleaned_rows,
            rows_removed = report.rows_removed,
            factories_found = report.factories_found,
            "数据清洗完成"
        );

        Ok((records, report))
    }

    /// 数值转换 + 月份钳制
    ///
    /// # 返回
    /// - None: month / 产量 / 能耗 任一无法转换
    fn to_canonical(
        &self,
        record: RawProductionRecord,
        sector: Sector,
        source: EnergySource,
    ) -> Option<CanonicalRecord> {
        let (month, production, energy) = match (
            record.month,
            record.monthly_production_tons,
            record.energy_used_mwh,
        ) {
            (Some(m), Some(p), Some(e)) => (m, p, e),
            _ => {
                debug!(row = record.row_number, "关键数值字段无法转换,丢弃");
                return None;
            }
        };

        // 原料重量: 无法转换或为负时按 0 处理
        let material = record
            .raw_material_weight_tons
            .filter(|w| *w >= 0.0)
            .unwrap_or(0.0);

        Some(CanonicalRecord {
            factory_id: record.factory_id,
            sector,
            month: self.data_cleaner.clamp_month(month),
            monthly_production_tons: production,
            energy_used_mwh: energy,
            energy_source_type: source,
            raw_material_weight_tons: material,
        })
    }

    fn build_report(
        &self,
        original_rows: usize,
        records: &[CanonicalRecord],
        mut actions: Vec<String>,
    ) -> CleaningReport {
        let factories: BTreeSet<&str> = records.iter().map(|r| r.factory_id.as_str()).collect();
        let sectors: BTreeSet<Sector> = records.iter().map(|r| r.sector).collect();

        if actions.is_empty() {
            actions.push(CleaningReport::NO_ISSUES.to_string());
        }

        CleaningReport {
            original_rows,
            cleaned_rows: records.len(),
            rows_removed: original_rows - records.len(),
            factories_found: factories.len(),
            sectors_found: sectors.into_iter().collect(),
            actions,
        }
    }
}
