// ==========================================
// 碳足迹审计系统 - 字段映射器实现
// ==========================================
// 职责: 表头标准化 + 结构校验 + 源字段 → 中间结构体 + 数值转换
// ==========================================

use crate::domain::record::{RawProductionRecord, RawRow, REQUIRED_COLUMNS};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_cleaner_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashSet;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn normalize_header(&self, header: &str) -> String {
        header.trim().to_lowercase().replace(' ', "_")
    }

    fn validate_schema(&self, rows: &[RawRow]) -> ImportResult<()> {
        if rows.is_empty() {
            return Err(ImportError::empty_input());
        }

        // 列集合取所有行的并集（短行缺少尾部列）
        let present: HashSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(|k| k.as_str()))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !present.contains(col))
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::missing_columns(&missing, &REQUIRED_COLUMNS));
        }

        Ok(())
    }

    fn map_to_raw_record(&self, row: &RawRow, row_number: usize) -> RawProductionRecord {
        RawProductionRecord {
            factory_id: self.get_string(row, "factory_id"),
            sector: self.get_string(row, "sector"),
            month: self.parse_f64(row, "month"),
            monthly_production_tons: self.parse_f64(row, "monthly_production_tons"),
            energy_used_mwh: self.parse_f64(row, "energy_used_mwh"),
            energy_source_type: self.get_string(row, "energy_source_type"),
            raw_material_weight_tons: self.parse_f64(row, "raw_material_weight_tons"),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（缺列视为空字符串）
    fn get_string(&self, row: &RawRow, key: &str) -> String {
        row.get(key).map(|v| v.to_string()).unwrap_or_default()
    }

    /// 解析浮点数
    ///
    /// # 返回
    /// - Some(f64): 有限数值
    /// - None: 空值 / 非数值 / NaN / 无穷大
    fn parse_f64(&self, row: &RawRow, key: &str) -> Option<f64> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> RawRow {
        let mut row = RawRow::new();
        row.insert("factory_id".to_string(), "FAC_STEEL_01".to_string());
        row.insert("sector".to_string(), "Steel".to_string());
        row.insert("month".to_string(), "3".to_string());
        row.insert("monthly_production_tons".to_string(), "1200.5".to_string());
        row.insert("energy_used_mwh".to_string(), "4100".to_string());
        row.insert("energy_source_type".to_string(), "coal".to_string());
        row.insert("raw_material_weight_tons".to_string(), "1500".to_string());
        row
    }

    #[test]
    fn test_normalize_header() {
        let mapper = FieldMapper;
        assert_eq!(mapper.normalize_header("  Factory ID "), "factory_id");
        assert_eq!(mapper.normalize_header("Energy Used MWh"), "energy_used_mwh");
        assert_eq!(mapper.normalize_header("month"), "month");
    }

    #[test]
    fn test_validate_schema_empty() {
        let mapper = FieldMapper;
        let err = mapper.validate_schema(&[]).unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_validate_schema_missing_column() {
        let mapper = FieldMapper;
        let mut row = full_row();
        row.remove("energy_used_mwh");

        let err = mapper.validate_schema(&[row]).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("energy_used_mwh"));
    }

    #[test]
    fn test_validate_schema_ok() {
        let mapper = FieldMapper;
        assert!(mapper.validate_schema(&[full_row()]).is_ok());
    }

    #[test]
    fn test_map_to_raw_record() {
        let mapper = FieldMapper;
        let record = mapper.map_to_raw_record(&full_row(), 7);

        assert_eq!(record.factory_id, "FAC_STEEL_01");
        assert_eq!(record.month, Some(3.0));
        assert_eq!(record.monthly_production_tons, Some(1200.5));
        assert_eq!(record.raw_material_weight_tons, Some(1500.0));
        assert_eq!(record.row_number, 7);
    }

    #[test]
    fn test_map_invalid_numbers_as_none() {
        let mapper = FieldMapper;
        let mut row = full_row();
        row.insert("month".to_string(), "March".to_string());
        row.insert("energy_used_mwh".to_string(), "".to_string());
        row.insert("raw_material_weight_tons".to_string(), "inf".to_string());

        let record = mapper.map_to_raw_record(&row, 1);

        assert_eq!(record.month, None);
        assert_eq!(record.energy_used_mwh, None);
        assert_eq!(record.raw_material_weight_tons, None);
    }

    #[test]
    fn test_normalize_row_keys() {
        let mapper = FieldMapper;
        let mut row = RawRow::new();
        row.insert(" Factory_ID".to_string(), "A".to_string());
        row.insert("Raw Material Weight Tons".to_string(), "1".to_string());

        let normalized = mapper.normalize_row(row).unwrap();
        assert_eq!(normalized.get("factory_id"), Some(&"A".to_string()));
        assert_eq!(normalized.get("raw_material_weight_tons"), Some(&"1".to_string()));
    }

    #[test]
    fn test_normalize_row_collision_is_schema_error() {
        let mapper = FieldMapper;
        let mut row = RawRow::new();
        row.insert("Month".to_string(), "1".to_string());
        row.insert("month ".to_string(), "2".to_string());

        let err = mapper.normalize_row(row).unwrap_err();
        assert!(err.is_schema_error());
    }
}
