// ==========================================
// 碳足迹审计系统 - 审计结果导出器
// ==========================================
// 职责: cleaned.csv / audit_summary.csv / emissions_timeseries.csv / audit_result.json
// 红线: 汇总与时间序列数值统一保留两位小数
// ==========================================

use crate::domain::record::{CanonicalRecord, REQUIRED_COLUMNS};
use crate::engine::ledger::FactoryLedger;
use crate::engine::summary::FactorySummaryRow;
use crate::exporter::error::ExportResult;
use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// cleaned.csv 列（与导入必填列一致,可直接重新导入）
pub const CLEANED_COLUMNS: [&str; 7] = REQUIRED_COLUMNS;

/// audit_summary.csv 列
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "factory_id",
    "sector",
    "total_emissions_kg",
    "max_monthly_emissions_kg",
    "avg_monthly_emissions_kg",
    "alerts_count",
    "status",
];

/// emissions_timeseries.csv 列
pub const TIMESERIES_COLUMNS: [&str; 4] = ["factory_id", "sector", "month", "total_emissions_kg"];

// ==========================================
// AuditExporter - 审计结果导出器
// ==========================================
pub struct AuditExporter;

impl AuditExporter {
    /// 写出规范记录
    pub fn write_cleaned_csv(&self, path: &Path, records: &[CanonicalRecord]) -> ExportResult<()> {
        let mut wtr = Writer::from_path(path)?;
        wtr.write_record(CLEANED_COLUMNS)?;

        for record in records {
            wtr.write_record([
                record.factory_id.clone(),
                record.sector.as_str().to_string(),
                record.month.to_string(),
                record.monthly_production_tons.to_string(),
                record.energy_used_mwh.to_string(),
                record.energy_source_type.as_str().to_string(),
                record.raw_material_weight_tons.to_string(),
            ])?;
        }

        wtr.flush()?;
        debug!(path = %path.display(), rows = records.len(), "cleaned.csv 已写出");
        Ok(())
    }

    /// 写出工厂年度汇总
    pub fn write_summary_csv(&self, path: &Path, rows: &[FactorySummaryRow]) -> ExportResult<()> {
        let mut wtr = Writer::from_path(path)?;
        wtr.write_record(SUMMARY_COLUMNS)?;

        for row in rows {
            wtr.write_record([
                row.factory_id.clone(),
                row.sector.as_str().to_string(),
                format!("{:.2}", row.total_emissions_kg),
                format!("{:.2}", row.max_monthly_emissions_kg),
                format!("{:.2}", row.avg_monthly_emissions_kg),
                row.alerts_count.to_string(),
                row.status.to_string(),
            ])?;
        }

        wtr.flush()?;
        debug!(path = %path.display(), rows = rows.len(), "audit_summary.csv 已写出");
        Ok(())
    }

    /// 写出累计排放时间序列（图表数据）
    pub fn write_timeseries_csv(
        &self,
        path: &Path,
        ledgers: &BTreeMap<String, FactoryLedger>,
    ) -> ExportResult<()> {
        let mut wtr = Writer::from_path(path)?;
        wtr.write_record(TIMESERIES_COLUMNS)?;

        let mut rows = 0usize;
        for ledger in ledgers.values() {
            for (month, total) in ledger.time_series() {
                wtr.write_record([
                    ledger.factory_id().to_string(),
                    ledger.sector().as_str().to_string(),
                    month.to_string(),
                    format!("{:.2}", total),
                ])?;
                rows += 1;
            }
        }

        wtr.flush()?;
        debug!(path = %path.display(), rows, "emissions_timeseries.csv 已写出");
        Ok(())
    }

    /// 写出 JSON 文档（缩进格式）
    pub fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> ExportResult<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, value)?;
        debug!(path = %path.display(), "JSON 已写出");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emission::EmissionFactors;
    use crate::domain::types::{ComplianceStatus, EnergySource, Sector};
    use tempfile::TempDir;

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_write_cleaned_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cleaned.csv");
        let records = vec![CanonicalRecord {
            factory_id: "FAC_A".to_string(),
            sector: Sector::Steel,
            month: 3,
            monthly_production_tons: 1000.0,
            energy_used_mwh: 40.5,
            energy_source_type: EnergySource::NaturalGas,
            raw_material_weight_tons: 0.0,
        }];

        AuditExporter.write_cleaned_csv(&path, &records).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], CLEANED_COLUMNS.join(","));
        assert_eq!(lines[1], "FAC_A,Steel,3,1000,40.5,natural_gas,0");
    }

    #[test]
    fn test_write_summary_csv_two_decimals() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("audit_summary.csv");
        let rows = vec![FactorySummaryRow {
            factory_id: "FAC_A".to_string(),
            sector: Sector::Textile,
            total_emissions_kg: 596_000.0,
            max_monthly_emissions_kg: 596_000.0,
            avg_monthly_emissions_kg: 1.005,
            alerts_count: 1,
            status: ComplianceStatus::Exceeded,
        }];

        AuditExporter.write_summary_csv(&path, &rows).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines[0], SUMMARY_COLUMNS.join(","));
        assert!(lines[1].starts_with("FAC_A,Textile,596000.00,596000.00,"));
        assert!(lines[1].ends_with(",1,EXCEEDED"));
    }

    #[test]
    fn test_write_timeseries_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emissions_timeseries.csv");
        let mut ledger = FactoryLedger::new(
            "FAC_E",
            Sector::Electronics,
            EmissionFactors::new(1.0, 0.0, 0.0),
            1e9,
            None,
        );
        ledger.record_month(2, 5.0, 0.0, None, None);
        ledger.record_month(1, 5.0, 0.0, None, None);
        let mut ledgers = BTreeMap::new();
        ledgers.insert("FAC_E".to_string(), ledger);

        AuditExporter.write_timeseries_csv(&path, &ledgers).unwrap();

        let lines = read_lines(&path);
        assert_eq!(
            lines,
            vec![
                "factory_id,sector,month,total_emissions_kg".to_string(),
                "FAC_E,Electronics,1,10.00".to_string(),
                "FAC_E,Electronics,2,5.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        AuditExporter
            .write_json(&path, &serde_json::json!({ "job_id": "abc" }))
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["job_id"], "abc");
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("x.csv");
        assert!(AuditExporter.write_cleaned_csv(&path, &[]).is_err());
    }
}
