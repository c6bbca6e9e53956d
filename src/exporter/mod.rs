// ==========================================
// 碳足迹审计系统 - 导出层
// ==========================================
// 职责: 规范记录 / 汇总 / 时间序列 / 审计结果 落盘
// 格式: CSV（csv crate）, JSON（serde_json）
// ==========================================

pub mod audit_exporter;
pub mod error;

pub use audit_exporter::{
    AuditExporter, CLEANED_COLUMNS, SUMMARY_COLUMNS, TIMESERIES_COLUMNS,
};
pub use error::{ExportError, ExportResult};
