// ==========================================
// 碳足迹审计系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod emission;
pub mod record;
pub mod types;

// 重导出核心类型
pub use emission::{EmissionBreakdown, EmissionFactors, LedgerEntry, MonthlyResult, SectorConfig};
pub use record::{CanonicalRecord, CleaningReport, RawProductionRecord, RawRow, REQUIRED_COLUMNS};
pub use types::{AuditStatus, ComplianceStatus, EnergySource, Sector};
