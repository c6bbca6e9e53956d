// ==========================================
// 碳足迹审计系统 - 引擎层
// ==========================================
// 职责: 排放计算 / 工厂台账 / 审计编排 / 汇总报告
// 红线: 引擎不做 IO, 输入为规范记录 + 只读配置
// ==========================================

pub mod auditor;
pub mod ledger;
pub mod orchestrator;
pub mod summary;

// 重导出核心引擎
pub use auditor::EmissionAuditor;
pub use ledger::FactoryLedger;
pub use orchestrator::AuditOrchestrator;
pub use summary::{FactorySummaryRow, OverallSummary, SectorAggregate, SummaryReporter, Violator};
