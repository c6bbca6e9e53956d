// ==========================================
// 碳足迹审计系统 - 核心库
// ==========================================
// 流程: 生产数据文件 → 清洗 → 按工厂审计 → 汇总 → 导出
// 系统定位: 批处理审计工具（同步、单线程、任务间隔离）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 行业审计配置
pub mod config;

// 导入层 - 文件解析与清洗
pub mod importer;

// 引擎层 - 排放计算与汇总
pub mod engine;

// 导出层 - CSV / JSON 产物
pub mod exporter;

// API 层 - 审计任务
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AuditStatus, ComplianceStatus, EnergySource, Sector};

// 领域实体
pub use domain::{
    CanonicalRecord, CleaningReport, EmissionBreakdown, EmissionFactors, LedgerEntry,
    MonthlyResult, RawRow, SectorConfig,
};

// 配置
pub use config::AuditConfig;

// 导入
pub use importer::RecordCleaner;

// 引擎
pub use engine::{AuditOrchestrator, EmissionAuditor, FactoryLedger, SummaryReporter};

// API
pub use api::{AuditApi, AuditJobResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "碳足迹审计系统";
