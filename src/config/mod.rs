// ==========================================
// 碳足迹审计系统 - 配置层
// ==========================================
// 职责: 行业审计配置加载与校验
// 存储: config/sectors.json（另有内置默认配置）
// ==========================================

pub mod audit_config;
pub mod error;

// 重导出核心配置
pub use audit_config::{AuditConfig, DEFAULT_CARBON_CAP_KG, DEFAULT_CONFIG_PATH};
pub use error::{ConfigError, ConfigResult};
