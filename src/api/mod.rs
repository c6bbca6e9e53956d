// ==========================================
// 碳足迹审计系统 - API 层
// ==========================================
// 职责: 面向调用方（CLI）的任务接口,编排导入/引擎/导出
// ==========================================

pub mod audit_api;
pub mod error;

pub use audit_api::{AuditApi, AuditJobResult, JobFiles, DEFAULT_TOP_VIOLATORS};
pub use error::{ApiError, ApiResult};
