// ==========================================
// 碳足迹审计系统 - 配置模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 配置模块错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("行业 {sector} 的碳配额非法: {value}（必须大于 0）")]
    InvalidCap { sector: String, value: f64 },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
