// ==========================================
// 碳足迹审计系统 - API 层错误类型
// ==========================================
// 职责: 汇总导入/配置/导出错误,提供面向调用方的错误分类
// 工具: thiserror 派生宏
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 用户可修正 =====
    #[error("输入文件不存在: {0}")]
    InputNotFound(String),

    #[error("数据结构错误: {0}")]
    Schema(String),

    #[error("清洗后没有有效的工厂数据,请检查文件是否包含必填列")]
    NoValidData,

    #[error("任务不存在: {0}")]
    JobNotFound(String),

    #[error("无效的任务 ID: {0}")]
    InvalidJobId(String),

    // ===== 技术错误 =====
    #[error("文件导入失败: {0}")]
    Import(ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("结果导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("任务目录操作失败: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// 是否为用户输入问题（对应 HTTP 4xx 语义）
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::InputNotFound(_)
                | ApiError::Schema(_)
                | ApiError::NoValidData
                | ApiError::JobNotFound(_)
                | ApiError::InvalidJobId(_)
                | ApiError::Import(ImportError::UnsupportedFormat(_))
        )
    }
}

// ==========================================
// 从 ImportError 转换
// 目的: 数据结构问题单独归类,便于调用方提示用户修正
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Schema(msg) => ApiError::Schema(msg),
            ImportError::FileNotFound(path) => ApiError::InputNotFound(path),
            other => ApiError::Import(other),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
