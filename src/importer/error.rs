// ==========================================
// 碳足迹审计系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级问题（数值无法转换/负值/重复）不是错误,只计入清洗报告
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据结构错误（用户可修正） =====
    #[error("数据结构错误: {0}")]
    Schema(String),
}

impl ImportError {
    /// 空文件
    pub fn empty_input() -> Self {
        ImportError::Schema("上传文件为空,未找到任何数据行".to_string())
    }

    /// 缺少必填列
    pub fn missing_columns(missing: &[&str], expected: &[&str]) -> Self {
        ImportError::Schema(format!(
            "缺少必填列: [{}]; 期望列: [{}]",
            missing.join(", "),
            expected.join(", ")
        ))
    }

    /// 列名重复（含标准化后相同的列名）
    pub fn duplicate_column(column: &str) -> Self {
        ImportError::Schema(format!("列名重复: {}", column))
    }

    /// 是否为用户可修正的数据结构问题
    pub fn is_schema_error(&self) -> bool {
        matches!(self, ImportError::Schema(_))
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
