// ==========================================
// 碳足迹审计系统 - 导入层
// ==========================================
// 职责: 外部生产数据导入 + 清洗,生成规范记录
// 支持: CSV, Excel (xlsx/xls)
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_cleaner;
pub mod record_cleaner_trait;

// 重导出核心类型
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use record_cleaner::RecordCleaner;

// 重导出 Trait 接口
pub use record_cleaner_trait::{ConflictHandler, DataCleaner, FieldMapper, FileParser};
