// ==========================================
// 碳足迹审计系统 - 审计任务 API
// ==========================================
// 职责: 一次上传 = 一个任务: 落盘原始文件 → 清洗 → 审计 → 汇总 → 导出
// 存储: <output_root>/<job_id>/ 下的全部产物
// 红线: 任务失败时删除任务目录（尽力而为）; 任务之间不共享状态
// ==========================================

use crate::config::AuditConfig;
use crate::domain::record::CleaningReport;
use crate::domain::types::Sector;
use crate::engine::{
    AuditOrchestrator, FactorySummaryRow, OverallSummary, SectorAggregate, SummaryReporter,
    Violator,
};
use crate::exporter::AuditExporter;
use crate::api::error::{ApiError, ApiResult};
use crate::importer::RecordCleaner;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// 审计结果中保留的超限工厂数量
pub const DEFAULT_TOP_VIOLATORS: usize = 10;

/// 任务 ID 长度（UUID v4 十六进制前缀）
const JOB_ID_LEN: usize = 12;

// 任务目录内的文件名
const RAW_UPLOAD_STEM: &str = "raw_upload";
const CLEANED_FILE: &str = "cleaned.csv";
const SUMMARY_FILE: &str = "audit_summary.csv";
const TIMESERIES_FILE: &str = "emissions_timeseries.csv";
const RESULT_FILE: &str = "audit_result.json";

/// 任务产物文件名（相对任务目录）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFiles {
    pub raw_upload: String,
    pub cleaned_csv: String,
    pub audit_csv: String,
    pub timeseries_csv: String,
    pub result_json: String,
}

/// 审计任务结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditJobResult {
    pub job_id: String,
    pub created_at: DateTime<Utc>,
    pub summary: OverallSummary,
    pub sector_breakdown: BTreeMap<Sector, SectorAggregate>,
    /// 各行业年度配额（kg）,图表中的配额参考线
    pub sector_caps: BTreeMap<String, f64>,
    /// 排放量最高的超限工厂（降序）
    pub violators: Vec<Violator>,
    pub factories: Vec<FactorySummaryRow>,
    pub cleaning_report: CleaningReport,
    pub files: JobFiles,
}

/// 审计任务 API
pub struct AuditApi {
    output_root: PathBuf,
    config: AuditConfig,
    cleaner: RecordCleaner,
    top_violators: usize,
}

impl AuditApi {
    /// 创建新的 AuditApi 实例
    ///
    /// # 参数
    /// - output_root: 任务目录的根目录（不存在时自动创建）
    /// - config: 行业审计配置（任务期间只读）
    pub fn new(output_root: impl Into<PathBuf>, config: AuditConfig) -> Self {
        Self {
            output_root: output_root.into(),
            config,
            cleaner: RecordCleaner::default(),
            top_violators: DEFAULT_TOP_VIOLATORS,
        }
    }

    /// 设置结果中保留的超限工厂数量
    pub fn with_top_violators(mut self, n: usize) -> Self {
        self.top_violators = n;
        self
    }

    /// 默认任务根目录: <本地数据目录>/carbon-trace/outputs,不可用时为 data/outputs
    pub fn default_output_root() -> PathBuf {
        dirs::data_local_dir()
            .map(|dir| dir.join("carbon-trace").join("outputs"))
            .unwrap_or_else(|| PathBuf::from("data").join("outputs"))
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn job_dir(&self, job_id: &str) -> PathBuf {
        self.output_root.join(job_id)
    }

    /// 执行一次完整审计任务
    ///
    /// # 参数
    /// - input: 生产数据文件（.csv / .xlsx / .xls）
    ///
    /// # 返回
    /// - Ok(AuditJobResult): 任务结果（同时写入 audit_result.json）
    /// - Err(ApiError): 任务失败,任务目录已清理
    #[instrument(skip(self, input), fields(input = %input.display()))]
    pub fn run_audit(&self, input: &Path) -> ApiResult<AuditJobResult> {
        if !input.is_file() {
            return Err(ApiError::InputNotFound(input.display().to_string()));
        }

        let job_id = new_job_id();
        let job_dir = self.job_dir(&job_id);
        std::fs::create_dir_all(&job_dir)?;
        info!(job_id = %job_id, job_dir = %job_dir.display(), "审计任务开始");

        match self.run_job(&job_id, &job_dir, input) {
            Ok(result) => {
                info!(
                    job_id = %job_id,
                    factories = result.summary.total_factories,
                    over_cap = result.summary.factories_over_cap,
                    "审计任务完成"
                );
                Ok(result)
            }
            Err(err) => {
                error!(job_id = %job_id, error = %err, "审计任务失败");
                remove_job_dir(&job_dir);
                Err(err)
            }
        }
    }

    /// 仅清洗,不审计
    ///
    /// # 参数
    /// - input: 生产数据文件
    /// - output: cleaned CSV 输出路径
    #[instrument(skip(self, input, output), fields(input = %input.display(), output = %output.display()))]
    pub fn clean_only(&self, input: &Path, output: &Path) -> ApiResult<CleaningReport> {
        let (records, report) = self.cleaner.clean_file(input)?;
        AuditExporter.write_cleaned_csv(output, &records)?;
        Ok(report)
    }

    /// 删除任务目录
    pub fn cleanup_job(&self, job_id: &str) -> ApiResult<()> {
        if job_id.is_empty() || !job_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::InvalidJobId(job_id.to_string()));
        }

        let job_dir = self.job_dir(job_id);
        if !job_dir.is_dir() {
            return Err(ApiError::JobNotFound(job_id.to_string()));
        }

        std::fs::remove_dir_all(&job_dir)?;
        info!(job_id = %job_id, "任务目录已删除");
        Ok(())
    }

    fn run_job(&self, job_id: &str, job_dir: &Path, input: &Path) -> ApiResult<AuditJobResult> {
        // === 步骤 1: 保存原始文件 ===
        let raw_upload = match input.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", RAW_UPLOAD_STEM, ext.to_lowercase()),
            None => RAW_UPLOAD_STEM.to_string(),
        };
        let raw_path = job_dir.join(&raw_upload);
        std::fs::copy(input, &raw_path)?;

        // === 步骤 2: 清洗 ===
        let (records, cleaning_report) = self.cleaner.clean_file(&raw_path)?;
        AuditExporter.write_cleaned_csv(&job_dir.join(CLEANED_FILE), &records)?;

        // === 步骤 3: 审计 ===
        let ledgers = AuditOrchestrator::new().run_with_config(&records, &self.config);
        if ledgers.is_empty() {
            warn!(job_id = %job_id, "清洗后没有有效数据");
            return Err(ApiError::NoValidData);
        }

        // === 步骤 4: 汇总 + 导出 ===
        let report = SummaryReporter::from_ledgers(&ledgers);
        AuditExporter.write_summary_csv(&job_dir.join(SUMMARY_FILE), &report.factories)?;
        AuditExporter.write_timeseries_csv(&job_dir.join(TIMESERIES_FILE), &ledgers)?;

        let result = AuditJobResult {
            job_id: job_id.to_string(),
            created_at: Utc::now(),
            violators: report.top_violators(self.top_violators).to_vec(),
            summary: report.overall,
            sector_breakdown: report.sectors,
            sector_caps: self.config.sector_caps(),
            factories: report.factories,
            cleaning_report,
            files: JobFiles {
                raw_upload,
                cleaned_csv: CLEANED_FILE.to_string(),
                audit_csv: SUMMARY_FILE.to_string(),
                timeseries_csv: TIMESERIES_FILE.to_string(),
                result_json: RESULT_FILE.to_string(),
            },
        };
        AuditExporter.write_json(&job_dir.join(RESULT_FILE), &result)?;

        Ok(result)
    }
}

/// 生成任务 ID（UUID v4 十六进制前 12 位）
fn new_job_id() -> String {
    Uuid::new_v4().simple().to_string()[..JOB_ID_LEN].to_string()
}

/// 删除任务目录（失败只记录日志）
fn remove_job_dir(job_dir: &Path) {
    if job_dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(job_dir) {
            warn!(job_dir = %job_dir.display(), error = %e, "任务目录清理失败");
        }
    }
}
