// ==========================================
// 碳足迹审计系统 - 命令行入口
// ==========================================
// 子命令: audit / clean / cleanup
// 日志: stderr（RUST_LOG 控制级别）; 结果: stdout
// ==========================================

use anyhow::Context;
use carbon_trace::api::{AuditApi, DEFAULT_TOP_VIOLATORS};
use carbon_trace::config::{AuditConfig, DEFAULT_CONFIG_PATH};
use carbon_trace::logging;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 工业碳排放审计工具
///
/// 清洗月度生产数据,按工厂累计排放并对照行业碳配额告警。
#[derive(Parser, Debug)]
#[command(name = "carbon-trace", version, about)]
struct Cli {
    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 清洗并审计生产数据,结果写入任务目录
    Audit(AuditArgs),
    /// 仅清洗生产数据
    Clean(CleanArgs),
    /// 删除任务目录
    Cleanup(CleanupArgs),
}

#[derive(Args, Debug)]
struct AuditArgs {
    /// 生产数据文件（.csv / .xlsx / .xls）
    input: PathBuf,

    /// 行业配置文件（不存在时使用内置配置）
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 任务目录的根目录
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// 结果中保留的超限工厂数量
    #[arg(long, default_value_t = DEFAULT_TOP_VIOLATORS)]
    top: usize,
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// 生产数据文件（.csv / .xlsx / .xls）
    input: PathBuf,

    /// cleaned CSV 输出路径
    #[arg(long)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct CleanupArgs {
    /// 任务 ID
    job_id: String,

    /// 任务目录的根目录
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::debug!(version = carbon_trace::VERSION, "{}", carbon_trace::APP_NAME);

    match cli.command {
        Commands::Audit(args) => run_audit(args),
        Commands::Clean(args) => run_clean(args),
        Commands::Cleanup(args) => run_cleanup(args),
    }
}

fn output_root(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(AuditApi::default_output_root)
}

fn run_audit(args: AuditArgs) -> anyhow::Result<()> {
    let config = AuditConfig::load_or_builtin(&args.config)
        .with_context(|| format!("加载行业配置失败: {}", args.config.display()))?;
    let api = AuditApi::new(output_root(args.output_dir), config).with_top_violators(args.top);

    let result = api
        .run_audit(&args.input)
        .with_context(|| format!("审计失败: {}", args.input.display()))?;

    println!("job_id: {}", result.job_id);
    println!("job_dir: {}", api.job_dir(&result.job_id).display());
    println!(
        "factories: {}, total: {:.2} t CO₂, alerts: {}, over cap: {}",
        result.summary.total_factories,
        result.summary.total_emissions_tons,
        result.summary.total_alerts,
        result.summary.factories_over_cap
    );
    for violator in &result.violators {
        println!(
            "  {} ({}) {:.2} kg, {} alert month(s)",
            violator.factory_id, violator.sector, violator.total_emissions_kg, violator.alerts_count
        );
    }
    for action in &result.cleaning_report.actions {
        println!("cleaning: {}", action);
    }

    Ok(())
}

fn run_clean(args: CleanArgs) -> anyhow::Result<()> {
    // 清洗不需要行业配置
    let api = AuditApi::new(AuditApi::default_output_root(), AuditConfig::default());
    let report = api
        .clean_only(&args.input, &args.output)
        .with_context(|| format!("清洗失败: {}", args.input.display()))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_cleanup(args: CleanupArgs) -> anyhow::Result<()> {
    let api = AuditApi::new(output_root(args.output_dir), AuditConfig::default());
    api.cleanup_job(&args.job_id)
        .with_context(|| format!("删除任务失败: {}", args.job_id))?;

    println!("Job {} cleaned up.", args.job_id);
    Ok(())
}
