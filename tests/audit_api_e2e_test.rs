// ==========================================
// AuditApi 端到端测试
// ==========================================
// 测试目标: 文件上传 → 任务目录产物 → 结果 JSON → 清理
// ==========================================


use carbon_trace::api::{ApiError, AuditApi, AuditJobResult};
use carbon_trace::config::AuditConfig;
use carbon_trace::logging;
use carbon_trace::Sector;
use tempfile::TempDir;
use test_helpers::{dirty_lines, steel_full_year_lines, write_csv};

fn create_api(tmp: &TempDir) -> AuditApi {
    AuditApi::new(tmp.path().join("outputs"), AuditConfig::builtin().unwrap())
}

#[test]
fn test_full_year_audit_job() {
    logging::init_test();
    let tmp = TempDir::new().unwrap();
    let lines = steel_full_year_lines();
    let line_refs: Vec<&str> = lines.iter().map(|l| l.as_str()).collect();
    let input = write_csv(tmp.path(), "monthly_production.csv", &line_refs);
    let api = create_api(&tmp);

    let result = api.run_audit(&input).unwrap();

    assert_eq!(result.job_id.len(), 12);
    assert_eq!(result.summary.total_factories, 1);
    assert_eq!(result.summary.total_emissions_kg, 61_560_000.0);
    assert_eq!(result.summary.total_emissions_tons, 61_560.0);
    assert_eq!(result.summary.total_alerts, 0);
    assert!(result.violators.is_empty());
    assert_eq!(result.sector_breakdown[&Sector::Steel].factories, 1);

    let job_dir = api.job_dir(&result.job_id);

    let summary = std::fs::read_to_string(job_dir.join(&result.files.audit_csv)).unwrap();
    let summary_lines: Vec<&str> = summary.lines().collect();
    assert_eq!(
        summary_lines,
        vec![
            "factory_id,sector,total_emissions_kg,max_monthly_emissions_kg,avg_monthly_emissions_kg,alerts_count,status",
            "FAC_STEEL_01,Steel,61560000.00,5130000.00,5130000.00,0,COMPLIANT",
        ]
    );

    let series = std::fs::read_to_string(job_dir.join(&result.files.timeseries_csv)).unwrap();
    assert_eq!(series.lines().count(), 13);
    assert!(series.contains("FAC_STEEL_01,Steel,12,61560000.00"));

    // 结果 JSON 与返回值一致
    let json = std::fs::read_to_string(job_dir.join(&result.files.result_json)).unwrap();
    let persisted: AuditJobResult = serde_json::from_str(&json).unwrap();
    assert_eq!(persisted, result);
}

#[test]
fn test_dirty_upload_reports_cleaning_actions() {
    let tmp = TempDir::new().unwrap();
    let input = write_csv(tmp.path(), "dirty.csv", &dirty_lines());
    let api = create_api(&tmp);

    let result = api.run_audit(&input).unwrap();

    assert_eq!(result.cleaning_report.rows_removed, 5);
    assert_eq!(result.cleaning_report.actions.len(), 4);
    assert_eq!(result.summary.total_factories, 2);

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(api.job_dir(&result.job_id).join("audit_result.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["factories"][0]["status"], "COMPLIANT");
    assert!(json["sector_breakdown"]["Textile"].is_object());
    assert_eq!(json["cleaning_report"]["original_rows"], 7);
    // 行业配额随结果一并写出
    assert_eq!(json["sector_caps"]["Steel"], 75_000_000.0);
    assert_eq!(json["sector_caps"]["Textile"], 7_000_000.0);
}

#[test]
fn test_top_violators_limit() {
    let tmp = TempDir::new().unwrap();
    let mut lines = vec![test_helpers::HEADER.to_string()];
    for idx in 0..5 {
        // 每家纺织厂单月超过 7,000,000 kg 配额
        lines.push(format!("FAC_TEX_{:02},Textile,1,{},0,grid,0", idx, 20_000 + idx));
    }
    let line_refs: Vec<&str> = lines.iter().map(|l| l.as_str()).collect();
    let input = write_csv(tmp.path(), "p.csv", &line_refs);

    let result = create_api(&tmp)
        .with_top_violators(3)
        .run_audit(&input)
        .unwrap();

    assert_eq!(result.summary.factories_over_cap, 5);
    let ids: Vec<&str> = result.violators.iter().map(|v| v.factory_id.as_str()).collect();
    assert_eq!(ids, vec!["FAC_TEX_04", "FAC_TEX_03", "FAC_TEX_02"]);
}

#[test]
fn test_jobs_are_isolated() {
    let tmp = TempDir::new().unwrap();
    let lines = steel_full_year_lines();
    let line_refs: Vec<&str> = lines.iter().map(|l| l.as_str()).collect();
    let input = write_csv(tmp.path(), "p.csv", &line_refs);
    let api = create_api(&tmp);

    let first = api.run_audit(&input).unwrap();
    let second = api.run_audit(&input).unwrap();

    assert_ne!(first.job_id, second.job_id);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn test_schema_failure_leaves_no_job_dir() {
    let tmp = TempDir::new().unwrap();
    let input = write_csv(tmp.path(), "bad.csv", &["factory_id,month", "FAC_A,1"]);
    let api = create_api(&tmp);

    let err = api.run_audit(&input).unwrap_err();

    assert!(matches!(err, ApiError::Schema(_)));
    assert!(err.is_user_error());
    assert_eq!(std::fs::read_dir(api.output_root()).unwrap().count(), 0);
}

#[test]
fn test_cleanup_removes_job() {
    let tmp = TempDir::new().unwrap();
    let lines = steel_full_year_lines();
    let line_refs: Vec<&str> = lines.iter().map(|l| l.as_str()).collect();
    let input = write_csv(tmp.path(), "p.csv", &line_refs);
    let api = create_api(&tmp);
    let result = api.run_audit(&input).unwrap();

    api.cleanup_job(&result.job_id).unwrap();

    assert!(!api.job_dir(&result.job_id).exists());
    assert!(matches!(
        api.cleanup_job("000000000000"),
        Err(ApiError::JobNotFound(_))
    ));
}
