// ==========================================
// 审计引擎集成测试
// ==========================================
// 测试目标: 规范记录 → 台账 → 汇总 的端到端行为
// ==========================================


use carbon_trace::engine::{AuditOrchestrator, EmissionAuditor, SummaryReporter};
use carbon_trace::{AuditConfig, AuditStatus, ComplianceStatus, EmissionFactors, EnergySource, Sector};
use test_helpers::record;

#[test]
fn test_steel_full_year_compliant() {
    let config = AuditConfig::builtin().unwrap();
    let records: Vec<_> = (1..=12)
        .map(|m| record("FAC_STEEL_01", Sector::Steel, m, 1000.0, 4000.0, EnergySource::Grid, 0.0))
        .collect();

    let ledgers = AuditOrchestrator::new().run_with_config(&records, &config);
    let ledger = &ledgers["FAC_STEEL_01"];

    assert!(ledger.monthly_emissions().iter().all(|m| *m == 5_130_000.0));
    assert_eq!(ledger.total_emissions(), 61_560_000.0);
    assert_eq!(ledger.alerts_count(), 0);

    let report = SummaryReporter::from_ledgers(&ledgers);
    assert_eq!(report.factories[0].status, ComplianceStatus::Compliant);
    assert!(report.violators.is_empty());
}

#[test]
fn test_textile_small_cap_alerts_immediately() {
    let mut auditor = EmissionAuditor::new(
        "Textile",
        EmissionFactors::new(450.0, 520.0, 65.0),
        500_000.0,
        None,
    );

    let first = auditor.record(400.0, 800.0, None, None);
    assert_eq!(first.monthly_emissions_kg, 596_000.0);
    assert_eq!(first.status, AuditStatus::Alert);

    let second = auditor.record(0.0, 0.0, None, None);
    assert_eq!(second.status, AuditStatus::Alert);
    assert_eq!(second.month_number, 2);
}

#[test]
fn test_factories_are_isolated() {
    let config = AuditConfig::builtin().unwrap();
    let records = vec![
        record("FAC_A", Sector::Steel, 1, 50_000.0, 0.0, EnergySource::Grid, 0.0),
        record("FAC_B", Sector::Steel, 1, 1.0, 0.0, EnergySource::Grid, 0.0),
    ];

    let ledgers = AuditOrchestrator::new().run_with_config(&records, &config);

    // FAC_A: 50,000 × 1850 = 92,500,000 > 75,000,000
    assert!(ledgers["FAC_A"].is_over_cap());
    assert!(!ledgers["FAC_B"].is_over_cap());
    assert_eq!(ledgers["FAC_B"].total_emissions(), 1850.0);
}

#[test]
fn test_cleaner_energy_names_match_multiplier_keys() {
    let config = AuditConfig::builtin().unwrap();
    for source in [
        EnergySource::Coal,
        EnergySource::NaturalGas,
        EnergySource::Grid,
        EnergySource::Renewable,
        EnergySource::Nuclear,
    ] {
        assert!(
            config.energy_source_multipliers.contains_key(source.as_str()),
            "缺少倍率 {}",
            source
        );
    }
}

#[test]
fn test_multiplier_ordering_follows_table() {
    let config = AuditConfig::builtin().unwrap();
    let sources = [
        EnergySource::Nuclear,
        EnergySource::Renewable,
        EnergySource::NaturalGas,
        EnergySource::Grid,
        EnergySource::Coal,
    ];
    let records: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(idx, s)| record(&format!("FAC_{}", idx), Sector::Electronics, 1, 10.0, 100.0, *s, 0.0))
        .collect();

    let ledgers = AuditOrchestrator::new().run_with_config(&records, &config);
    let totals: Vec<f64> = (0..sources.len())
        .map(|idx| ledgers[&format!("FAC_{}", idx)].total_emissions())
        .collect();

    assert!(totals.windows(2).all(|w| w[0] < w[1]), "{:?}", totals);
}

#[test]
fn test_summary_end_to_end() {
    let config = AuditConfig::builtin().unwrap();
    let mut records = Vec::new();
    for m in 1..=3 {
        records.push(record("FAC_TEX_01", Sector::Textile, m, 5000.0, 2000.0, EnergySource::Coal, 100.0));
        records.push(record("FAC_ELEC_01", Sector::Electronics, m, 10.0, 10.0, EnergySource::Renewable, 0.0));
    }

    let ledgers = AuditOrchestrator::new().run_with_config(&records, &config);
    let report = SummaryReporter::from_ledgers(&ledgers);

    // Textile 每月: 5000×450 + 2000×520×1.25 + 100×65 = 3,556,500
    let tex = report
        .factories
        .iter()
        .find(|r| r.factory_id == "FAC_TEX_01")
        .unwrap();
    assert_eq!(tex.max_monthly_emissions_kg, 3_556_500.0);
    assert_eq!(tex.total_emissions_kg, 10_669_500.0);
    assert_eq!(tex.alerts_count, 2);
    assert_eq!(tex.status, ComplianceStatus::Exceeded);

    assert_eq!(report.overall.total_factories, 2);
    assert_eq!(report.overall.factories_over_cap, 1);
    assert_eq!(report.top_violators(10)[0].factory_id, "FAC_TEX_01");
    assert_eq!(report.sectors.len(), 2);
}
