// ==========================================
// 碳足迹审计系统 - 审计编排器
// ==========================================
// 职责: 按记录顺序将规范记录分派到各工厂台账
// 输入: 规范记录（已清洗、已排序）+ 行业配置 + 能源倍率表
// 输出: factory_id → FactoryLedger（按 factory_id 有序）
// 红线: 严格顺序处理; 工厂行业以首次出现为准
// ==========================================

use crate::config::{AuditConfig, DEFAULT_CARBON_CAP_KG};
use crate::domain::emission::{EmissionFactors, SectorConfig};
use crate::domain::record::CanonicalRecord;
use crate::engine::ledger::FactoryLedger;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

// ==========================================
// AuditOrchestrator - 审计编排器
// ==========================================
#[derive(Debug, Default)]
pub struct AuditOrchestrator;

impl AuditOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// 执行审计
    ///
    /// # 参数
    /// - records: 规范记录
    /// - sector_configs: 行业名 → 行业配置
    /// - energy_multipliers: 能源倍率表（所有工厂共享）
    ///
    /// # 返回
    /// 每个工厂一个台账
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn run(
        &self,
        records: &[CanonicalRecord],
        sector_configs: &BTreeMap<String, SectorConfig>,
        energy_multipliers: &BTreeMap<String, f64>,
    ) -> BTreeMap<String, FactoryLedger> {
        let mut ledgers: BTreeMap<String, FactoryLedger> = BTreeMap::new();

        for record in records {
            let ledger = match ledgers.entry(record.factory_id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let (factors, cap_kg) = match sector_configs.get(record.sector.as_str()) {
                        Some(cfg) => (cfg.emission_factor, cfg.carbon_cap_kg),
                        None => {
                            warn!(
                                factory_id = %record.factory_id,
                                sector = %record.sector,
                                cap_kg = DEFAULT_CARBON_CAP_KG,
                                "行业缺少配置,使用空排放因子与兜底配额"
                            );
                            (EmissionFactors::default(), DEFAULT_CARBON_CAP_KG)
                        }
                    };
                    entry.insert(FactoryLedger::new(
                        record.factory_id.clone(),
                        record.sector,
                        factors,
                        cap_kg,
                        Some(energy_multipliers),
                    ))
                }
            };

            ledger.record_month(
                record.month,
                record.monthly_production_tons,
                record.energy_used_mwh,
                Some(record.energy_source_type.as_str()),
                Some(record.raw_material_weight_tons),
            );
        }

        info!(
            factories = ledgers.len(),
            over_cap = ledgers.values().filter(|l| l.is_over_cap()).count(),
            "审计完成"
        );
        ledgers
    }

    /// 使用完整审计配置执行审计
    pub fn run_with_config(
        &self,
        records: &[CanonicalRecord],
        config: &AuditConfig,
    ) -> BTreeMap<String, FactoryLedger> {
        self.run(records, &config.sectors, &config.energy_source_multipliers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{EnergySource, Sector};

    fn record(factory_id: &str, sector: Sector, month: u32, production: f64) -> CanonicalRecord {
        CanonicalRecord {
            factory_id: factory_id.to_string(),
            sector,
            month,
            monthly_production_tons: production,
            energy_used_mwh: 0.0,
            energy_source_type: EnergySource::Coal,
            raw_material_weight_tons: 0.0,
        }
    }

    fn configs() -> BTreeMap<String, SectorConfig> {
        let mut map = BTreeMap::new();
        map.insert(
            "Steel".to_string(),
            SectorConfig {
                emission_factor: EmissionFactors::new(10.0, 0.0, 0.0),
                carbon_cap_kg: 25.0,
            },
        );
        map
    }

    #[test]
    fn test_one_ledger_per_factory() {
        let records = vec![
            record("FAC_B", Sector::Steel, 1, 1.0),
            record("FAC_A", Sector::Steel, 1, 1.0),
            record("FAC_A", Sector::Steel, 2, 2.0),
        ];

        let ledgers = AuditOrchestrator::new().run(&records, &configs(), &BTreeMap::new());

        let ids: Vec<&str> = ledgers.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["FAC_A", "FAC_B"]);
        assert_eq!(ledgers["FAC_A"].history().len(), 2);
        assert_eq!(ledgers["FAC_A"].total_emissions(), 30.0);
        assert!(ledgers["FAC_A"].is_over_cap());
        assert!(!ledgers["FAC_B"].is_over_cap());
    }

    #[test]
    fn test_missing_sector_uses_fallback() {
        let records = vec![record("FAC_T", Sector::Textile, 1, 1_000_000.0)];

        let ledgers = AuditOrchestrator::new().run(&records, &configs(), &BTreeMap::new());

        let ledger = &ledgers["FAC_T"];
        assert_eq!(ledger.cap_kg(), DEFAULT_CARBON_CAP_KG);
        assert_eq!(ledger.total_emissions(), 0.0);
        assert!(!ledger.is_over_cap());
    }

    #[test]
    fn test_sector_fixed_at_first_sight() {
        let records = vec![
            record("FAC_X", Sector::Steel, 1, 1.0),
            record("FAC_X", Sector::Textile, 2, 1.0),
        ];

        let ledgers = AuditOrchestrator::new().run(&records, &configs(), &BTreeMap::new());

        let ledger = &ledgers["FAC_X"];
        assert_eq!(ledger.sector(), Sector::Steel);
        assert!(ledger.history().iter().all(|e| e.sector == Sector::Steel));
        assert_eq!(ledger.total_emissions(), 20.0);
    }

    #[test]
    fn test_multipliers_shared_by_all_ledgers() {
        let mut configs = configs();
        configs.insert(
            "Textile".to_string(),
            SectorConfig {
                emission_factor: EmissionFactors::new(0.0, 1.0, 0.0),
                carbon_cap_kg: 1e9,
            },
        );
        let mut multipliers = BTreeMap::new();
        multipliers.insert("coal".to_string(), 2.0);

        let mut rec = record("FAC_T", Sector::Textile, 1, 0.0);
        rec.energy_used_mwh = 10.0;

        let ledgers = AuditOrchestrator::new().run(&[rec], &configs, &multipliers);
        assert_eq!(ledgers["FAC_T"].total_emissions(), 20.0);
    }

    #[test]
    fn test_run_with_config_builtin() {
        let config = AuditConfig::builtin().unwrap();
        let records = vec![record("FAC_S", Sector::Steel, 1, 1.0)];

        let ledgers = AuditOrchestrator::new().run_with_config(&records, &config);
        assert_eq!(ledgers["FAC_S"].total_emissions(), 1850.0);
    }
}
