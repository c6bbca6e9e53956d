// ==========================================
// 碳足迹审计系统 - 工厂台账
// ==========================================
// 职责: 持有单个工厂的审计器 + 只追加的月度历史
// 红线: 历史只能通过 record_month 追加,对外只提供副本
// ==========================================

use crate::domain::emission::{EmissionFactors, LedgerEntry};
use crate::domain::types::Sector;
use crate::engine::auditor::EmissionAuditor;
use std::collections::BTreeMap;

// ==========================================
// FactoryLedger - 工厂台账
// ==========================================
#[derive(Debug, Clone)]
pub struct FactoryLedger {
    factory_id: String,
    sector: Sector,
    auditor: EmissionAuditor,
    history: Vec<LedgerEntry>,
}

impl FactoryLedger {
    pub fn new(
        factory_id: impl Into<String>,
        sector: Sector,
        factors: EmissionFactors,
        cap_kg: f64,
        multipliers: Option<&BTreeMap<String, f64>>,
    ) -> Self {
        Self {
            factory_id: factory_id.into(),
            sector,
            auditor: EmissionAuditor::new(sector.as_str(), factors, cap_kg, multipliers),
            history: Vec::new(),
        }
    }

    /// 记录一个月并追加到历史
    ///
    /// # 参数
    /// - month: 调用方月份标签（不影响计算）
    pub fn record_month(
        &mut self,
        month: u32,
        monthly_production_tons: f64,
        energy_used_mwh: f64,
        energy_source_type: Option<&str>,
        raw_material_weight_tons: Option<f64>,
    ) -> LedgerEntry {
        let result = self.auditor.record(
            monthly_production_tons,
            energy_used_mwh,
            energy_source_type,
            raw_material_weight_tons,
        );

        let entry = LedgerEntry {
            factory_id: self.factory_id.clone(),
            sector: self.sector,
            month,
            result,
        };
        self.history.push(entry.clone());
        entry
    }

    pub fn factory_id(&self) -> &str {
        &self.factory_id
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn cap_kg(&self) -> f64 {
        self.auditor.cap_kg()
    }

    /// 历史副本（修改副本不影响台账）
    pub fn history(&self) -> Vec<LedgerEntry> {
        self.history.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// 累计排放（最后一条记录的 total,无记录为 0）
    pub fn total_emissions(&self) -> f64 {
        self.history
            .last()
            .map(|entry| entry.result.total_emissions_kg)
            .unwrap_or(0.0)
    }

    pub fn alerts_count(&self) -> usize {
        self.history.iter().filter(|entry| entry.is_alert()).count()
    }

    pub fn is_over_cap(&self) -> bool {
        self.alerts_count() > 0
    }

    /// 月度排放序列（已保留两位小数）
    pub fn monthly_emissions(&self) -> Vec<f64> {
        self.history
            .iter()
            .map(|entry| entry.result.monthly_emissions_kg)
            .collect()
    }

    /// (月份, 累计排放) 序列,按月份升序
    pub fn time_series(&self) -> Vec<(u32, f64)> {
        let mut series: Vec<(u32, f64)> = self
            .history
            .iter()
            .map(|entry| (entry.month, entry.result.total_emissions_kg))
            .collect();
        series.sort_by_key(|(month, _)| *month);
        series
    }
}
