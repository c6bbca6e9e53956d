// ==========================================
// 碳足迹审计系统 - 汇总报告
// ==========================================
// 职责: 台账集合 → 工厂汇总行 / 行业汇总 / 超限工厂 / 总体指标
// 红线: 纯归约,不修改台账
// ==========================================

use crate::domain::types::{ComplianceStatus, Sector};
use crate::engine::auditor::round2;
use crate::engine::ledger::FactoryLedger;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 汇总结构
// ==========================================

/// 单个工厂的年度汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorySummaryRow {
    pub factory_id: String,
    pub sector: Sector,
    pub total_emissions_kg: f64,
    pub max_monthly_emissions_kg: f64,
    pub avg_monthly_emissions_kg: f64,
    pub alerts_count: usize,
    pub status: ComplianceStatus,
}

/// 单个行业的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAggregate {
    pub factories: usize,
    pub total_emissions_kg: f64,
    pub avg_per_factory_kg: f64,
}

/// 超配额工厂
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violator {
    pub factory_id: String,
    pub sector: Sector,
    pub total_emissions_kg: f64,
    pub alerts_count: usize,
}

/// 总体指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_factories: usize,
    pub total_emissions_kg: f64,
    pub total_emissions_tons: f64,
    pub total_alerts: usize,
    pub factories_over_cap: usize,
}

// ==========================================
// SummaryReporter - 汇总报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReporter {
    pub overall: OverallSummary,
    pub factories: Vec<FactorySummaryRow>,
    pub sectors: BTreeMap<Sector, SectorAggregate>,
    pub violators: Vec<Violator>,
}

impl SummaryReporter {
    /// 从台账集合生成汇总
    pub fn from_ledgers(ledgers: &BTreeMap<String, FactoryLedger>) -> Self {
        let factories: Vec<FactorySummaryRow> = ledgers.values().map(Self::factory_row).collect();

        let mut violators: Vec<Violator> = ledgers
            .values()
            .filter(|ledger| ledger.is_over_cap())
            .map(|ledger| Violator {
                factory_id: ledger.factory_id().to_string(),
                sector: ledger.sector(),
                total_emissions_kg: round2(ledger.total_emissions()),
                alerts_count: ledger.alerts_count(),
            })
            .collect();
        // 稳定排序: 同值保持 factory_id 顺序
        violators.sort_by(|a, b| b.total_emissions_kg.total_cmp(&a.total_emissions_kg));

        let mut sector_totals: BTreeMap<Sector, (usize, f64)> = BTreeMap::new();
        for ledger in ledgers.values() {
            let slot = sector_totals.entry(ledger.sector()).or_insert((0, 0.0));
            slot.0 += 1;
            slot.1 += ledger.total_emissions();
        }
        let sectors = sector_totals
            .into_iter()
            .map(|(sector, (count, total))| {
                (
                    sector,
                    SectorAggregate {
                        factories: count,
                        total_emissions_kg: round2(total),
                        avg_per_factory_kg: round2(total / count as f64),
                    },
                )
            })
            .collect();

        let total_emissions: f64 = ledgers.values().map(|l| l.total_emissions()).sum();
        let overall = OverallSummary {
            total_factories: ledgers.len(),
            total_emissions_kg: round2(total_emissions),
            total_emissions_tons: round2(total_emissions / 1000.0),
            total_alerts: ledgers.values().map(|l| l.alerts_count()).sum(),
            factories_over_cap: violators.len(),
        };

        Self {
            overall,
            factories,
            sectors,
            violators,
        }
    }

    /// 排放量最高的前 n 个超限工厂
    pub fn top_violators(&self, n: usize) -> &[Violator] {
        &self.violators[..n.min(self.violators.len())]
    }

    fn factory_row(ledger: &FactoryLedger) -> FactorySummaryRow {
        let monthly = ledger.monthly_emissions();

        let (max, avg, status) = if monthly.is_empty() {
            (0.0, 0.0, ComplianceStatus::NoData)
        } else {
            let max = monthly.iter().copied().fold(f64::MIN, f64::max);
            let avg = monthly.iter().sum::<f64>() / monthly.len() as f64;
            let status = if ledger.is_over_cap() {
                ComplianceStatus::Exceeded
            } else {
                ComplianceStatus::Compliant
            };
            (max, avg, status)
        };

        FactorySummaryRow {
            factory_id: ledger.factory_id().to_string(),
            sector: ledger.sector(),
            total_emissions_kg: round2(ledger.total_emissions()),
            max_monthly_emissions_kg: round2(max),
            avg_monthly_emissions_kg: round2(avg),
            alerts_count: ledger.alerts_count(),
            status,
        }
    }
}
