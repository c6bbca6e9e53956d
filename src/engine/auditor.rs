// ==========================================
// 碳足迹审计系统 - 排放审计器
// ==========================================
// 职责: 单个工厂的月度排放计算 + 年度累计 + 配额告警
// 输入: 月度产量 / 能耗 / 能源类型 / 原料重量
// 输出: MonthlyResult（含分项明细）
// 红线: 排放因子与倍率表创建时按值捕获; 累计值只增不减,从不重置
// ==========================================

use crate::domain::emission::{EmissionBreakdown, EmissionFactors, MonthlyResult};
use crate::domain::types::AuditStatus;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 无倍率配置时的能源倍率
const NEUTRAL_MULTIPLIER: f64 = 1.0;

// ==========================================
// EmissionAuditor - 排放审计器
// ==========================================
#[derive(Debug, Clone)]
pub struct EmissionAuditor {
    sector: String,
    factors: EmissionFactors,
    cap_kg: f64,
    multipliers: BTreeMap<String, f64>,
    total_emissions_kg: f64,
    months_recorded: u32,
}

impl EmissionAuditor {
    /// 创建审计器
    ///
    /// # 参数
    /// - sector: 行业名（仅用于标识）
    /// - factors: 排放因子（按值复制）
    /// - cap_kg: 年度碳配额
    /// - multipliers: 能源倍率表（克隆,之后与调用方无关）
    pub fn new(
        sector: impl Into<String>,
        factors: EmissionFactors,
        cap_kg: f64,
        multipliers: Option<&BTreeMap<String, f64>>,
    ) -> Self {
        Self {
            sector: sector.into(),
            factors,
            cap_kg,
            multipliers: multipliers.cloned().unwrap_or_default(),
            total_emissions_kg: 0.0,
            months_recorded: 0,
        }
    }

    /// 记录一个月的生产数据
    ///
    /// # 参数
    /// - monthly_production_tons: 月产量（吨）
    /// - energy_used_mwh: 月能耗（MWh）
    /// - energy_source_type: 能源类型（倍率表未命中时倍率为 1.0）
    /// - raw_material_weight_tons: 原料重量（None 或 <= 0 时不计原料排放）
    ///
    /// # 返回
    /// 当月排放、累计排放、状态及分项明细（保留两位小数）
    pub fn record(
        &mut self,
        monthly_production_tons: f64,
        energy_used_mwh: f64,
        energy_source_type: Option<&str>,
        raw_material_weight_tons: Option<f64>,
    ) -> MonthlyResult {
        let production_kg = monthly_production_tons * self.factors.production_per_ton;
        let energy_kg = energy_used_mwh * self.factors.energy_per_mwh;
        let material_kg = match raw_material_weight_tons {
            Some(weight) if weight > 0.0 => weight * self.factors.material_processing_per_ton,
            _ => 0.0,
        };

        let source_multiplier = energy_source_type
            .and_then(|source| self.multipliers.get(source))
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER);
        let adjusted_energy_kg = energy_kg * source_multiplier;

        let monthly_kg = production_kg + adjusted_energy_kg + material_kg;
        self.total_emissions_kg += monthly_kg;
        self.months_recorded += 1;

        let (status, alert) = if self.total_emissions_kg > self.cap_kg {
            warn!(
                sector = %self.sector,
                month_number = self.months_recorded,
                total_emissions_kg = self.total_emissions_kg,
                cap_kg = self.cap_kg,
                "碳配额超限"
            );
            (
                AuditStatus::Alert,
                Some(format!(
                    "Carbon cap exceeded! Total: {} kg CO₂ (cap: {} kg)",
                    format_thousands(self.total_emissions_kg),
                    format_thousands(self.cap_kg)
                )),
            )
        } else {
            (AuditStatus::Ok, None)
        };

        debug!(
            sector = %self.sector,
            month_number = self.months_recorded,
            monthly_kg,
            "月度排放已记录"
        );

        MonthlyResult {
            month_number: self.months_recorded,
            monthly_emissions_kg: round2(monthly_kg),
            total_emissions_kg: round2(self.total_emissions_kg),
            status,
            alert,
            breakdown: EmissionBreakdown {
                production_kg: round2(production_kg),
                energy_kg: round2(adjusted_energy_kg),
                material_kg: round2(material_kg),
                source_multiplier,
            },
        }
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn months_recorded(&self) -> u32 {
        self.months_recorded
    }

    pub fn cap_kg(&self) -> f64 {
        self.cap_kg
    }
}

/// 保留两位小数（恰好居中时取偶数: 115.625 → 115.62）
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// 取整并插入千分位（1234567.8 → "1,234,568"）
pub(crate) fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}
