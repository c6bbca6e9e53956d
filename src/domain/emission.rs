// ==========================================
// 碳足迹审计系统 - 排放领域模型
// ==========================================
// 职责: 排放因子 / 行业配置 / 月度审计结果 / 台账条目
// ==========================================

use crate::domain::types::{AuditStatus, Sector};
use serde::{Deserialize, Serialize};

// ==========================================
// EmissionFactors - 行业排放因子
// ==========================================
// 单位: kg CO₂ / 吨产品, kg CO₂ / MWh, kg CO₂ / 吨原料
// Copy 语义: 审计器创建时按值捕获,之后与来源配置无关
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactors {
    #[serde(default)]
    pub production_per_ton: f64,
    #[serde(default)]
    pub energy_per_mwh: f64,
    #[serde(default)]
    pub material_processing_per_ton: f64,
}

impl EmissionFactors {
    pub fn new(production_per_ton: f64, energy_per_mwh: f64, material_processing_per_ton: f64) -> Self {
        Self {
            production_per_ton,
            energy_per_mwh,
            material_processing_per_ton,
        }
    }
}

// ==========================================
// SectorConfig - 行业配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    #[serde(default)]
    pub emission_factor: EmissionFactors,
    pub carbon_cap_kg: f64, // 年度碳配额（kg CO₂）, 必须 > 0
}

// ==========================================
// EmissionBreakdown - 月度排放分项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    pub production_kg: f64,     // 生产排放
    pub energy_kg: f64,         // 能源排放（已乘能源倍率）
    pub material_kg: f64,       // 原料加工排放
    pub source_multiplier: f64, // 能源倍率
}

// ==========================================
// MonthlyResult - 单次审计输出
// ==========================================
// month_number: 审计器调用序号（1 起）,与调用方月份标签无关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    pub month_number: u32,
    pub monthly_emissions_kg: f64,
    pub total_emissions_kg: f64,
    pub status: AuditStatus,
    pub alert: Option<String>,
    pub breakdown: EmissionBreakdown,
}

// ==========================================
// LedgerEntry - 工厂台账条目
// ==========================================
// 审计结果 + 工厂元信息 + 调用方月份标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub factory_id: String,
    pub sector: Sector,
    pub month: u32,
    #[serde(flatten)]
    pub result: MonthlyResult,
}

impl LedgerEntry {
    pub fn is_alert(&self) -> bool {
        self.result.status == AuditStatus::Alert
    }
}
