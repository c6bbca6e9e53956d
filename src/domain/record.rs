// ==========================================
// 碳足迹审计系统 - 生产记录领域模型
// ==========================================
// 职责: 原始行 / 规范记录 / 清洗报告
// 用途: 导入层产出,引擎层只读
// ==========================================

use crate::domain::types::{EnergySource, Sector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始行记录（列名 → 原始文本）,无任何约束
pub type RawRow = HashMap<String, String>;

/// 必填列（按输出顺序）
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "factory_id",
    "sector",
    "month",
    "monthly_production_tons",
    "energy_used_mwh",
    "energy_source_type",
    "raw_material_weight_tons",
];

// ==========================================
// CanonicalRecord - 规范月度生产记录
// ==========================================
// 红线: 同一数据集内 (factory_id, month) 唯一
// 红线: 数值字段均 ≥ 0, month ∈ [1, 12]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub factory_id: String,
    pub sector: Sector,
    pub month: u32,
    pub monthly_production_tons: f64,
    pub energy_used_mwh: f64,
    pub energy_source_type: EnergySource,
    pub raw_material_weight_tons: f64,
}

// ==========================================
// RawProductionRecord - 导入中间结构体
// ==========================================
// 用途: 字段映射产物,数值字段尚未校验（None = 无法转换为数值）
// 生命周期: 仅在清洗流程内
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProductionRecord {
    pub factory_id: String,
    pub sector: String,
    pub month: Option<f64>,
    pub monthly_production_tons: Option<f64>,
    pub energy_used_mwh: Option<f64>,
    pub energy_source_type: String,
    pub raw_material_weight_tons: Option<f64>,

    // 元信息
    pub row_number: usize, // 原始文件数据行号（1 起）
}

// ==========================================
// CleaningReport - 清洗报告
// ==========================================
// 纯元数据,不影响审计结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub original_rows: usize,       // 原始行数
    pub cleaned_rows: usize,        // 清洗后行数
    pub rows_removed: usize,        // 删除行数
    pub factories_found: usize,     // 工厂数（去重）
    pub sectors_found: Vec<Sector>, // 出现的行业（有序）
    pub actions: Vec<String>,       // 清洗动作说明
}

impl CleaningReport {
    /// 无清洗动作时的占位说明
    pub const NO_ISSUES: &'static str = "No issues found, CSV was already clean";

    /// 是否未做任何修正
    pub fn is_clean(&self) -> bool {
        self.rows_removed == 0 && self.actions.iter().all(|a| a == Self::NO_ISSUES)
    }
}
