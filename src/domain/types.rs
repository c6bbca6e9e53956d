// ==========================================
// 碳足迹审计系统 - 领域类型定义
// ==========================================
// 职责: 行业 / 能源类型 / 审计状态 / 合规状态枚举
// 红线: 枚举值即规范值,清洗层之后不再出现自由文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 行业 (Sector)
// ==========================================
// 序列化格式: 首字母大写 (与配置文件键名一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    Electronics, // 电子
    Steel,       // 钢铁
    Textile,     // 纺织
}

impl Sector {
    /// 全部合法行业
    pub const ALL: [Sector; 3] = [Sector::Electronics, Sector::Steel, Sector::Textile];

    /// 按规范名称精确匹配（区分大小写）
    ///
    /// 清洗层先做 title-case,再调用本方法判定合法性
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Steel" => Some(Sector::Steel),
            "Textile" => Some(Sector::Textile),
            "Electronics" => Some(Sector::Electronics),
            _ => None,
        }
    }

    /// 配置文件/输出表中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Steel => "Steel",
            Sector::Textile => "Textile",
            Sector::Electronics => "Electronics",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 能源类型 (Energy Source Type)
// ==========================================
// 序列化格式: snake_case (与倍率表键名一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySource {
    Coal,       // 燃煤
    NaturalGas, // 天然气
    Grid,       // 电网
    Renewable,  // 可再生
    Nuclear,    // 核电
}

impl EnergySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySource::Coal => "coal",
            EnergySource::NaturalGas => "natural_gas",
            EnergySource::Grid => "grid",
            EnergySource::Renewable => "renewable",
            EnergySource::Nuclear => "nuclear",
        }
    }
}

impl Default for EnergySource {
    // 未知能源类型一律按电网处理
    fn default() -> Self {
        EnergySource::Grid
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 月度审计状态 (Audit Status)
// ==========================================
// 累计排放 > 年度配额 → ALERT,之后每个月都保持 ALERT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Ok,    // 配额内
    Alert, // 超配额
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::Ok => write!(f, "OK"),
            AuditStatus::Alert => write!(f, "ALERT"),
        }
    }
}

// ==========================================
// 工厂年度合规状态 (Compliance Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant, // 全年未超配额
    Exceeded,  // 至少一个月超配额
    NoData,    // 台账为空
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "COMPLIANT"),
            ComplianceStatus::Exceeded => write!(f, "EXCEEDED"),
            ComplianceStatus::NoData => write!(f, "NO_DATA"),
        }
    }
}
