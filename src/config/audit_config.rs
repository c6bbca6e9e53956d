// ==========================================
// 碳足迹审计系统 - 行业审计配置
// ==========================================
// 职责: 加载行业排放因子、碳配额、能源倍率表
// 存储: JSON 文档（sectors + energy_source_multipliers）
// 红线: 单次审计期间只读
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::emission::SectorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// 默认配置文件路径（相对工作目录）
pub const DEFAULT_CONFIG_PATH: &str = "config/sectors.json";

/// 行业缺失配置时使用的兜底配额（kg CO₂）
pub const DEFAULT_CARBON_CAP_KG: f64 = 1_000_000_000.0;

// 随程序发布的默认配置
const BUILTIN_CONFIG_JSON: &str = include_str!("../../config/sectors.json");

// ==========================================
// AuditConfig - 审计配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// 行业名 → 行业配置
    #[serde(default)]
    pub sectors: BTreeMap<String, SectorConfig>,

    /// 能源类型 → 倍率（与行业无关,全部审计器共享）
    #[serde(default)]
    pub energy_source_multipliers: BTreeMap<String, f64>,
}

impl AuditConfig {
    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(AuditConfig): 已校验的配置
    /// - Err: 文件读取失败 / JSON 格式错误 / 配额非法
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            sectors = config.sectors.len(),
            multipliers = config.energy_source_multipliers.len(),
            "行业配置加载完成"
        );
        Ok(config)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: AuditConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 随程序发布的默认配置
    pub fn builtin() -> ConfigResult<Self> {
        debug!("使用内置行业配置");
        Self::from_json_str(BUILTIN_CONFIG_JSON)
    }

    /// 加载配置: 文件存在则读文件,否则回退到内置配置
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "配置文件不存在,使用内置行业配置");
            Self::builtin()
        }
    }

    /// 校验碳配额 > 0
    pub fn validate(&self) -> ConfigResult<()> {
        for (sector, cfg) in &self.sectors {
            if cfg.carbon_cap_kg <= 0.0 {
                return Err(ConfigError::InvalidCap {
                    sector: sector.clone(),
                    value: cfg.carbon_cap_kg,
                });
            }
        }
        Ok(())
    }

    /// 按行业名查找配置
    pub fn sector(&self, name: &str) -> Option<&SectorConfig> {
        self.sectors.get(name)
    }

    /// 行业配额表（写入 audit_result.json）
    pub fn sector_caps(&self) -> BTreeMap<String, f64> {
        self.sectors
            .iter()
            .map(|(name, cfg)| (name.clone(), cfg.carbon_cap_kg))
            .collect()
    }
}
