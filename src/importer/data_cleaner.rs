// ==========================================
// 碳足迹审计系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 行业 title-case / 能源类型同义词映射 / 月份钳制
// ==========================================

use crate::domain::types::{EnergySource, Sector};
use crate::importer::record_cleaner_trait::DataCleaner as DataCleanerTrait;

/// 能源类型同义词表（小写、已去空白）
///
/// 未命中的取值一律回退为 grid
const ENERGY_SOURCE_SYNONYMS: [(&str, EnergySource); 15] = [
    ("coal", EnergySource::Coal),
    ("gas", EnergySource::NaturalGas),
    ("natural gas", EnergySource::NaturalGas),
    ("nat_gas", EnergySource::NaturalGas),
    ("natural_gas", EnergySource::NaturalGas),
    ("grid", EnergySource::Grid),
    ("electrical grid", EnergySource::Grid),
    ("electricity", EnergySource::Grid),
    ("renewable", EnergySource::Renewable),
    ("solar", EnergySource::Renewable),
    ("wind", EnergySource::Renewable),
    ("hydro", EnergySource::Renewable),
    ("nuclear", EnergySource::Nuclear),
    ("nan", EnergySource::Grid),
    ("none", EnergySource::Grid),
];

const MIN_MONTH: f64 = 1.0;
const MAX_MONTH: f64 = 12.0;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_sector(&self, value: &str) -> Option<Sector> {
        Sector::parse(&self.title_case(&self.clean_text(value)))
    }

    fn normalize_energy_source(&self, value: &str) -> EnergySource {
        let key = value.trim().to_lowercase();
        ENERGY_SOURCE_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == key)
            .map(|(_, source)| *source)
            .unwrap_or_default()
    }

    fn clamp_month(&self, value: f64) -> u32 {
        value.trunc().clamp(MIN_MONTH, MAX_MONTH) as u32
    }
}

impl DataCleaner {
    /// 单词首字母大写,其余小写
    ///
    /// 单词边界: 任何非字母字符（"steel-making" → "Steel-Making"）
    pub fn title_case(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut prev_is_letter = false;

        for ch in value.chars() {
            if ch.is_alphabetic() {
                if prev_is_letter {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                prev_is_letter = true;
            } else {
                out.push(ch);
                prev_is_letter = false;
            }
        }

        out
    }
}
