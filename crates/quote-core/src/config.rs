//! 報價成本設定模型
//!
//! 設定在啟動時由預設值建立，只能透過 [`CostSettings::apply_update`] 修改；
//! 計算核心只讀取完整的設定快照。

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sheet::SheetOption;
use crate::tier::{PriceTier, TierTable};
use crate::QuoteError;

/// 紙張設定（紙種 → 克重與紙價）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperProfile {
    /// 顯示名稱
    pub label: String,

    /// 克重
    pub gsm: Decimal,

    /// 紙價（每 500 張）
    pub price_per_500: Decimal,
}

impl PaperProfile {
    pub fn new(label: impl Into<String>, gsm: Decimal, price_per_500: Decimal) -> Self {
        Self {
            label: label.into(),
            gsm,
            price_per_500,
        }
    }
}

/// 成本設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSettings {
    /// 可用平張目錄
    pub sheet_catalog: Vec<SheetOption>,

    /// 紙張設定（依代碼）
    pub paper_profiles: BTreeMap<String, PaperProfile>,

    /// 印刷費級距（依總印張數）
    pub printing: TierTable,

    /// 雙面印刷倍率
    pub double_sided_multiplier: Decimal,

    /// 固定加放張數（損耗、調機）
    pub safety_sheets: u64,

    /// 覆膜每千份費率
    pub lamination_per_thousand: Decimal,

    /// 壓線每千份費率
    pub creasing_per_thousand: Decimal,

    /// 裁切每千份費率
    pub cutting_per_thousand: Decimal,

    /// 包裝每千份費率
    pub packaging_per_thousand: Decimal,

    /// 擊凸每份單價
    pub embossing_per_unit: Decimal,

    /// 上光面積除數（紙張面積 ÷ 除數 = 每張上光費）
    pub varnish_divisor: Decimal,

    /// 局部 UV 級距（依總印張數）
    pub spot_uv: TierTable,

    /// 燙金級距（依成品數量）
    pub foiling: TierTable,

    /// 報價加成倍率
    pub markup_multiplier: Decimal,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            sheet_catalog: default_sheet_catalog(),
            paper_profiles: default_paper_profiles(),
            printing: TierTable::new(
                vec![
                    PriceTier::new(1000, dec!(3000)),
                    PriceTier::new(2000, dec!(3500)),
                    PriceTier::new(3000, dec!(4000)),
                    PriceTier::new(5000, dec!(5500)),
                ],
                dec!(1.25),
            ),
            double_sided_multiplier: dec!(1.8),
            safety_sheets: 150,
            lamination_per_thousand: dec!(1500),
            creasing_per_thousand: dec!(300),
            cutting_per_thousand: dec!(250),
            packaging_per_thousand: dec!(200),
            embossing_per_unit: dec!(0.75),
            varnish_divisor: dec!(1500),
            spot_uv: TierTable::threshold(1000, dec!(2500), dec!(2.5)),
            foiling: TierTable::threshold(1000, dec!(5000), dec!(5)),
            markup_multiplier: dec!(1.3),
        }
    }
}

/// 預設平張目錄（常用英吋規格，以公分儲存）
fn default_sheet_catalog() -> Vec<SheetOption> {
    [
        ("18x23", dec!(18), dec!(23)),
        ("19x25", dec!(19), dec!(25)),
        ("20x30", dec!(20), dec!(30)),
        ("23x36", dec!(23), dec!(36)),
        ("25x36", dec!(25), dec!(36)),
        ("28x40", dec!(28), dec!(40)),
    ]
    .into_iter()
    .map(|(id, w, h)| SheetOption::from_inches(id, format!("{} × {} in", w, h), w, h))
    .collect()
}

fn default_paper_profiles() -> BTreeMap<String, PaperProfile> {
    [
        ("maplitho-80", PaperProfile::new("Maplitho 80 gsm", dec!(80), dec!(9))),
        ("art-paper-130", PaperProfile::new("Art Paper 130 gsm", dec!(130), dec!(10))),
        ("art-paper-170", PaperProfile::new("Art Paper 170 gsm", dec!(170), dec!(10.5))),
        ("art-card-300", PaperProfile::new("Art Card 300 gsm", dec!(300), dec!(11))),
        ("art-card-350", PaperProfile::new("Art Card 350 gsm", dec!(350), dec!(11.5))),
        ("kraft-120", PaperProfile::new("Kraft 120 gsm", dec!(120), dec!(8))),
    ]
    .into_iter()
    .map(|(id, profile)| (id.to_string(), profile))
    .collect()
}

impl CostSettings {
    /// 建構器模式：設置紙張目錄
    pub fn with_sheet_catalog(mut self, catalog: Vec<SheetOption>) -> Self {
        self.sheet_catalog = catalog;
        self
    }

    /// 建構器模式：新增紙張設定
    pub fn with_paper_profile(mut self, id: impl Into<String>, profile: PaperProfile) -> Self {
        self.paper_profiles.insert(id.into(), profile);
        self
    }

    /// 建構器模式：設置印刷費級距
    pub fn with_printing(mut self, printing: TierTable) -> Self {
        self.printing = printing;
        self
    }

    /// 建構器模式：設置雙面倍率
    pub fn with_double_sided_multiplier(mut self, multiplier: Decimal) -> Self {
        self.double_sided_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置加放張數
    pub fn with_safety_sheets(mut self, sheets: u64) -> Self {
        self.safety_sheets = sheets;
        self
    }

    /// 建構器模式：設置局部 UV 級距
    pub fn with_spot_uv(mut self, spot_uv: TierTable) -> Self {
        self.spot_uv = spot_uv;
        self
    }

    /// 建構器模式：設置燙金級距
    pub fn with_foiling(mut self, foiling: TierTable) -> Self {
        self.foiling = foiling;
        self
    }

    /// 建構器模式：設置加成倍率
    pub fn with_markup_multiplier(mut self, multiplier: Decimal) -> Self {
        self.markup_multiplier = multiplier;
        self
    }

    /// 依代碼查找紙張
    pub fn sheet(&self, sheet_id: &str) -> Option<&SheetOption> {
        self.sheet_catalog.iter().find(|s| s.id == sheet_id)
    }

    /// 依代碼查找紙張設定
    pub fn paper_profile(&self, profile_id: &str) -> crate::Result<&PaperProfile> {
        self.paper_profiles
            .get(profile_id)
            .ok_or_else(|| QuoteError::PaperProfileNotFound(profile_id.to_string()))
    }

    /// 驗證設定
    pub fn validate(&self) -> crate::Result<()> {
        if self.sheet_catalog.is_empty() {
            return Err(QuoteError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheet_catalog {
            if !seen.insert(sheet.id.as_str()) {
                return Err(QuoteError::DuplicateSheetId(sheet.id.clone()));
            }
            if sheet.width <= Decimal::ZERO || sheet.height <= Decimal::ZERO {
                return Err(QuoteError::InvalidSettings(format!(
                    "紙張 {} 尺寸必須為正數",
                    sheet.id
                )));
            }
        }

        for (id, profile) in &self.paper_profiles {
            if profile.gsm <= Decimal::ZERO || profile.price_per_500 < Decimal::ZERO {
                return Err(QuoteError::InvalidSettings(format!("紙張設定 {} 數值無效", id)));
            }
        }

        self.printing.validate("printing")?;
        self.spot_uv.validate("spotUv")?;
        self.foiling.validate("foiling")?;

        if self.double_sided_multiplier <= Decimal::ZERO {
            return Err(QuoteError::InvalidSettings("雙面倍率必須大於 0".to_string()));
        }
        if self.markup_multiplier <= Decimal::ZERO {
            return Err(QuoteError::InvalidSettings("加成倍率必須大於 0".to_string()));
        }
        if self.varnish_divisor <= Decimal::ZERO {
            return Err(QuoteError::InvalidSettings("上光除數必須大於 0".to_string()));
        }

        let rates = [
            ("lamination", self.lamination_per_thousand),
            ("creasing", self.creasing_per_thousand),
            ("cutting", self.cutting_per_thousand),
            ("packaging", self.packaging_per_thousand),
            ("embossing", self.embossing_per_unit),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, rate)| *rate < Decimal::ZERO) {
            return Err(QuoteError::InvalidSettings(format!("{} 費率不可為負", name)));
        }

        Ok(())
    }

    /// 套用設定更新
    ///
    /// 先在副本上套用並驗證，通過後才替換；驗證失敗時原設定不變。
    pub fn apply_update(&mut self, update: SettingsUpdate) -> crate::Result<()> {
        let mut next = self.clone();
        update.apply_to(&mut next);
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// 從 JSON 載入設定（載入後驗證）
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let settings: CostSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// 輸出為 JSON
    pub fn to_json_string(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 設定更新（僅套用有值的欄位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    /// 新增或覆寫紙張（依代碼）
    pub upsert_sheets: Vec<SheetOption>,

    /// 移除紙張
    pub remove_sheet_ids: Vec<String>,

    /// 新增或覆寫紙張設定
    pub upsert_paper_profiles: BTreeMap<String, PaperProfile>,

    /// 新增或覆寫印刷級距
    pub upsert_printing_tiers: Vec<PriceTier>,

    pub printing_above_max_rate: Option<Decimal>,
    pub double_sided_multiplier: Option<Decimal>,
    pub safety_sheets: Option<u64>,
    pub lamination_per_thousand: Option<Decimal>,
    pub creasing_per_thousand: Option<Decimal>,
    pub cutting_per_thousand: Option<Decimal>,
    pub packaging_per_thousand: Option<Decimal>,
    pub embossing_per_unit: Option<Decimal>,
    pub varnish_divisor: Option<Decimal>,
    pub spot_uv: Option<TierTable>,
    pub foiling: Option<TierTable>,
    pub markup_multiplier: Option<Decimal>,
}

impl SettingsUpdate {
    /// 創建空的更新
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：新增或覆寫紙張
    pub fn upsert_sheet(mut self, sheet: SheetOption) -> Self {
        self.upsert_sheets.push(sheet);
        self
    }

    /// 建構器模式：移除紙張
    pub fn remove_sheet(mut self, sheet_id: impl Into<String>) -> Self {
        self.remove_sheet_ids.push(sheet_id.into());
        self
    }

    /// 建構器模式：新增或覆寫印刷級距
    pub fn upsert_printing_tier(mut self, tier: PriceTier) -> Self {
        self.upsert_printing_tiers.push(tier);
        self
    }

    /// 建構器模式：設置加放張數
    pub fn with_safety_sheets(mut self, sheets: u64) -> Self {
        self.safety_sheets = Some(sheets);
        self
    }

    /// 建構器模式：設置加成倍率
    pub fn with_markup_multiplier(mut self, multiplier: Decimal) -> Self {
        self.markup_multiplier = Some(multiplier);
        self
    }

    /// 建構器模式：設置雙面倍率
    pub fn with_double_sided_multiplier(mut self, multiplier: Decimal) -> Self {
        self.double_sided_multiplier = Some(multiplier);
        self
    }

    /// 建構器模式：設置上光除數
    pub fn with_varnish_divisor(mut self, divisor: Decimal) -> Self {
        self.varnish_divisor = Some(divisor);
        self
    }

    /// 是否沒有任何變更
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(self, settings: &mut CostSettings) {
        settings
            .sheet_catalog
            .retain(|s| !self.remove_sheet_ids.contains(&s.id));

        for sheet in self.upsert_sheets {
            match settings.sheet_catalog.iter_mut().find(|s| s.id == sheet.id) {
                Some(existing) => *existing = sheet,
                None => settings.sheet_catalog.push(sheet),
            }
        }

        settings.paper_profiles.extend(self.upsert_paper_profiles);

        for tier in self.upsert_printing_tiers {
            settings.printing.upsert_tier(tier);
        }
        if let Some(rate) = self.printing_above_max_rate {
            settings.printing.set_above_max_rate(rate);
        }

        if let Some(v) = self.double_sided_multiplier {
            settings.double_sided_multiplier = v;
        }
        if let Some(v) = self.safety_sheets {
            settings.safety_sheets = v;
        }
        if let Some(v) = self.lamination_per_thousand {
            settings.lamination_per_thousand = v;
        }
        if let Some(v) = self.creasing_per_thousand {
            settings.creasing_per_thousand = v;
        }
        if let Some(v) = self.cutting_per_thousand {
            settings.cutting_per_thousand = v;
        }
        if let Some(v) = self.packaging_per_thousand {
            settings.packaging_per_thousand = v;
        }
        if let Some(v) = self.embossing_per_unit {
            settings.embossing_per_unit = v;
        }
        if let Some(v) = self.varnish_divisor {
            settings.varnish_divisor = v;
        }
        if let Some(v) = self.spot_uv {
            settings.spot_uv = v;
        }
        if let Some(v) = self.foiling {
            settings.foiling = v;
        }
        if let Some(v) = self.markup_multiplier {
            settings.markup_multiplier = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = CostSettings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.sheet_catalog.len(), 6);
        assert_eq!(settings.safety_sheets, 150);
        assert_eq!(settings.printing.price_for(300), dec!(3000));

        let sheet = settings.sheet("20x30").unwrap();
        assert_eq!(sheet.width, dec!(50.8));
        assert_eq!(sheet.height, dec!(76.2));
    }

    #[test]
    fn test_settings_builder() {
        let settings = CostSettings::default()
            .with_safety_sheets(50)
            .with_markup_multiplier(dec!(1.5))
            .with_double_sided_multiplier(dec!(2))
            .with_paper_profile("bond-90", PaperProfile::new("Bond 90 gsm", dec!(90), dec!(9.5)));

        assert_eq!(settings.safety_sheets, 50);
        assert_eq!(settings.markup_multiplier, dec!(1.5));
        assert_eq!(settings.double_sided_multiplier, dec!(2));
        assert_eq!(settings.paper_profile("bond-90").unwrap().gsm, dec!(90));
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let settings = CostSettings::default().with_sheet_catalog(Vec::new());
        assert!(matches!(settings.validate(), Err(QuoteError::EmptyCatalog)));
    }

    #[test]
    fn test_validate_rejects_duplicate_sheet() {
        let mut catalog = CostSettings::default().sheet_catalog;
        catalog.push(catalog[0].clone());
        let settings = CostSettings::default().with_sheet_catalog(catalog);

        match settings.validate() {
            Err(QuoteError::DuplicateSheetId(id)) => assert_eq!(id, "18x23"),
            other => panic!("預期紙張代碼重複，實際: {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_multipliers() {
        assert!(CostSettings::default()
            .with_markup_multiplier(Decimal::ZERO)
            .validate()
            .is_err());
        assert!(CostSettings::default()
            .with_double_sided_multiplier(dec!(-1))
            .validate()
            .is_err());

        let mut settings = CostSettings::default();
        settings.varnish_divisor = Decimal::ZERO;
        assert!(settings.validate().is_err());

        let mut settings = CostSettings::default();
        settings.cutting_per_thousand = dec!(-10);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_apply_update() {
        let mut settings = CostSettings::default();

        let update = SettingsUpdate::new()
            .remove_sheet("28x40")
            .upsert_sheet(SheetOption::new("a1", "A1", dec!(59.4), dec!(84.1)))
            .upsert_printing_tier(PriceTier::new(1000, dec!(2800)))
            .with_safety_sheets(100)
            .with_markup_multiplier(dec!(1.25));

        settings.apply_update(update).unwrap();

        assert!(settings.sheet("28x40").is_none());
        assert!(settings.sheet("a1").is_some());
        assert_eq!(settings.sheet_catalog.len(), 6);
        assert_eq!(settings.printing.price_for(500), dec!(2800));
        assert_eq!(settings.safety_sheets, 100);
        assert_eq!(settings.markup_multiplier, dec!(1.25));
    }

    #[test]
    fn test_rejected_update_leaves_settings_untouched() {
        let mut settings = CostSettings::default();
        let before = settings.clone();

        let result = settings.apply_update(
            SettingsUpdate::new()
                .with_safety_sheets(10)
                .with_varnish_divisor(Decimal::ZERO),
        );

        assert!(result.is_err());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_update_replaces_existing_sheet() {
        let mut settings = CostSettings::default();
        settings
            .apply_update(SettingsUpdate::new().upsert_sheet(SheetOption::new(
                "20x30",
                "20 × 30 in (trimmed)",
                dec!(50),
                dec!(75),
            )))
            .unwrap();

        let sheet = settings.sheet("20x30").unwrap();
        assert_eq!(sheet.width, dec!(50));
        assert_eq!(settings.sheet_catalog.len(), 6);
    }

    #[test]
    fn test_empty_update() {
        assert!(SettingsUpdate::new().is_empty());
        assert!(!SettingsUpdate::new().with_safety_sheets(1).is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_tier_order() {
        let settings = CostSettings::default();
        let json = settings.to_json_string().unwrap();
        let loaded = CostSettings::from_json_str(&json).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let mut settings = CostSettings::default();
        settings.markup_multiplier = Decimal::ZERO;
        let json = serde_json::to_string(&settings).unwrap();

        assert!(CostSettings::from_json_str(&json).is_err());
        assert!(matches!(
            CostSettings::from_json_str("{not json"),
            Err(QuoteError::Serialization(_))
        ));
    }
}
