//! 報價輸入模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CostSettings;
use crate::sheet::ProductFootprint;

/// 印刷面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrintingSide {
    /// 單面
    #[default]
    Single,
    /// 雙面
    Both,
}

impl PrintingSide {
    pub fn is_double_sided(self) -> bool {
        self == PrintingSide::Both
    }
}

/// 選紙模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    /// 自動：取最大拼版數
    #[default]
    Auto,
    /// 手動：使用指定紙張
    Manual,
}

/// 後加工開關
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinishingOptions {
    /// 覆膜
    pub lamination: bool,
    /// 上光
    pub varnish: bool,
    /// 局部 UV
    pub spot_uv: bool,
    /// 燙金
    pub foiling: bool,
    /// 擊凸
    pub embossing: bool,
    /// 壓線
    pub creasing: bool,
    /// 裁切
    pub cutting: bool,
    /// 包裝
    pub packaging: bool,
    /// 信封加工
    pub envelope: bool,
}

impl FinishingOptions {
    /// 全部開啟
    pub fn all() -> Self {
        Self {
            lamination: true,
            varnish: true,
            spot_uv: true,
            foiling: true,
            embossing: true,
            creasing: true,
            cutting: true,
            packaging: true,
            envelope: true,
        }
    }

    /// 開啟的項目數
    pub fn enabled_count(&self) -> usize {
        [
            self.lamination,
            self.varnish,
            self.spot_uv,
            self.foiling,
            self.embossing,
            self.creasing,
            self.cutting,
            self.packaging,
            self.envelope,
        ]
        .iter()
        .filter(|on| **on)
        .count()
    }
}

/// 平張印刷報價輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    /// 成品展開尺寸（公分）
    pub product: ProductFootprint,

    /// 成品數量
    pub quantity: u64,

    /// 紙張克重
    pub gsm: Decimal,

    /// 紙價（每 500 張）
    pub paper_price_per_500: Decimal,

    /// 印刷面
    #[serde(default)]
    pub printing_side: PrintingSide,

    /// 後加工
    #[serde(default)]
    pub finishing: FinishingOptions,

    /// 選紙模式
    #[serde(default)]
    pub sheet_selection_mode: SelectionMode,

    /// 手動指定的紙張代碼
    #[serde(default)]
    pub selected_sheet_id: Option<String>,
}

impl QuoteInput {
    /// 創建新的報價輸入（單面、無後加工、自動選紙）
    pub fn new(product: ProductFootprint, quantity: u64, gsm: Decimal, paper_price_per_500: Decimal) -> Self {
        Self {
            product,
            quantity,
            gsm,
            paper_price_per_500,
            printing_side: PrintingSide::Single,
            finishing: FinishingOptions::default(),
            sheet_selection_mode: SelectionMode::Auto,
            selected_sheet_id: None,
        }
    }

    /// 建構器模式：設置印刷面
    pub fn with_printing_side(mut self, side: PrintingSide) -> Self {
        self.printing_side = side;
        self
    }

    /// 建構器模式：設置後加工
    pub fn with_finishing(mut self, finishing: FinishingOptions) -> Self {
        self.finishing = finishing;
        self
    }

    /// 建構器模式：手動指定紙張
    pub fn with_manual_sheet(mut self, sheet_id: impl Into<String>) -> Self {
        self.sheet_selection_mode = SelectionMode::Manual;
        self.selected_sheet_id = Some(sheet_id.into());
        self
    }

    /// 建構器模式：恢復自動選紙
    pub fn with_auto_sheet(mut self) -> Self {
        self.sheet_selection_mode = SelectionMode::Auto;
        self.selected_sheet_id = None;
        self
    }

    /// 建構器模式：以紙張設定填入克重與紙價
    pub fn with_paper_profile(mut self, settings: &CostSettings, profile_id: &str) -> crate::Result<Self> {
        let profile = settings.paper_profile(profile_id)?;
        self.gsm = profile.gsm;
        self.paper_price_per_500 = profile.price_per_500;
        Ok(self)
    }

    /// 手動模式下的指定紙張代碼
    pub fn manual_sheet_id(&self) -> Option<&str> {
        match self.sheet_selection_mode {
            SelectionMode::Manual => self.selected_sheet_id.as_deref(),
            SelectionMode::Auto => None,
        }
    }
}
