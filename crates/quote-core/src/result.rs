//! 報價計算結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sheet::SheetOption;

/// 拼版方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// 成品軸向與紙張一致
    Standard,
    /// 成品旋轉 90 度
    Rotated,
    /// 無法拼版
    None,
}

/// 單張紙的拼版評估
///
/// 不變式：`best_ups >= ups_standard`、`best_ups >= ups_rotated`；
/// `best_orientation == None` 若且唯若 `best_ups == 0`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetEvaluation {
    /// 評估的紙張
    pub sheet: SheetOption,

    /// 正向拼版數
    pub ups_standard: u64,

    /// 旋轉拼版數
    pub ups_rotated: u64,

    /// 最佳拼版數
    pub best_ups: u64,

    /// 最佳方向
    pub best_orientation: Orientation,
}

impl SheetEvaluation {
    /// 由兩個方向的拼版數建立評估；相等時取正向
    pub fn new(sheet: SheetOption, ups_standard: u64, ups_rotated: u64) -> Self {
        let (best_ups, best_orientation) = if ups_rotated > ups_standard {
            (ups_rotated, Orientation::Rotated)
        } else if ups_standard > 0 {
            (ups_standard, Orientation::Standard)
        } else {
            (0, Orientation::None)
        };

        Self {
            sheet,
            ups_standard,
            ups_rotated,
            best_ups,
            best_orientation,
        }
    }

    /// 紙張代碼
    pub fn sheet_id(&self) -> &str {
        &self.sheet.id
    }

    /// 紙張面積
    pub fn area(&self) -> Decimal {
        self.sheet.area()
    }

    /// 是否可拼版
    pub fn fits(&self) -> bool {
        self.best_ups > 0
    }
}

/// 生產數量規劃
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlan {
    /// 總印張數（含加放）
    pub total_sheets: u64,

    /// 多出的成品數
    pub wastage_pieces: u64,

    /// 損耗比例（1.0 表示 100%）
    pub wastage_percent: Decimal,
}

impl ProductionPlan {
    /// 無法生產時的空規劃
    pub fn empty() -> Self {
        Self::default()
    }

    /// 實際產出成品數
    pub fn pieces_produced(&self, ups: u64) -> u64 {
        self.total_sheets.saturating_mul(ups)
    }
}

/// 成本類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostCategory {
    Paper,
    Printing,
    Lamination,
    Varnish,
    SpotUv,
    Foiling,
    Embossing,
    Creasing,
    Cutting,
    Packaging,
    Envelope,
}

impl CostCategory {
    /// 所有類別（報價單顯示順序）
    pub const ALL: [CostCategory; 11] = [
        CostCategory::Paper,
        CostCategory::Printing,
        CostCategory::Lamination,
        CostCategory::Varnish,
        CostCategory::SpotUv,
        CostCategory::Foiling,
        CostCategory::Embossing,
        CostCategory::Creasing,
        CostCategory::Cutting,
        CostCategory::Packaging,
        CostCategory::Envelope,
    ];

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Paper => "Paper",
            CostCategory::Printing => "Printing",
            CostCategory::Lamination => "Lamination",
            CostCategory::Varnish => "Varnish",
            CostCategory::SpotUv => "Spot UV",
            CostCategory::Foiling => "Foiling",
            CostCategory::Embossing => "Embossing",
            CostCategory::Creasing => "Creasing",
            CostCategory::Cutting => "Cutting",
            CostCategory::Packaging => "Packaging",
            CostCategory::Envelope => "Envelope Conversion",
        }
    }
}

/// 各項成本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// 每張紙單價（不計入小計）
    pub sheet_unit_price: Decimal,
    pub paper: Decimal,
    pub printing: Decimal,
    pub lamination: Decimal,
    pub varnish: Decimal,
    pub spot_uv: Decimal,
    pub foiling: Decimal,
    pub embossing: Decimal,
    pub creasing: Decimal,
    pub cutting: Decimal,
    pub packaging: Decimal,
    pub envelope: Decimal,
}

impl CostBreakdown {
    /// 全部為零
    pub fn zero() -> Self {
        Self::default()
    }

    /// 取得單項金額
    pub fn amount(&self, category: CostCategory) -> Decimal {
        match category {
            CostCategory::Paper => self.paper,
            CostCategory::Printing => self.printing,
            CostCategory::Lamination => self.lamination,
            CostCategory::Varnish => self.varnish,
            CostCategory::SpotUv => self.spot_uv,
            CostCategory::Foiling => self.foiling,
            CostCategory::Embossing => self.embossing,
            CostCategory::Creasing => self.creasing,
            CostCategory::Cutting => self.cutting,
            CostCategory::Packaging => self.packaging,
            CostCategory::Envelope => self.envelope,
        }
    }

    /// 小計（溢位時為 0）
    pub fn subtotal(&self) -> Decimal {
        CostCategory::ALL
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| acc.checked_add(self.amount(*c)))
            .unwrap_or(Decimal::ZERO)
    }

    /// 非零項目（固定順序，供報價單輸出）
    pub fn lines(&self) -> Vec<(CostCategory, Decimal)> {
        CostCategory::ALL
            .iter()
            .map(|c| (*c, self.amount(*c)))
            .filter(|(_, amount)| !amount.is_zero())
            .collect()
    }
}

/// 警告代碼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningCode {
    /// 沒有任何紙張可拼版
    NoViableSheet,
    /// 手動指定的紙張不存在，已改為自動選紙
    ManualSheetNotFound,
    /// 手動指定的紙張無法拼版
    ManualSheetNoFit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// 計算警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWarning {
    pub code: WarningCode,
    pub message: String,
    pub severity: WarningSeverity,
}

impl QuoteWarning {
    pub fn new(code: WarningCode, message: String, severity: WarningSeverity) -> Self {
        Self {
            code,
            message,
            severity,
        }
    }

    pub fn info(code: WarningCode, message: String) -> Self {
        Self::new(code, message, WarningSeverity::Info)
    }

    pub fn warning(code: WarningCode, message: String) -> Self {
        Self::new(code, message, WarningSeverity::Warning)
    }

    pub fn error(code: WarningCode, message: String) -> Self {
        Self::new(code, message, WarningSeverity::Error)
    }
}

/// 報價計算結果（對外唯一契約，供畫面與 PDF 匯出使用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// 選定的紙張評估（無法拼版時為 None）
    pub selected: Option<SheetEvaluation>,

    /// 拼版數
    pub ups: u64,

    /// 生產數量規劃
    pub plan: ProductionPlan,

    /// 各項成本
    pub costs: CostBreakdown,

    /// 小計
    pub subtotal: Decimal,

    /// 加成後總價
    pub total_with_markup: Decimal,

    /// 單價
    pub per_unit_price: Decimal,

    /// 全部紙張的評估（供選紙表格顯示）
    pub evaluations: Vec<SheetEvaluation>,

    /// 警告信息
    pub warnings: Vec<QuoteWarning>,
}

impl CalculationResult {
    /// 無法拼版時的結果
    pub fn no_fit(evaluations: Vec<SheetEvaluation>) -> Self {
        Self {
            selected: None,
            ups: 0,
            plan: ProductionPlan::empty(),
            costs: CostBreakdown::zero(),
            subtotal: Decimal::ZERO,
            total_with_markup: Decimal::ZERO,
            per_unit_price: Decimal::ZERO,
            evaluations,
            warnings: Vec::new(),
        }
    }

    /// 是否有可用的拼版
    pub fn is_viable(&self) -> bool {
        self.ups > 0
    }

    /// 選定方向
    pub fn orientation(&self) -> Orientation {
        self.selected
            .as_ref()
            .map(|s| s.best_orientation)
            .unwrap_or(Orientation::None)
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: QuoteWarning) {
        self.warnings.push(warning);
    }

    /// 是否含有指定警告
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}
