//! 紙張與成品尺寸模型
//!
//! 所有幾何尺寸在邊界處統一換算為公分，計算公式內不再做單位轉換。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{CM_PER_INCH, MM_PER_CM};

/// 長度單位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthUnit {
    /// 公分（內部單位）
    #[default]
    Centimeter,
    /// 毫米
    Millimeter,
    /// 英吋
    Inch,
}

impl LengthUnit {
    /// 換算為公分
    pub fn to_centimeters(self, value: Decimal) -> Decimal {
        match self {
            LengthUnit::Centimeter => value,
            LengthUnit::Millimeter => value / MM_PER_CM,
            LengthUnit::Inch => value.checked_mul(CM_PER_INCH).unwrap_or(Decimal::ZERO),
        }
    }
}

/// 候選平張紙（目錄項目，執行期間不變）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOption {
    /// 紙張代碼
    pub id: String,

    /// 顯示名稱
    pub label: String,

    /// 寬（公分）
    pub width: Decimal,

    /// 高（公分）
    pub height: Decimal,
}

impl SheetOption {
    /// 創建新的紙張（公分）
    pub fn new(id: impl Into<String>, label: impl Into<String>, width: Decimal, height: Decimal) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width,
            height,
        }
    }

    /// 以英吋尺寸創建紙張
    pub fn from_inches(
        id: impl Into<String>,
        label: impl Into<String>,
        width_in: Decimal,
        height_in: Decimal,
    ) -> Self {
        Self::new(
            id,
            label,
            LengthUnit::Inch.to_centimeters(width_in),
            LengthUnit::Inch.to_centimeters(height_in),
        )
    }

    /// 紙張面積（cm²），溢位時為 0
    pub fn area(&self) -> Decimal {
        self.width.checked_mul(self.height).unwrap_or(Decimal::ZERO)
    }
}

/// 成品尺寸（展開尺寸）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFootprint {
    /// 寬（公分）
    pub width: Decimal,

    /// 高（公分）
    pub height: Decimal,
}

impl ProductFootprint {
    /// 創建成品尺寸，並換算為公分
    pub fn new(width: Decimal, height: Decimal, unit: LengthUnit) -> Self {
        Self {
            width: unit.to_centimeters(width),
            height: unit.to_centimeters(height),
        }
    }

    /// 以公分創建成品尺寸
    pub fn from_cm(width: Decimal, height: Decimal) -> Self {
        Self::new(width, height, LengthUnit::Centimeter)
    }

    /// 成品面積（cm²），溢位時為 0
    pub fn area(&self) -> Decimal {
        self.width.checked_mul(self.height).unwrap_or(Decimal::ZERO)
    }

    /// 寬高皆為正數才能排版
    pub fn is_valid(&self) -> bool {
        self.width > Decimal::ZERO && self.height > Decimal::ZERO
    }

    /// 旋轉 90 度
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}
