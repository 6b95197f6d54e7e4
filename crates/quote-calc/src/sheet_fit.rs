//! 拼版數計算（每張紙可放幾個成品）

use quote_core::{ProductFootprint, SheetEvaluation, SheetOption};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 拼版評估器
pub struct SheetFitEvaluator;

impl SheetFitEvaluator {
    /// 評估單張紙的正向與旋轉拼版數
    ///
    /// 成品寬或高 <= 0 時兩個方向都回傳 0。
    pub fn evaluate(sheet: &SheetOption, product: &ProductFootprint) -> SheetEvaluation {
        if !product.is_valid() {
            return SheetEvaluation::new(sheet.clone(), 0, 0);
        }

        let ups_standard = Self::units_along(sheet.width, product.width)
            .saturating_mul(Self::units_along(sheet.height, product.height));

        let ups_rotated = Self::units_along(sheet.width, product.height)
            .saturating_mul(Self::units_along(sheet.height, product.width));

        SheetEvaluation::new(sheet.clone(), ups_standard, ups_rotated)
    }

    /// 評估整個紙張目錄（保持目錄順序）
    pub fn evaluate_catalog(catalog: &[SheetOption], product: &ProductFootprint) -> Vec<SheetEvaluation> {
        catalog
            .iter()
            .map(|sheet| Self::evaluate(sheet, product))
            .collect()
    }

    /// 單一方向可放的整數個數：floor(sheet / product)
    ///
    /// 負值或無法計算時為 0；超出 u64 時取 `u64::MAX`。
    fn units_along(sheet_len: Decimal, product_len: Decimal) -> u64 {
        if product_len <= Decimal::ZERO {
            return 0;
        }

        sheet_len
            .checked_div(product_len)
            .map(|q| q.floor())
            .filter(|q| q.is_sign_positive())
            .map(|q| q.to_u64().unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}
