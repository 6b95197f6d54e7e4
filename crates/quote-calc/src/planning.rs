//! 生產數量規劃（印張數與損耗）

use quote_core::ProductionPlan;
use rust_decimal::Decimal;

/// 生產數量規劃器
pub struct ProductionPlanner;

impl ProductionPlanner {
    /// 計算總印張數與損耗
    ///
    /// # 參數
    /// * `target_quantity` - 成品目標數量
    /// * `ups` - 每張紙拼版數；為 0 時無法生產，回傳全零規劃
    /// * `safety_sheets` - 固定加放張數（非百分比）
    pub fn plan(target_quantity: u64, ups: u64, safety_sheets: u64) -> ProductionPlan {
        if ups == 0 {
            return ProductionPlan::empty();
        }

        let total_sheets = target_quantity.div_ceil(ups).saturating_add(safety_sheets);
        let produced = total_sheets.saturating_mul(ups);
        let wastage_pieces = produced.saturating_sub(target_quantity);

        let wastage_percent = if target_quantity > 0 {
            Decimal::from(produced)
                .checked_div(Decimal::from(target_quantity))
                .map(|ratio| ratio - Decimal::ONE)
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        ProductionPlan {
            total_sheets,
            wastage_pieces,
            wastage_percent,
        }
    }
}
