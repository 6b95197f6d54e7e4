//! 成本彙總
//!
//! 每項成本各自計算後相加，未開啟的後加工一律為 0。
//! 所有除法在分母為 0 時回傳 0，乘法溢位時也回傳 0，不讓計算中斷。

use quote_core::constants::{
    ENVELOPE_MINIMUM_CHARGE, ENVELOPE_RATE_PER_THOUSAND, GSM_WEIGHT_DIVISOR,
    PAPER_PRICE_BASIS_SHEETS, PER_THOUSAND,
};
use quote_core::{
    CalculationResult, CostBreakdown, CostSettings, PrintingSide, ProductionPlan, QuoteInput,
    SheetEvaluation, TierTable,
};
use rust_decimal::Decimal;

/// 成本彙總計算器
pub struct CostRollup;

impl CostRollup {
    /// 彙總成本並套用加成
    ///
    /// 未選到紙張或拼版數為 0 時回傳全零結果；`evaluations` 由呼叫端填入。
    pub fn rollup(
        selection: Option<&SheetEvaluation>,
        plan: ProductionPlan,
        input: &QuoteInput,
        settings: &CostSettings,
    ) -> CalculationResult {
        let Some(selected) = selection.filter(|s| s.fits()) else {
            return CalculationResult::no_fit(Vec::new());
        };

        let costs = Self::breakdown(selected, &plan, input, settings);
        let subtotal = costs.subtotal();
        let total_with_markup = safe_mul(subtotal, settings.markup_multiplier);
        let per_unit_price = safe_div(total_with_markup, Decimal::from(input.quantity));

        CalculationResult {
            selected: Some(selected.clone()),
            ups: selected.best_ups,
            plan,
            costs,
            subtotal,
            total_with_markup,
            per_unit_price,
            evaluations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// 計算各項成本
    pub fn breakdown(
        selected: &SheetEvaluation,
        plan: &ProductionPlan,
        input: &QuoteInput,
        settings: &CostSettings,
    ) -> CostBreakdown {
        let sheet_area = selected.area();
        let sheets = plan.total_sheets;
        let quantity = input.quantity;
        let finishing = &input.finishing;

        let sheet_unit_price = Self::sheet_unit_price(sheet_area, input.gsm, input.paper_price_per_500);

        let mut costs = CostBreakdown {
            sheet_unit_price,
            paper: safe_mul(sheet_unit_price, Decimal::from(sheets)),
            printing: Self::printing_cost(
                sheets,
                input.printing_side,
                &settings.printing,
                settings.double_sided_multiplier,
            ),
            ..CostBreakdown::zero()
        };

        if finishing.lamination {
            costs.lamination = Self::per_thousand(settings.lamination_per_thousand, quantity);
        }
        if finishing.varnish {
            costs.varnish = Self::varnish_cost(sheet_area, settings.varnish_divisor, sheets);
        }
        if finishing.spot_uv {
            costs.spot_uv = settings.spot_uv.price_for(sheets);
        }
        if finishing.foiling {
            costs.foiling = settings.foiling.price_for(quantity);
        }
        if finishing.embossing {
            costs.embossing = safe_mul(settings.embossing_per_unit, Decimal::from(quantity));
        }
        if finishing.creasing {
            costs.creasing = Self::per_thousand(settings.creasing_per_thousand, quantity);
        }
        if finishing.cutting {
            costs.cutting = Self::per_thousand(settings.cutting_per_thousand, quantity);
        }
        if finishing.packaging {
            costs.packaging = Self::per_thousand(settings.packaging_per_thousand, quantity);
        }
        if finishing.envelope {
            costs.envelope = Self::envelope_cost(quantity);
        }

        costs
    }

    /// 每張紙單價：面積 × 克重 ÷ 3100 × (每 500 張紙價 ÷ 500)
    pub fn sheet_unit_price(sheet_area: Decimal, gsm: Decimal, price_per_500: Decimal) -> Decimal {
        safe_mul(
            safe_div(safe_mul(sheet_area, gsm), GSM_WEIGHT_DIVISOR),
            safe_div(price_per_500, PAPER_PRICE_BASIS_SHEETS),
        )
    }

    /// 印刷費：級距查價，雙面再乘倍率
    pub fn printing_cost(
        total_sheets: u64,
        side: PrintingSide,
        table: &TierTable,
        double_sided_multiplier: Decimal,
    ) -> Decimal {
        let base = table.price_for(total_sheets);
        if side.is_double_sided() {
            safe_mul(base, double_sided_multiplier)
        } else {
            base
        }
    }

    /// 上光：(紙張面積 ÷ 除數) × 印張數（先乘後除）
    pub fn varnish_cost(sheet_area: Decimal, divisor: Decimal, total_sheets: u64) -> Decimal {
        safe_div(safe_mul(sheet_area, Decimal::from(total_sheets)), divisor)
    }

    /// 千份費率 × 數量
    pub fn per_thousand(rate_per_thousand: Decimal, quantity: u64) -> Decimal {
        safe_mul(safe_div(rate_per_thousand, PER_THOUSAND), Decimal::from(quantity))
    }

    /// 信封加工：max(800/1000 × 數量, 750)
    pub fn envelope_cost(quantity: u64) -> Decimal {
        Self::per_thousand(ENVELOPE_RATE_PER_THOUSAND, quantity).max(ENVELOPE_MINIMUM_CHARGE)
    }
}

fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

fn safe_mul(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_mul(rhs).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::{FinishingOptions, PriceTier, ProductFootprint, SheetOption};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sheet_eval(ups: u64) -> SheetEvaluation {
        // 面積 1550 cm²，200 gsm 時 1550 × 200 ÷ 3100 = 100
        SheetEvaluation::new(SheetOption::new("test", "31 × 50 cm", dec!(31), dec!(50)), ups, 0)
    }

    fn input(quantity: u64) -> QuoteInput {
        QuoteInput::new(ProductFootprint::from_cm(dec!(10), dec!(10)), quantity, dec!(200), dec!(500))
    }

    fn settings() -> CostSettings {
        CostSettings::default().with_printing(TierTable::new(
            vec![
                PriceTier::new(1000, dec!(3000)),
                PriceTier::new(2000, dec!(3500)),
                PriceTier::new(3000, dec!(4000)),
            ],
            dec!(1.25),
        ))
    }

    #[test]
    fn test_sheet_unit_price() {
        assert_eq!(CostRollup::sheet_unit_price(dec!(1550), dec!(200), dec!(500)), dec!(100));
        assert_eq!(CostRollup::sheet_unit_price(dec!(1550), dec!(200), dec!(250)), dec!(50));
        assert_eq!(CostRollup::sheet_unit_price(Decimal::ZERO, dec!(200), dec!(500)), Decimal::ZERO);
    }

    #[rstest]
    #[case(300, PrintingSide::Single, dec!(3000))]
    #[case(1000, PrintingSide::Single, dec!(3000))]
    #[case(1001, PrintingSide::Single, dec!(3500))]
    #[case(3000, PrintingSide::Single, dec!(4000))]
    #[case(3200, PrintingSide::Single, dec!(4000))]
    #[case(300, PrintingSide::Both, dec!(5400))]
    #[case(4000, PrintingSide::Both, dec!(9000))]
    fn test_printing_cost(#[case] sheets: u64, #[case] side: PrintingSide, #[case] expected: Decimal) {
        let settings = settings();
        let cost = CostRollup::printing_cost(sheets, side, &settings.printing, settings.double_sided_multiplier);

        assert_eq!(cost, expected);
    }

    #[rstest]
    #[case(1000, dec!(2500))]
    #[case(1001, dec!(2502.5))]
    fn test_spot_uv_step(#[case] sheets: u64, #[case] expected: Decimal) {
        assert_eq!(CostSettings::default().spot_uv.price_for(sheets), expected);
    }

    #[rstest]
    #[case(500, dec!(5000))]
    #[case(1000, dec!(5000))]
    #[case(2000, dec!(10000))]
    fn test_foiling_step(#[case] quantity: u64, #[case] expected: Decimal) {
        assert_eq!(CostSettings::default().foiling.price_for(quantity), expected);
    }

    #[rstest]
    #[case(0, dec!(750))]
    #[case(500, dec!(750))]
    #[case(937, dec!(750))]
    #[case(938, dec!(750.4))]
    #[case(2000, dec!(1600))]
    fn test_envelope_minimum(#[case] quantity: u64, #[case] expected: Decimal) {
        assert_eq!(CostRollup::envelope_cost(quantity), expected);
    }

    #[test]
    fn test_overflowing_terms_degrade_to_zero() {
        assert_eq!(CostRollup::sheet_unit_price(dec!(1550), Decimal::MAX, dec!(500)), Decimal::ZERO);
        assert_eq!(CostRollup::sheet_unit_price(Decimal::MAX, dec!(200), dec!(500)), Decimal::ZERO);
        assert_eq!(CostRollup::varnish_cost(Decimal::MAX, dec!(1500), 300), Decimal::ZERO);
        assert_eq!(CostRollup::per_thousand(Decimal::MAX, u64::MAX), Decimal::ZERO);
        assert_eq!(
            CostRollup::printing_cost(10, PrintingSide::Both, &TierTable::threshold(1000, Decimal::MAX, dec!(1)), dec!(2)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_rollup_with_max_inputs_does_not_panic() {
        let plan = ProductionPlan {
            total_sheets: 300,
            ..ProductionPlan::empty()
        };
        let selected = sheet_eval(10);
        let input = QuoteInput::new(ProductFootprint::from_cm(dec!(10), dec!(10)), 1000, Decimal::MAX, Decimal::MAX)
            .with_finishing(FinishingOptions::all());
        let settings = settings().with_markup_multiplier(Decimal::MAX);

        let result = CostRollup::rollup(Some(&selected), plan, &input, &settings);

        assert_eq!(result.costs.paper, Decimal::ZERO);
        assert_eq!(result.total_with_markup, Decimal::ZERO);
        assert_eq!(result.per_unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_varnish_zero_divisor_degrades_to_zero() {
        assert_eq!(CostRollup::varnish_cost(dec!(1550), Decimal::ZERO, 300), Decimal::ZERO);
        assert_eq!(CostRollup::varnish_cost(dec!(1500), dec!(1500), 300), dec!(300));
    }

    #[test]
    fn test_rollup_without_finishing() {
        let plan = ProductionPlan {
            total_sheets: 300,
            wastage_pieces: 1500,
            wastage_percent: dec!(1),
        };
        let selected = sheet_eval(10);
        let result = CostRollup::rollup(Some(&selected), plan, &input(1500), &settings());

        assert_eq!(result.ups, 10);
        assert_eq!(result.costs.sheet_unit_price, dec!(100));
        assert_eq!(result.costs.paper, dec!(30000));
        assert_eq!(result.costs.printing, dec!(3000));
        assert_eq!(result.costs.lamination, Decimal::ZERO);
        assert_eq!(result.subtotal, dec!(33000));
        assert_eq!(result.total_with_markup, dec!(42900));
        assert_eq!(result.per_unit_price, dec!(28.6));
    }

    #[test]
    fn test_rollup_all_finishing() {
        let plan = ProductionPlan {
            total_sheets: 300,
            wastage_pieces: 1500,
            wastage_percent: dec!(1),
        };
        let selected = sheet_eval(10);
        let input = input(1500).with_finishing(FinishingOptions::all());
        let settings = settings().with_markup_multiplier(Decimal::ONE);

        let costs = CostRollup::rollup(Some(&selected), plan, &input, &settings).costs;

        assert_eq!(costs.lamination, dec!(2250));
        assert_eq!(costs.varnish, dec!(310));
        assert_eq!(costs.spot_uv, dec!(2500));
        assert_eq!(costs.foiling, dec!(7500));
        assert_eq!(costs.embossing, dec!(1125));
        assert_eq!(costs.creasing, dec!(450));
        assert_eq!(costs.cutting, dec!(375));
        assert_eq!(costs.packaging, dec!(300));
        assert_eq!(costs.envelope, dec!(1200));
        assert_eq!(costs.lines().len(), 11);
    }

    #[test]
    fn test_toggles_are_independent() {
        let plan = ProductionPlan {
            total_sheets: 300,
            ..ProductionPlan::empty()
        };
        let selected = sheet_eval(10);
        let input = input(500).with_finishing(FinishingOptions {
            foiling: true,
            ..Default::default()
        });

        let costs = CostRollup::rollup(Some(&selected), plan, &input, &settings()).costs;

        assert_eq!(costs.foiling, dec!(5000));
        assert_eq!(costs.lamination, Decimal::ZERO);
        assert_eq!(costs.envelope, Decimal::ZERO);
        assert_eq!(costs.spot_uv, Decimal::ZERO);
    }

    #[test]
    fn test_rollup_no_selection_is_zero() {
        let input = input(1500).with_finishing(FinishingOptions::all());
        let result = CostRollup::rollup(None, ProductionPlan::empty(), &input, &settings());

        assert!(!result.is_viable());
        assert_eq!(result.subtotal, Decimal::ZERO);
        assert_eq!(result.per_unit_price, Decimal::ZERO);
    }

    #[test]
    fn test_rollup_zero_ups_is_zero() {
        let selected = sheet_eval(0);
        let result = CostRollup::rollup(Some(&selected), ProductionPlan::empty(), &input(1500), &settings());

        assert!(result.selected.is_none());
        assert_eq!(result.costs, CostBreakdown::zero());
        assert_eq!(result.total_with_markup, Decimal::ZERO);
    }

    #[test]
    fn test_rollup_zero_quantity_per_unit_is_zero() {
        let plan = ProductionPlan {
            total_sheets: 150,
            wastage_pieces: 1500,
            wastage_percent: Decimal::ZERO,
        };
        let selected = sheet_eval(10);
        let input = input(0).with_finishing(FinishingOptions::all());
        let result = CostRollup::rollup(Some(&selected), plan, &input, &settings());

        assert!(result.total_with_markup > Decimal::ZERO);
        assert_eq!(result.per_unit_price, Decimal::ZERO);
    }
}
