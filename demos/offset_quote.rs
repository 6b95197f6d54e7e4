//! 平張印刷報價示例
//!
//! 執行：`RUST_LOG=debug cargo run --example offset_quote`

use chrono::Local;
use print_quote::{
    FinishingOptions, LengthUnit, OffsetCalculator, PrintingSide, ProductFootprint, ProductKind,
    QuoteInput,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 平張印刷報價示例 ===\n");

    let calculator = OffsetCalculator::with_defaults();

    // 5.5 × 8.5 in 傳單，1500 份，300 gsm 銅版卡，雙面，覆膜 + 裁切
    let input = QuoteInput::new(
        ProductFootprint::new(Decimal::new(55, 1), Decimal::new(85, 1), LengthUnit::Inch),
        1500,
        Decimal::ZERO,
        Decimal::ZERO,
    )
    .with_paper_profile(calculator.settings(), "art-card-300")?
    .with_printing_side(PrintingSide::Both)
    .with_finishing(FinishingOptions {
        lamination: true,
        cutting: true,
        ..Default::default()
    });

    println!("紙張評估:");
    let result = calculator.calculate(&input);
    for eval in &result.evaluations {
        println!(
            "  - {:<14} 正向 {:>3}  旋轉 {:>3}  最佳 {:>3} ({:?})",
            eval.sheet.label, eval.ups_standard, eval.ups_rotated, eval.best_ups, eval.best_orientation
        );
    }

    let quotation = calculator.quote(
        &input,
        ProductKind::Brochure,
        "Half-letter flyer, 300 gsm art card".to_string(),
        Local::now().date_naive(),
    );
    let result = &quotation.result;

    if !quotation.is_issuable() {
        for warning in &result.warnings {
            println!("警告: {}", warning.message);
        }
        return Ok(());
    }

    if let Some(selected) = &result.selected {
        println!("\n選用紙張: {} ({} 拼)", selected.sheet.label, result.ups);
    }
    println!(
        "印張數: {}，多出 {} 個 ({}%)",
        result.plan.total_sheets,
        result.plan.wastage_pieces,
        (result.plan.wastage_percent * Decimal::ONE_HUNDRED).round_dp(1)
    );

    println!("\n成本明細:");
    for (category, amount) in result.costs.lines() {
        println!("  - {:<20} {:>12}", category.label(), amount.round_dp(2));
    }
    println!("  小計 {:>28}", result.subtotal.round_dp(2));
    println!("  總價（含加成） {:>20}", result.total_with_markup.round_dp(2));
    println!("  單價 {:>28}", result.per_unit_price.round_dp(4));
    println!("\n報價單 {}，有效至 {}", quotation.id, quotation.valid_until(15));

    Ok(())
}
