//! 成本設定更新示例：從 JSON 載入、修改、比較報價

use print_quote::model::{PriceTier, SheetOption};
use print_quote::{CostSettings, OffsetCalculator, ProductFootprint, QuoteInput, SettingsUpdate};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 成本設定更新示例 ===\n");

    // 主程式可從任何來源取得設定，這裡用預設值的 JSON
    let json = CostSettings::default().to_json_string()?;
    let mut calculator = OffsetCalculator::new(CostSettings::from_json_str(&json)?);

    let input = QuoteInput::new(
        ProductFootprint::from_cm(Decimal::from(9), Decimal::new(55, 1)),
        5000,
        Decimal::from(350),
        Decimal::new(115, 1),
    );

    let before = calculator.calculate(&input);
    println!("更新前總價: {}", before.total_with_markup.round_dp(2));

    calculator.update_settings(
        SettingsUpdate::new()
            .upsert_sheet(SheetOption::new("sra3", "SRA3", Decimal::from(32), Decimal::from(45)))
            .upsert_printing_tier(PriceTier::new(1000, Decimal::from(2500)))
            .with_safety_sheets(75),
    )?;

    let after = calculator.calculate(&input);
    println!("更新後總價: {}", after.total_with_markup.round_dp(2));
    if let Some(selected) = &after.selected {
        println!("選用紙張: {} ({} 拼)", selected.sheet.label, after.ups);
    }

    // 無效的更新會被拒絕，設定保持不變
    if let Err(err) = calculator.update_settings(SettingsUpdate::new().with_markup_multiplier(Decimal::ZERO)) {
        println!("拒絕更新: {}", err);
    }

    Ok(())
}
