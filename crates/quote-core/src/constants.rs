//! 固定的領域常數（不可經由設定修改）

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 克重換算單價的除數（面積 cm² × gsm ÷ 3100 = 令重換算係數）
pub const GSM_WEIGHT_DIVISOR: Decimal = dec!(3100);

/// 紙價報價基準張數（每 500 張）
pub const PAPER_PRICE_BASIS_SHEETS: Decimal = dec!(500);

/// 千份計價基準
pub const PER_THOUSAND: Decimal = dec!(1000);

/// 信封加工每千份費率
pub const ENVELOPE_RATE_PER_THOUSAND: Decimal = dec!(800);

/// 信封加工最低收費
pub const ENVELOPE_MINIMUM_CHARGE: Decimal = dec!(750);

/// 每英吋公分數
pub const CM_PER_INCH: Decimal = dec!(2.54);

/// 每公分毫米數
pub const MM_PER_CM: Decimal = dec!(10);
