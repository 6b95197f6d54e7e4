//! # Print Quote
//!
//! 印刷報價引擎：資料模型（`quote-core`）與計算引擎（`quote-calc`）的統一入口

pub use quote_calc as engine;
pub use quote_core as model;

pub use rust_decimal::Decimal;

pub use quote_calc::{calculate, OffsetCalculator};
pub use quote_core::{
    CalculationResult, CostBreakdown, CostCategory, CostSettings, FinishingOptions, LengthUnit,
    Orientation, PrintingSide, ProductFootprint, ProductKind, QuoteError, QuoteInput, Quotation,
    SelectionMode, SettingsUpdate, SheetEvaluation, SheetOption,
};
