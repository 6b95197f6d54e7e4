//! # Quote Calculation Engine
//!
//! 平張印刷報價計算引擎

pub mod calculator;
pub mod costing;
pub mod planning;
pub mod selection;
pub mod sheet_fit;

// Re-export 主要類型
pub use calculator::{calculate, OffsetCalculator};
pub use costing::CostRollup;
pub use planning::ProductionPlanner;
pub use selection::SheetSelector;
pub use sheet_fit::SheetFitEvaluator;
