//! # Quote Core
//!
//! 印刷報價核心資料模型與類型定義

pub mod config;
pub mod constants;
pub mod input;
pub mod quotation;
pub mod result;
pub mod sheet;
pub mod tier;

// Re-export 主要類型
pub use config::{CostSettings, PaperProfile, SettingsUpdate};
pub use input::{FinishingOptions, PrintingSide, QuoteInput, SelectionMode};
pub use quotation::{ProductKind, Quotation};
pub use result::{
    CalculationResult, CostBreakdown, CostCategory, Orientation, ProductionPlan, QuoteWarning,
    SheetEvaluation, WarningCode, WarningSeverity,
};
pub use sheet::{LengthUnit, ProductFootprint, SheetOption};
pub use tier::{PriceTier, TierTable};

/// 報價錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("找不到紙張設定: {0}")]
    PaperProfileNotFound(String),

    #[error("紙張目錄為空")]
    EmptyCatalog,

    #[error("紙張尺寸代碼重複: {0}")]
    DuplicateSheetId(String),

    #[error("級距數量重複: {table} @ {up_to}")]
    DuplicateBreakpoint { table: String, up_to: u64 },

    #[error("無效的設定: {0}")]
    InvalidSettings(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
