//! 平張印刷報價主計算器

use chrono::NaiveDate;
use quote_core::{
    CalculationResult, CostSettings, ProductKind, QuoteInput, QuoteWarning, Quotation,
    SelectionMode, SettingsUpdate, WarningCode,
};

use crate::costing::CostRollup;
use crate::planning::ProductionPlanner;
use crate::selection::SheetSelector;
use crate::sheet_fit::SheetFitEvaluator;

/// 以一份設定快照計算報價：拼版評估 → 選紙 → 數量規劃 → 成本彙總
///
/// 不會失敗；無法拼版時回傳全零結果並附上警告。
pub fn calculate(input: &QuoteInput, settings: &CostSettings) -> CalculationResult {
    tracing::info!(
        "開始報價計算：成品 {} × {} cm，數量 {}，紙張 {} 種",
        input.product.width,
        input.product.height,
        input.quantity,
        settings.sheet_catalog.len()
    );

    // Step 1: 拼版評估
    let evaluations = SheetFitEvaluator::evaluate_catalog(&settings.sheet_catalog, &input.product);
    tracing::debug!(
        "Step 1: 拼版評估 {} 筆，可拼版 {} 筆",
        evaluations.len(),
        evaluations.iter().filter(|e| e.fits()).count()
    );

    // Step 2: 選紙
    let manual_id = input.manual_sheet_id();
    let selection = SheetSelector::select(&evaluations, input.sheet_selection_mode, manual_id);
    let mut warnings = Vec::new();
    // 手動指定且存在但無法拼版的紙張
    let mut manual_no_fit = None;

    if input.sheet_selection_mode == SelectionMode::Manual {
        match manual_id {
            None => {
                tracing::debug!("手動模式未指定紙張，改為自動選紙");
                warnings.push(QuoteWarning::info(
                    WarningCode::ManualSheetNotFound,
                    "未指定紙張，已改為自動選紙".to_string(),
                ));
            }
            Some(id) => match SheetSelector::find(&evaluations, id) {
                None => {
                    tracing::warn!("手動指定紙張 {} 不存在，改為自動選紙", id);
                    warnings.push(QuoteWarning::warning(
                        WarningCode::ManualSheetNotFound,
                        format!("找不到指定紙張 {}，已改為自動選紙", id),
                    ));
                }
                Some(eval) if !eval.fits() => {
                    tracing::warn!("手動指定紙張 {} 無法拼版", eval.sheet_id());
                    warnings.push(QuoteWarning::error(
                        WarningCode::ManualSheetNoFit,
                        format!("成品無法放入指定紙張 {}", eval.sheet.label),
                    ));
                    manual_no_fit = Some(eval);
                }
                Some(_) => {}
            },
        }
    }

    let ups = selection.map(|s| s.best_ups).unwrap_or(0);
    tracing::debug!(
        "Step 2: 選紙 {:?}，拼版數 {}",
        selection.map(|s| s.sheet_id()),
        ups
    );

    // Step 3: 數量規劃
    let plan = ProductionPlanner::plan(input.quantity, ups, settings.safety_sheets);
    tracing::debug!(
        "Step 3: 印張 {}，多出 {} 個（{}）",
        plan.total_sheets,
        plan.wastage_pieces,
        plan.wastage_percent
    );

    // Step 4: 成本彙總
    let mut result = CostRollup::rollup(selection, plan, input, settings);

    if !result.is_viable() && manual_no_fit.is_none() {
        tracing::warn!("沒有任何紙張可放入成品");
        warnings.push(QuoteWarning::error(
            WarningCode::NoViableSheet,
            "成品無法放入任何紙張".to_string(),
        ));
    }

    // 保留使用者指定的紙張讓畫面標示；自動回退選到的紙張不回報
    if let Some(eval) = manual_no_fit {
        result.selected = Some(eval.clone());
    }
    result.evaluations = evaluations;
    for warning in warnings {
        result.add_warning(warning);
    }

    tracing::info!(
        "報價計算完成：小計 {}，總價 {}，單價 {}",
        result.subtotal,
        result.total_with_markup,
        result.per_unit_price
    );

    result
}

/// 平張印刷報價計算器
pub struct OffsetCalculator {
    /// 成本設定
    settings: CostSettings,
}

impl OffsetCalculator {
    /// 創建新的報價計算器
    pub fn new(settings: CostSettings) -> Self {
        Self { settings }
    }

    /// 以預設設定創建
    pub fn with_defaults() -> Self {
        Self::new(CostSettings::default())
    }

    /// 主計算入口
    pub fn calculate(&self, input: &QuoteInput) -> CalculationResult {
        calculate(input, &self.settings)
    }

    /// 計算並包裝成報價單
    pub fn quote(
        &self,
        input: &QuoteInput,
        product: ProductKind,
        description: String,
        issued_on: NaiveDate,
    ) -> Quotation {
        let result = self.calculate(input);
        Quotation::new(product, description, input.quantity, result, issued_on)
    }

    /// 更新設定（驗證失敗時不變）
    pub fn update_settings(&mut self, update: SettingsUpdate) -> quote_core::Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        self.settings.apply_update(update)?;
        tracing::info!("成本設定已更新，紙張 {} 種", self.settings.sheet_catalog.len());
        Ok(())
    }

    /// 獲取設定引用
    pub fn settings(&self) -> &CostSettings {
        &self.settings
    }
}

impl Default for OffsetCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
