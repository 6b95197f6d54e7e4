//! 選紙

use std::cmp::Ordering;

use quote_core::{SelectionMode, SheetEvaluation};

/// 選紙器
pub struct SheetSelector;

impl SheetSelector {
    /// 依模式選出使用的紙張
    ///
    /// * 手動模式且指定代碼存在：直接回傳該紙張（即使拼版數為 0）
    /// * 其他情況：取拼版數最大者；相同時取面積較小者，再相同時取代碼較小者
    /// * 評估列表為空時回傳 None
    pub fn select<'a>(
        evaluations: &'a [SheetEvaluation],
        mode: SelectionMode,
        selected_sheet_id: Option<&str>,
    ) -> Option<&'a SheetEvaluation> {
        if mode == SelectionMode::Manual {
            if let Some(found) = selected_sheet_id.and_then(|id| Self::find(evaluations, id)) {
                return Some(found);
            }
        }

        Self::best(evaluations)
    }

    /// 依代碼查找評估
    pub fn find<'a>(evaluations: &'a [SheetEvaluation], sheet_id: &str) -> Option<&'a SheetEvaluation> {
        evaluations.iter().find(|e| e.sheet_id() == sheet_id)
    }

    /// 自動選紙
    pub fn best(evaluations: &[SheetEvaluation]) -> Option<&SheetEvaluation> {
        evaluations.iter().min_by(|a, b| Self::rank(a, b))
    }

    /// 排序鍵：拼版數遞減 → 面積遞增 → 代碼遞增
    fn rank(a: &SheetEvaluation, b: &SheetEvaluation) -> Ordering {
        b.best_ups
            .cmp(&a.best_ups)
            .then_with(|| a.area().cmp(&b.area()))
            .then_with(|| a.sheet_id().cmp(b.sheet_id()))
    }
}
