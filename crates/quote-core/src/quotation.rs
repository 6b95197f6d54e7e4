//! 報價單模型（交給 PDF 匯出或歷史紀錄的資料）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::CalculationResult;

/// 產品類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductKind {
    /// 紙盒
    Box,
    /// 摺頁
    Brochure,
    /// 名片
    BusinessCard,
    /// 紙袋
    PaperBag,
    /// 平張印刷品
    OffsetPrint,
}

impl ProductKind {
    pub fn label(self) -> &'static str {
        match self {
            ProductKind::Box => "Box",
            ProductKind::Brochure => "Brochure",
            ProductKind::BusinessCard => "Business Card",
            ProductKind::PaperBag => "Paper Bag",
            ProductKind::OffsetPrint => "Offset Print",
        }
    }
}

/// 報價單
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    /// 報價單ID
    pub id: Uuid,

    /// 報價日期
    pub issued_on: NaiveDate,

    /// 產品類型
    pub product: ProductKind,

    /// 品名說明
    pub description: String,

    /// 報價數量
    pub quantity: u64,

    /// 計算結果
    pub result: CalculationResult,
}

impl Quotation {
    /// 創建新的報價單
    pub fn new(
        product: ProductKind,
        description: String,
        quantity: u64,
        result: CalculationResult,
        issued_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            issued_on,
            product,
            description,
            quantity,
            result,
        }
    }

    /// 加成後總價
    pub fn total(&self) -> Decimal {
        self.result.total_with_markup
    }

    /// 單價
    pub fn unit_price(&self) -> Decimal {
        self.result.per_unit_price
    }

    /// 報價有效期限（自然日）
    pub fn valid_until(&self, days: u32) -> NaiveDate {
        self.issued_on
            .checked_add_days(chrono::Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// 是否可出具（有可用拼版）
    pub fn is_issuable(&self) -> bool {
        self.result.is_viable()
    }
}
