//! 級距計價表
//!
//! 每個階梯式費用都以「排序後的級距 → 固定價」加上「超出最大級距的單價」表示，
//! 取代層層巢狀的條件判斷。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::QuoteError;

/// 單一級距：數量 `<= up_to` 時收取固定價 `price`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    /// 級距上限（含）
    pub up_to: u64,

    /// 固定價
    pub price: Decimal,
}

impl PriceTier {
    pub fn new(up_to: u64, price: Decimal) -> Self {
        Self { up_to, price }
    }
}

/// 級距計價表
///
/// 不變式：`tiers` 依 `up_to` 遞增排序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTierTable")]
pub struct TierTable {
    tiers: Vec<PriceTier>,

    /// 超出最大級距時的單價（乘以數量）
    above_max_rate: Decimal,
}

impl TierTable {
    /// 創建級距表（自動排序）
    pub fn new(mut tiers: Vec<PriceTier>, above_max_rate: Decimal) -> Self {
        tiers.sort_by_key(|t| t.up_to);
        Self {
            tiers,
            above_max_rate,
        }
    }

    /// 單一門檻：`<= threshold` 收固定價，超出則按單價計
    pub fn threshold(threshold: u64, flat_price: Decimal, above_rate: Decimal) -> Self {
        Self::new(vec![PriceTier::new(threshold, flat_price)], above_rate)
    }

    /// 級距列表（已排序）
    pub fn tiers(&self) -> &[PriceTier] {
        &self.tiers
    }

    /// 超出最大級距的單價
    pub fn above_max_rate(&self) -> Decimal {
        self.above_max_rate
    }

    /// 最大級距
    pub fn max_breakpoint(&self) -> Option<u64> {
        self.tiers.last().map(|t| t.up_to)
    }

    /// 查價：取最小的 `up_to >= count` 級距固定價；全部超出則 `count × above_max_rate`
    ///
    /// 乘積溢位時回傳 0。
    pub fn price_for(&self, count: u64) -> Decimal {
        match self.tiers.iter().find(|t| t.up_to >= count) {
            Some(tier) => tier.price,
            None => Decimal::from(count)
                .checked_mul(self.above_max_rate)
                .unwrap_or(Decimal::ZERO),
        }
    }

    /// 新增或覆寫級距
    pub fn upsert_tier(&mut self, tier: PriceTier) {
        match self.tiers.binary_search_by_key(&tier.up_to, |t| t.up_to) {
            Ok(idx) => self.tiers[idx] = tier,
            Err(idx) => self.tiers.insert(idx, tier),
        }
    }

    /// 設置超出最大級距的單價
    pub fn set_above_max_rate(&mut self, rate: Decimal) {
        self.above_max_rate = rate;
    }

    /// 驗證：級距不可重複、價格不可為負
    pub fn validate(&self, table: &str) -> crate::Result<()> {
        for pair in self.tiers.windows(2) {
            if pair[0].up_to == pair[1].up_to {
                return Err(QuoteError::DuplicateBreakpoint {
                    table: table.to_string(),
                    up_to: pair[0].up_to,
                });
            }
        }

        if self.tiers.iter().any(|t| t.price < Decimal::ZERO) {
            return Err(QuoteError::InvalidSettings(format!("{} 級距價格不可為負", table)));
        }

        if self.above_max_rate < Decimal::ZERO {
            return Err(QuoteError::InvalidSettings(format!("{} 超量單價不可為負", table)));
        }

        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTierTable {
    tiers: Vec<PriceTier>,
    above_max_rate: Decimal,
}

impl TryFrom<RawTierTable> for TierTable {
    type Error = QuoteError;

    fn try_from(raw: RawTierTable) -> Result<Self, Self::Error> {
        let table = TierTable::new(raw.tiers, raw.above_max_rate);
        table.validate("tierTable")?;
        Ok(table)
    }
}
