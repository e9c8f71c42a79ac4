//! 訂單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stock::Stock;
use crate::{KitchenError, Result};

/// 訂單品項（如 `BLT`）
///
/// 代碼只在解析時驗證一次，之後以固定欄位保存各食材用量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 原始代碼
    pub code: String,
    pub lettuce: u32,
    pub tomato: u32,
    pub veggie: u32,
    pub bacon: u32,
}

impl Item {
    /// 解析品項代碼
    ///
    /// 代碼只能由 `L`、`T`、`V`、`B` 組成，且不可為空。
    pub fn parse(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(KitchenError::parse(code, "品項代碼不可為空"));
        }

        let mut item = Self {
            code: code.to_string(),
            lettuce: 0,
            tomato: 0,
            veggie: 0,
            bacon: 0,
        };
        for letter in code.chars() {
            match letter {
                'L' => item.lettuce += 1,
                'T' => item.tomato += 1,
                'V' => item.veggie += 1,
                'B' => item.bacon += 1,
                other => {
                    return Err(KitchenError::parse(
                        code,
                        format!("未知的食材代碼 `{}`", other),
                    ))
                }
            }
        }
        Ok(item)
    }
}

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 尚未決策
    Undecided,
    /// 接單
    Accepted,
    /// 拒單
    Rejected,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            OrderStatus::Undecided => "UNDECIDED",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Rejected => "REJECTED",
        };
        f.write_str(text)
    }
}

/// 拒單原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// 庫存不足
    InsufficientInventory,
    /// 時間不足
    InsufficientTime,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InsufficientInventory => f.write_str("insufficient inventory"),
            RejectReason::InsufficientTime => f.write_str("insufficient time"),
        }
    }
}

/// 訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 餐廳ID
    pub restaurant_id: String,

    /// 下單時間（相對於基準時間的秒數）
    pub order_time: Decimal,

    /// 訂單ID
    pub order_id: String,

    /// 品項
    pub items: Vec<Item>,

    /// 食材需求（由品項推導）
    pub requirement: Stock,

    /// 狀態
    pub status: OrderStatus,

    /// 所需時間（秒），僅在接單時有意義
    pub required_time: Decimal,

    /// 拒單原因
    pub reject_reason: Option<RejectReason>,
}

impl Order {
    /// 創建新的訂單
    pub fn new(
        restaurant_id: impl Into<String>,
        order_time: Decimal,
        order_id: impl Into<String>,
        items: Vec<Item>,
    ) -> Self {
        let requirement = Stock::from_order_items(&items);
        Self {
            restaurant_id: restaurant_id.into(),
            order_time,
            order_id: order_id.into(),
            items,
            requirement,
            status: OrderStatus::Undecided,
            required_time: Decimal::ZERO,
            reject_reason: None,
        }
    }

    /// 是否尚未決策
    pub fn is_undecided(&self) -> bool {
        self.status == OrderStatus::Undecided
    }

    /// 記錄接單
    pub fn accept(&mut self, required_time: Decimal) -> Result<()> {
        self.ensure_undecided()?;
        self.status = OrderStatus::Accepted;
        self.required_time = required_time;
        Ok(())
    }

    /// 記錄拒單
    pub fn reject(&mut self, reason: RejectReason) -> Result<()> {
        self.ensure_undecided()?;
        self.status = OrderStatus::Rejected;
        self.reject_reason = Some(reason);
        Ok(())
    }

    /// 狀態只能由未決策轉換一次
    pub fn ensure_undecided(&self) -> Result<()> {
        if self.is_undecided() {
            Ok(())
        } else {
            Err(KitchenError::AlreadyDecided(self.order_id.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_order() -> Order {
        let items = vec![
            Item::parse("BLT").unwrap(),
            Item::parse("LT").unwrap(),
            Item::parse("VLT").unwrap(),
        ];
        Order::new("R1", Decimal::ZERO, "O1", items)
    }

    #[rstest]
    #[case("BLT", [1, 1, 0, 1])]
    #[case("LT", [1, 1, 0, 0])]
    #[case("VLT", [1, 1, 1, 0])]
    #[case("VT", [0, 1, 1, 0])]
    #[case("LLT", [2, 1, 0, 0])]
    fn test_parse_item(#[case] code: &str, #[case] counts: [u32; 4]) {
        let item = Item::parse(code).unwrap();
        assert_eq!(
            [item.lettuce, item.tomato, item.veggie, item.bacon],
            counts
        );
        assert_eq!(item.code, code);
    }

    #[rstest]
    #[case("")]
    #[case("BXT")]
    #[case("blt")]
    fn test_parse_item_rejects_invalid(#[case] code: &str) {
        assert!(matches!(
            Item::parse(code),
            Err(KitchenError::Parse { .. })
        ));
    }

    #[test]
    fn test_create_order() {
        let order = sample_order();

        assert_eq!(order.restaurant_id, "R1");
        assert_eq!(order.order_id, "O1");
        assert_eq!(order.order_time, Decimal::ZERO);
        assert_eq!(order.status, OrderStatus::Undecided);
        assert_eq!(order.required_time, Decimal::ZERO);
        assert_eq!(order.requirement, Stock::new(3, 3, 3, 1, 1));
    }

    #[test]
    fn test_accept_once() {
        let mut order = sample_order();
        order.accept(Decimal::from(300)).unwrap();

        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.required_time, Decimal::from(300));

        // 已決策的訂單不能再次轉換
        assert_eq!(
            order.reject(RejectReason::InsufficientTime),
            Err(KitchenError::AlreadyDecided("O1".to_string()))
        );
        assert_eq!(order.status, OrderStatus::Accepted);
    }

    #[test]
    fn test_reject_once() {
        let mut order = sample_order();
        order.reject(RejectReason::InsufficientInventory).unwrap();

        assert_eq!(order.status, OrderStatus::Rejected);
        assert_eq!(order.reject_reason, Some(RejectReason::InsufficientInventory));
        assert!(order.accept(Decimal::ONE).is_err());
    }

    #[test]
    fn test_reason_text() {
        assert_eq!(
            RejectReason::InsufficientInventory.to_string(),
            "insufficient inventory"
        );
        assert_eq!(RejectReason::InsufficientTime.to_string(), "insufficient time");
        assert_eq!(OrderStatus::Accepted.to_string(), "ACCEPTED");
    }
}
