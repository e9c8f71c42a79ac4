//! 庫存模型

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::order::Item;
use crate::{KitchenError, Result};

/// 食材種類數量
pub const INGREDIENT_KINDS: usize = 5;

/// 餐廳庫存（依序：肉餅、生菜、番茄、蔬菜、培根）
///
/// 庫存為不可變值：接單後整體替換，不會原地修改。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stock {
    /// 肉餅
    pub patties: u32,
    /// 生菜
    pub lettuce: u32,
    /// 番茄
    pub tomato: u32,
    /// 蔬菜
    pub veggie: u32,
    /// 培根
    pub bacon: u32,
}

impl Stock {
    /// 創建新的庫存
    pub fn new(patties: u32, lettuce: u32, tomato: u32, veggie: u32, bacon: u32) -> Self {
        Self {
            patties,
            lettuce,
            tomato,
            veggie,
            bacon,
        }
    }

    /// 由五個數量建立庫存
    ///
    /// 數量必須剛好五個且皆為非負整數。
    pub fn from_counts(counts: &[i64]) -> Result<Self> {
        if counts.len() != INGREDIENT_KINDS {
            return Err(KitchenError::Validation(format!(
                "庫存需要 {} 個數量，實際 {} 個",
                INGREDIENT_KINDS,
                counts.len()
            )));
        }

        let mut values = [0u32; INGREDIENT_KINDS];
        for (slot, &count) in values.iter_mut().zip(counts) {
            *slot = u32::try_from(count).map_err(|_| {
                KitchenError::Validation(format!("庫存數量必須為非負整數: {}", count))
            })?;
        }

        Ok(Self::from_array(values))
    }

    /// 由訂單品項統計食材需求
    ///
    /// 每個品項固定消耗一個肉餅，其餘食材依品項代碼中的字母計數。
    pub fn from_order_items(items: &[Item]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            patties: acc.patties + 1,
            lettuce: acc.lettuce + item.lettuce,
            tomato: acc.tomato + item.tomato,
            veggie: acc.veggie + item.veggie,
            bacon: acc.bacon + item.bacon,
        })
    }

    /// 以陣列表示
    pub fn as_array(&self) -> [u32; INGREDIENT_KINDS] {
        [
            self.patties,
            self.lettuce,
            self.tomato,
            self.veggie,
            self.bacon,
        ]
    }

    fn from_array(values: [u32; INGREDIENT_KINDS]) -> Self {
        let [patties, lettuce, tomato, veggie, bacon] = values;
        Self::new(patties, lettuce, tomato, veggie, bacon)
    }

    /// 逐項相減，結果可能為負
    pub fn difference(&self, other: &Stock) -> StockDiff {
        let mut diff = [0i64; INGREDIENT_KINDS];
        for ((d, a), b) in diff.iter_mut().zip(self.as_array()).zip(other.as_array()) {
            *d = i64::from(a) - i64::from(b);
        }
        StockDiff(diff)
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.patties, self.lettuce, self.tomato, self.veggie, self.bacon
        )
    }
}

/// 試算後的庫存差額
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDiff(pub [i64; INGREDIENT_KINDS]);

impl StockDiff {
    /// 所有食材皆不為負時才足夠
    pub fn is_sufficient(&self) -> bool {
        self.0.iter().all(|&v| v >= 0)
    }

    /// 轉回庫存（僅在足夠時成功）
    pub fn into_stock(self) -> Result<Stock> {
        Stock::from_counts(&self.0)
    }
}
