//! 餐廳定義模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stock::Stock;
use crate::{KitchenError, Result, SECONDS_PER_MINUTE};

/// 生產站類型（依流程順序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// 烹調
    Cooking,
    /// 組裝
    Assembling,
    /// 包裝
    Packaging,
}

impl StageKind {
    /// 固定的流程順序
    pub const PIPELINE: [StageKind; 3] = [
        StageKind::Cooking,
        StageKind::Assembling,
        StageKind::Packaging,
    ];

    /// 容量欄位的後綴字母
    pub fn suffix(&self) -> char {
        match self {
            StageKind::Cooking => 'C',
            StageKind::Assembling => 'A',
            StageKind::Packaging => 'P',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StageKind::Cooking => "cooking",
            StageKind::Assembling => "assembling",
            StageKind::Packaging => "packaging",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 生產站參數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpec {
    /// 類型
    pub kind: StageKind,

    /// 可同時處理的品項數
    pub capacity: usize,

    /// 每個品項的處理時間（分鐘）
    pub task_minutes: u32,
}

impl StageSpec {
    /// 創建生產站參數，容量必須為正數
    pub fn new(kind: StageKind, capacity: i64, task_minutes: i64) -> Result<Self> {
        if capacity <= 0 {
            return Err(KitchenError::Validation(format!(
                "{} 容量必須為正數: {}",
                kind, capacity
            )));
        }
        let capacity = usize::try_from(capacity)
            .map_err(|_| KitchenError::Validation(format!("{} 容量過大: {}", kind, capacity)))?;
        let task_minutes = u32::try_from(task_minutes).map_err(|_| {
            KitchenError::Validation(format!("{} 處理時間無效: {}", kind, task_minutes))
        })?;

        Ok(Self {
            kind,
            capacity,
            task_minutes,
        })
    }

    /// 每個品項的處理時間（秒）
    pub fn task_seconds(&self) -> Decimal {
        Decimal::from(self.task_minutes) * Decimal::from(SECONDS_PER_MINUTE)
    }
}

/// 餐廳定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSpec {
    /// 餐廳ID
    pub id: String,

    /// 生產站（依流程順序）
    pub stages: Vec<StageSpec>,

    /// 初始庫存
    pub initial_stock: Stock,
}

impl RestaurantSpec {
    /// 創建新的餐廳定義
    pub fn new(id: impl Into<String>, stages: Vec<StageSpec>, initial_stock: Stock) -> Self {
        Self {
            id: id.into(),
            stages,
            initial_stock,
        }
    }
}
