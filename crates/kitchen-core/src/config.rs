//! 模擬配置模型

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SECONDS_PER_MINUTE;

/// 下單時間格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 預設時間預算（分鐘），總時間必須嚴格小於此值
pub const DEFAULT_TIME_BUDGET_MINUTES: u32 = 21;

/// 模擬參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 單筆訂單允許的最長總時間（秒）
    pub time_budget: Decimal,

    /// 下單時間的基準點
    pub epoch: NaiveDateTime,
}

impl SimulationConfig {
    /// 創建預設配置（21 分鐘預算，基準點 2020-12-08 19:15:31）
    pub fn new() -> Self {
        let epoch = NaiveDate::from_ymd_opt(2020, 12, 8)
            .and_then(|date| date.and_hms_opt(19, 15, 31))
            .expect("固定基準時間必定有效");

        Self {
            time_budget: minutes(DEFAULT_TIME_BUDGET_MINUTES),
            epoch,
        }
    }

    /// 建構器模式：設置時間預算（秒）
    pub fn with_time_budget(mut self, seconds: Decimal) -> Self {
        self.time_budget = seconds;
        self
    }

    /// 建構器模式：設置時間預算（分鐘）
    pub fn with_time_budget_minutes(self, budget_minutes: u32) -> Self {
        self.with_time_budget(minutes(budget_minutes))
    }

    /// 建構器模式：設置基準時間
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch;
        self
    }

    /// 將下單時間換算為相對基準點的秒數
    pub fn order_time(&self, placed_at: NaiveDateTime) -> Decimal {
        Decimal::from((placed_at - self.epoch).num_seconds())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn minutes(value: u32) -> Decimal {
    Decimal::from(value) * Decimal::from(SECONDS_PER_MINUTE)
}
