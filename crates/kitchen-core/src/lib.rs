//! # Kitchen Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod line;
pub mod order;
pub mod restaurant;
pub mod stock;

// Re-export 主要類型
pub use config::SimulationConfig;
pub use order::{Item, Order, OrderStatus, RejectReason};
pub use restaurant::{RestaurantSpec, StageKind, StageSpec};
pub use stock::{Stock, StockDiff};

use rust_decimal::Decimal;

/// 每分鐘秒數
pub const SECONDS_PER_MINUTE: i64 = 60;

/// 將秒數換算為整數分鐘（向零截斷，超出 i64 範圍時取極值）
pub fn to_whole_minutes(seconds: Decimal) -> i64 {
    use rust_decimal::prelude::ToPrimitive;

    let minutes = (seconds / Decimal::from(SECONDS_PER_MINUTE)).trunc();
    minutes.to_i64().unwrap_or(if minutes.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// 廚房模擬錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KitchenError {
    #[error("無效的餐廳或庫存定義: {0}")]
    Validation(String),

    #[error("找不到餐廳: {0}")]
    UnknownRestaurant(String),

    #[error("無法解析輸入行 `{line}`: {reason}")]
    Parse { line: String, reason: String },

    #[error("訂單已有決策: {0}")]
    AlreadyDecided(String),
}

impl KitchenError {
    /// 建立解析錯誤
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, KitchenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Decimal::ZERO, 0)]
    #[case(Decimal::from(60), 1)]
    #[case(Decimal::from(300), 5)]
    #[case(Decimal::from(718), 11)]
    #[case(Decimal::from(1259), 20)]
    fn test_to_whole_minutes(#[case] seconds: Decimal, #[case] minutes: i64) {
        assert_eq!(to_whole_minutes(seconds), minutes);
    }

    #[test]
    fn test_to_whole_minutes_saturates() {
        assert_eq!(to_whole_minutes(Decimal::MAX), i64::MAX);
        assert_eq!(to_whole_minutes(Decimal::MIN), i64::MIN);
        assert_eq!(to_whole_minutes(Decimal::from(-59)), 0);
    }

    #[test]
    fn test_error_messages() {
        let err = KitchenError::UnknownRestaurant("R9".to_string());
        assert!(err.to_string().contains("R9"));

        let err = KitchenError::parse("R1,bad", "時間格式錯誤");
        assert!(err.to_string().contains("R1,bad"));
    }
}
