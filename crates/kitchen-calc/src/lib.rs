//! # Kitchen Calculation Engine
//!
//! 接單決策引擎：生產站排程、庫存試算與兩階段提交

pub mod kitchen;
pub mod registry;
pub mod stage;

// Re-export 主要類型
pub use kitchen::{Kitchen, KitchenSummary};
pub use registry::{Evaluated, KitchenRegistry};
pub use stage::{Stage, StageProposal};

use kitchen_core::RejectReason;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單筆訂單的決策結果
///
/// 拒單是正常的業務結果，不是錯誤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// 接單，附上所需總時間（秒）
    Accepted { required_time: Decimal },
    /// 拒單
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted { .. })
    }

    /// 拒單原因（接單時為 None）
    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Decision::Accepted { .. } => None,
            Decision::Rejected(reason) => Some(*reason),
        }
    }
}
