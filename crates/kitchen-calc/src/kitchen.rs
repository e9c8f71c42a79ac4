//! 餐廳廚房：兩階段接單決策

use kitchen_core::{KitchenError, Order, RejectReason, RestaurantSpec, Result, Stock};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::stage::{Stage, StageProposal};
use crate::Decision;

/// 餐廳廚房
///
/// 擁有依流程排序的生產站與目前已提交的庫存。
/// 每筆訂單先試算庫存與時間，全部可行才一次提交；否則不留下任何變更。
#[derive(Debug, Clone, PartialEq)]
pub struct Kitchen {
    id: String,
    stages: Vec<Stage>,
    stock: Stock,

    /// 已接訂單的累計所需時間（秒）
    total_time: Decimal,
}

/// 廚房彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenSummary {
    pub restaurant_id: String,
    pub total_time: Decimal,
    pub stock: Stock,
}

impl Kitchen {
    /// 創建新的廚房
    pub fn new(id: impl Into<String>, stages: Vec<Stage>, stock: Stock) -> Self {
        Self {
            id: id.into(),
            stages,
            stock,
            total_time: Decimal::ZERO,
        }
    }

    /// 由餐廳定義建立
    pub fn from_spec(spec: &RestaurantSpec) -> Result<Self> {
        if spec.stages.is_empty() {
            return Err(KitchenError::Validation(format!(
                "餐廳 {} 沒有任何生產站",
                spec.id
            )));
        }
        let stages = spec
            .stages
            .iter()
            .map(Stage::from_spec)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(spec.id.clone(), stages, spec.initial_stock))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// 已提交的庫存
    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn total_time(&self) -> Decimal {
        self.total_time
    }

    pub fn summary(&self) -> KitchenSummary {
        KitchenSummary {
            restaurant_id: self.id.clone(),
            total_time: self.total_time,
            stock: self.stock,
        }
    }

    /// 評估訂單並記錄決策
    ///
    /// 1. 庫存試算：任一食材不足即拒單，不觸及生產站。
    /// 2. 時間試算：各生產站皆以原始下單時間試算，所需時間相加。
    /// 3. 總時間嚴格小於預算才接單，並一次提交庫存與所有排程。
    ///
    /// 訂單已有決策時回傳錯誤，且不修改任何狀態。
    pub fn evaluate(&mut self, order: &mut Order, time_budget: Decimal) -> Result<Decision> {
        order.ensure_undecided()?;

        let diff = self.stock.difference(&order.requirement);
        tracing::info!("訂單 {} 試算剩餘庫存: {:?}", order.order_id, diff.0);
        if !diff.is_sufficient() {
            return self.reject(order, RejectReason::InsufficientInventory);
        }

        let proposals: Vec<StageProposal> = self
            .stages
            .iter()
            .map(|stage| stage.propose(order.order_time, &order.items))
            .collect();
        let total_time: Decimal = proposals.iter().map(|p| p.duration).sum();
        tracing::info!("訂單 {} 總共需要 {} 秒", order.order_id, total_time);

        if total_time >= time_budget {
            return self.reject(order, RejectReason::InsufficientTime);
        }

        let stock = diff.into_stock()?;
        order.accept(total_time)?;

        self.stock = stock;
        for (stage, proposal) in self.stages.iter_mut().zip(proposals) {
            stage.commit(proposal);
        }
        self.total_time += total_time;

        Ok(Decision::Accepted {
            required_time: total_time,
        })
    }

    fn reject(&self, order: &mut Order, reason: RejectReason) -> Result<Decision> {
        tracing::warn!("餐廳 {} 拒絕訂單 {}: {}", self.id, order.order_id, reason);
        order.reject(reason)?;
        Ok(Decision::Rejected(reason))
    }
}
