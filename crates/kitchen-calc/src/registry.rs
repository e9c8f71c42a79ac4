//! 餐廳註冊表與訂單重播
//!
//! 註冊表明確擁有所有廚房，由呼叫端持有並驅動，不使用全域狀態。

use kitchen_core::{KitchenError, Order, RestaurantSpec, Result, SimulationConfig};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::kitchen::{Kitchen, KitchenSummary};
use crate::Decision;

/// 已評估的訂單
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub order: Order,
    pub decision: Decision,
}

/// 餐廳註冊表
#[derive(Debug, Clone)]
pub struct KitchenRegistry {
    config: SimulationConfig,

    /// 依註冊順序保存
    kitchens: Vec<Kitchen>,

    /// 餐廳ID → kitchens 索引
    index: HashMap<String, usize>,
}

impl KitchenRegistry {
    /// 創建空的註冊表
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            kitchens: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// 註冊廚房，ID 不可重複
    pub fn register(&mut self, kitchen: Kitchen) -> Result<()> {
        if self.index.contains_key(kitchen.id()) {
            return Err(KitchenError::Validation(format!(
                "餐廳 {} 重複定義",
                kitchen.id()
            )));
        }
        tracing::debug!("註冊餐廳 {}", kitchen.id());
        self.index.insert(kitchen.id().to_string(), self.kitchens.len());
        self.kitchens.push(kitchen);
        Ok(())
    }

    /// 由餐廳定義建立並註冊
    pub fn register_spec(&mut self, spec: &RestaurantSpec) -> Result<()> {
        self.register(Kitchen::from_spec(spec)?)
    }

    pub fn get(&self, restaurant_id: &str) -> Option<&Kitchen> {
        self.index.get(restaurant_id).map(|&i| &self.kitchens[i])
    }

    pub fn len(&self) -> usize {
        self.kitchens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kitchens.is_empty()
    }

    /// 評估單筆訂單
    pub fn evaluate(&mut self, order: &mut Order) -> Result<Decision> {
        let budget = self.config.time_budget;
        let index = *self
            .index
            .get(&order.restaurant_id)
            .ok_or_else(|| KitchenError::UnknownRestaurant(order.restaurant_id.clone()))?;

        self.kitchens[index].evaluate(order, budget)
    }

    /// 依輸入順序逐筆重播訂單
    ///
    /// 單筆失敗（如找不到餐廳）不影響後續訂單。
    pub fn replay(&mut self, orders: Vec<Order>) -> Vec<Result<Evaluated>> {
        orders
            .into_iter()
            .map(|mut order| {
                let decision = self.evaluate(&mut order)?;
                Ok(Evaluated { order, decision })
            })
            .collect()
    }

    /// 以每間餐廳一條通道並行重播
    ///
    /// 同一間餐廳的訂單仍依輸入順序逐筆評估，不同餐廳之間沒有共享狀態。
    /// 回傳順序與輸入相同，結果與 [`KitchenRegistry::replay`] 一致。
    pub fn replay_parallel(&mut self, orders: Vec<Order>) -> Vec<Result<Evaluated>> {
        let budget = self.config.time_budget;
        let mut results: Vec<Option<Result<Evaluated>>> = Vec::with_capacity(orders.len());
        let mut lanes: Vec<Vec<(usize, Order)>> = vec![Vec::new(); self.kitchens.len()];

        for (position, order) in orders.into_iter().enumerate() {
            match self.index.get(&order.restaurant_id) {
                Some(&lane) => {
                    lanes[lane].push((position, order));
                    results.push(None);
                }
                None => results.push(Some(Err(KitchenError::UnknownRestaurant(
                    order.restaurant_id,
                )))),
            }
        }

        tracing::debug!("並行重播：{} 條通道", lanes.len());
        let evaluated: Vec<Vec<(usize, Result<Evaluated>)>> = self
            .kitchens
            .par_iter_mut()
            .zip(lanes)
            .map(|(kitchen, lane)| {
                lane.into_iter()
                    .map(|(position, order)| (position, evaluate_in(kitchen, order, budget)))
                    .collect()
            })
            .collect();

        for (position, result) in evaluated.into_iter().flatten() {
            results[position] = Some(result);
        }
        results.into_iter().flatten().collect()
    }

    /// 所有廚房的彙總（依註冊順序）
    pub fn summaries(&self) -> Vec<KitchenSummary> {
        self.kitchens.iter().map(Kitchen::summary).collect()
    }
}

fn evaluate_in(kitchen: &mut Kitchen, mut order: Order, budget: Decimal) -> Result<Evaluated> {
    let decision = kitchen.evaluate(&mut order, budget)?;
    Ok(Evaluated { order, decision })
}
