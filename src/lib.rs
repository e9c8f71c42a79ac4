//! # Kitchen
//!
//! 讀取餐廳定義與訂單，逐筆重播並輸出接單決策與餐廳彙總。

use kitchen_calc::{Evaluated, KitchenRegistry, KitchenSummary};
use kitchen_core::line::{format_decision, format_summary, parse_input_line, InputLine};
use kitchen_core::{to_whole_minutes, KitchenError, Order, OrderStatus, SimulationConfig, Stock};
use serde::Serialize;

/// 模擬錯誤
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Kitchen(#[from] KitchenError),

    #[error("JSON 輸出失敗: {0}")]
    Json(#[from] serde_json::Error),
}

/// 輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `R1,O1,ACCEPTED,5` 形式的文字行
    #[default]
    Text,
    /// 每行一個 JSON 物件
    Json,
}

/// 已載入的模擬：註冊完成的餐廳與待重播的訂單
pub struct Simulation {
    registry: KitchenRegistry,

    /// 依輸入順序保存，解析失敗的行也保留位置
    entries: Vec<Result<Order, KitchenError>>,
}

impl Simulation {
    /// 由輸入文字載入
    ///
    /// 餐廳定義必須位於所有訂單之前；定義錯誤或出現在訂單之後都會中止載入。
    /// 訂單行的錯誤只記錄在該行，不影響其他訂單。
    pub fn load(input: &str, config: SimulationConfig) -> Result<Self, KitchenError> {
        let mut registry = KitchenRegistry::new(config);
        let mut entries = Vec::new();

        for line in input.lines().filter(|l| !l.trim().is_empty()) {
            match parse_input_line(line, registry.config()) {
                Ok(InputLine::Restaurant(spec)) => {
                    if !entries.is_empty() {
                        return Err(KitchenError::Validation(format!(
                            "餐廳 {} 的定義出現在訂單之後: {}",
                            spec.id,
                            line.trim()
                        )));
                    }
                    tracing::info!("載入餐廳 {}", spec.id);
                    registry.register_spec(&spec)?;
                }
                Ok(InputLine::Order(order)) => entries.push(Ok(order)),
                Err(err @ KitchenError::Validation(_)) => return Err(err),
                Err(err) => {
                    tracing::error!("{}", err);
                    entries.push(Err(err));
                }
            }
        }

        tracing::info!(
            "載入完成：餐廳 {} 間，訂單 {} 筆",
            registry.len(),
            entries.len()
        );
        Ok(Self { registry, entries })
    }

    pub fn registry(&self) -> &KitchenRegistry {
        &self.registry
    }

    /// 重播所有訂單
    pub fn run(mut self, parallel: bool) -> Report {
        let mut outcomes: Vec<Option<Result<Evaluated, KitchenError>>> = Vec::new();
        let mut orders = Vec::new();
        for entry in self.entries {
            match entry {
                Ok(order) => {
                    orders.push(order);
                    outcomes.push(None);
                }
                Err(err) => outcomes.push(Some(Err(err))),
            }
        }

        let replayed = if parallel {
            self.registry.replay_parallel(orders)
        } else {
            self.registry.replay(orders)
        };

        let mut replayed = replayed.into_iter();
        let outcomes = outcomes
            .into_iter()
            .filter_map(|slot| slot.or_else(|| replayed.next()))
            .collect();

        Report {
            outcomes,
            summaries: self.registry.summaries(),
        }
    }
}

/// 重播結果
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// 依輸入順序的每筆訂單結果
    pub outcomes: Vec<Result<Evaluated, KitchenError>>,

    /// 依定義順序的餐廳彙總
    pub summaries: Vec<KitchenSummary>,
}

#[derive(Serialize)]
struct DecisionRecord<'a> {
    restaurant_id: &'a str,
    order_id: &'a str,
    status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_minutes: Option<i64>,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    restaurant_id: &'a str,
    total_minutes: i64,
    inventory: &'a Stock,
}

impl Report {
    /// 無法評估的訂單
    pub fn errors(&self) -> impl Iterator<Item = &KitchenError> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    /// 依格式產生輸出行：先逐筆決策，最後為各餐廳彙總
    pub fn render(&self, format: OutputFormat) -> Result<Vec<String>, SimulationError> {
        let decided = self
            .outcomes
            .iter()
            .filter_map(|o| o.as_ref().ok())
            .map(|evaluated| &evaluated.order);

        let mut lines = Vec::new();
        match format {
            OutputFormat::Text => {
                lines.extend(decided.map(format_decision));
                lines.extend(
                    self.summaries
                        .iter()
                        .map(|s| format_summary(&s.restaurant_id, s.total_time, &s.stock)),
                );
            }
            OutputFormat::Json => {
                for order in decided {
                    lines.push(serde_json::to_string(&DecisionRecord {
                        restaurant_id: &order.restaurant_id,
                        order_id: &order.order_id,
                        status: order.status,
                        required_minutes: (order.status == OrderStatus::Accepted)
                            .then(|| to_whole_minutes(order.required_time)),
                    })?);
                }
                for summary in &self.summaries {
                    lines.push(serde_json::to_string(&SummaryRecord {
                        restaurant_id: &summary.restaurant_id,
                        total_minutes: to_whole_minutes(summary.total_time),
                        inventory: &summary.stock,
                    })?);
                }
            }
        }
        Ok(lines)
    }
}
