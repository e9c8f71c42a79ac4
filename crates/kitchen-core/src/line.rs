//! 文字行格式
//!
//! 餐廳定義：`R1,4C,1,3A,2,2P,1,100,200,200,100,100`
//!
//! 訂單：`R1,2020-12-08 19:15:31,O1,BLT,LT,VLT`
//!
//! 決策輸出：`R1,O1,ACCEPTED,5` 或 `R1,O1,REJECTED`；
//! 彙總輸出：`R1,TOTAL,16` 與 `R1,INVENTORY,92,193,192,96,98`。

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::config::{SimulationConfig, TIMESTAMP_FORMAT};
use crate::order::{Item, Order, OrderStatus};
use crate::restaurant::{RestaurantSpec, StageKind, StageSpec};
use crate::stock::{Stock, INGREDIENT_KINDS};
use crate::{to_whole_minutes, KitchenError, Result};

/// 餐廳定義的欄位數：ID + 3 組（容量, 分鐘）+ 5 項庫存
const RESTAURANT_FIELDS: usize = 1 + 2 * 3 + INGREDIENT_KINDS;

/// 已分類的輸入行
#[derive(Debug, Clone, PartialEq)]
pub enum InputLine {
    Restaurant(RestaurantSpec),
    Order(Order),
}

/// 解析任一輸入行
///
/// 第二欄不是下單時間、且形似容量（如 `4C`、`4c`、`4`）或欄位數與餐廳定義相同者，
/// 視為餐廳定義；其格式錯誤一律回報為 `Validation`。其餘皆為訂單。
pub fn parse_input_line(line: &str, config: &SimulationConfig) -> Result<InputLine> {
    if is_restaurant_line(line) {
        parse_restaurant(line).map(InputLine::Restaurant)
    } else {
        parse_order(line, config).map(InputLine::Order)
    }
}

/// 判斷是否為餐廳定義行
pub fn is_restaurant_line(line: &str) -> bool {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let Some(second) = fields.get(1) else {
        return false;
    };
    if NaiveDateTime::parse_from_str(second, TIMESTAMP_FORMAT).is_ok() {
        return false;
    }

    let looks_like_capacity = second
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .parse::<i64>()
        .is_ok();
    looks_like_capacity || fields.len() == RESTAURANT_FIELDS
}

/// 解析餐廳定義行
pub fn parse_restaurant(line: &str) -> Result<RestaurantSpec> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() != RESTAURANT_FIELDS {
        return Err(KitchenError::Validation(format!(
            "餐廳定義需要 {} 個欄位，實際 {} 個: {}",
            RESTAURANT_FIELDS,
            fields.len(),
            line.trim()
        )));
    }

    let id = fields[0];
    if id.is_empty() {
        return Err(KitchenError::Validation("餐廳ID不可為空".to_string()));
    }

    let mut stages = Vec::with_capacity(StageKind::PIPELINE.len());
    for (i, kind) in StageKind::PIPELINE.iter().enumerate() {
        let capacity_field = fields[1 + 2 * i];
        let minutes_field = fields[2 + 2 * i];

        let capacity = capacity_field
            .strip_suffix(kind.suffix())
            .ok_or_else(|| {
                KitchenError::Validation(format!(
                    "{} 容量欄位必須以 `{}` 結尾: {}",
                    kind,
                    kind.suffix(),
                    capacity_field
                ))
            })
            .and_then(|n| parse_integer(n, kind.name()))?;
        let minutes = parse_integer(minutes_field, kind.name())?;

        stages.push(StageSpec::new(*kind, capacity, minutes)?);
    }

    let counts = fields[1 + 2 * StageKind::PIPELINE.len()..]
        .iter()
        .map(|field| parse_integer(field, "庫存"))
        .collect::<Result<Vec<_>>>()?;
    let initial_stock = Stock::from_counts(&counts)?;

    Ok(RestaurantSpec::new(id, stages, initial_stock))
}

fn parse_integer(field: &str, what: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|_| KitchenError::Validation(format!("{} 欄位不是整數: `{}`", what, field)))
}

/// 解析訂單行
pub fn parse_order(line: &str, config: &SimulationConfig) -> Result<Order> {
    let trimmed = line.trim();
    let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(KitchenError::parse(trimmed, "訂單至少需要餐廳ID、時間與訂單ID"));
    }

    let restaurant_id = fields[0];
    let order_id = fields[2];
    if restaurant_id.is_empty() || order_id.is_empty() {
        return Err(KitchenError::parse(trimmed, "餐廳ID與訂單ID不可為空"));
    }

    let placed_at = NaiveDateTime::parse_from_str(fields[1], TIMESTAMP_FORMAT)
        .map_err(|e| KitchenError::parse(trimmed, format!("時間格式錯誤: {}", e)))?;

    let items = fields[3..]
        .iter()
        .map(|code| {
            Item::parse(code).map_err(|e| match e {
                KitchenError::Parse { reason, .. } => KitchenError::parse(trimmed, reason),
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Order::new(
        restaurant_id,
        config.order_time(placed_at),
        order_id,
        items,
    ))
}

/// 格式化訂單決策
///
/// 只有接單時才附上所需分鐘數。
pub fn format_decision(order: &Order) -> String {
    match order.status {
        OrderStatus::Accepted => format!(
            "{},{},{},{}",
            order.restaurant_id,
            order.order_id,
            order.status,
            to_whole_minutes(order.required_time)
        ),
        _ => format!("{},{},{}", order.restaurant_id, order.order_id, order.status),
    }
}

/// 格式化餐廳彙總（兩行）
pub fn format_summary(restaurant_id: &str, total_time: Decimal, stock: &Stock) -> String {
    format!(
        "{id},TOTAL,{}\n{id},INVENTORY,{}",
        to_whole_minutes(total_time),
        stock,
        id = restaurant_id
    )
}
