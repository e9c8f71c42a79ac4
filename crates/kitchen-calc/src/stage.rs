//! 生產站排程
//!
//! 每個生產站有固定數量的並行槽位，每個槽位只記錄「下一次可用時間」。
//! 排程分兩步：[`Stage::propose`] 依已提交狀態試算出候選排程與所需時間，
//! 不修改生產站；只有在整筆訂單確定接單後，才以 [`Stage::commit`] 寫回。
//! 拒單時直接丟棄候選排程即可，不需要回滾。

use kitchen_core::{Item, KitchenError, Result, StageKind, StageSpec};
use rust_decimal::Decimal;

/// 生產站
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    kind: StageKind,

    /// 每個品項的處理時間（秒）
    task_duration: Decimal,

    /// 已提交排程：每個槽位最近一次的完成時間，閒置為 None
    slots: Vec<Option<Decimal>>,
}

/// 候選排程（試算結果）
#[derive(Debug, Clone, PartialEq)]
pub struct StageProposal {
    slots: Vec<Option<Decimal>>,

    /// 本站處理此訂單所需時間（最慢品項）
    pub duration: Decimal,
}

impl StageProposal {
    /// 候選排程中各槽位的完成時間
    pub fn slots(&self) -> &[Option<Decimal>] {
        &self.slots
    }
}

impl Stage {
    /// 創建生產站，容量必須為正數
    pub fn new(kind: StageKind, capacity: usize, task_duration: Decimal) -> Result<Self> {
        if capacity == 0 {
            return Err(KitchenError::Validation(format!("{} 容量必須為正數", kind)));
        }
        Ok(Self {
            kind,
            task_duration,
            slots: vec![None; capacity],
        })
    }

    /// 由生產站參數建立
    pub fn from_spec(spec: &StageSpec) -> Result<Self> {
        Self::new(spec.kind, spec.capacity, spec.task_seconds())
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn task_duration(&self) -> Decimal {
        self.task_duration
    }

    /// 已提交排程
    pub fn committed_slots(&self) -> &[Option<Decimal>] {
        &self.slots
    }

    /// 試算訂單在本站的排程
    ///
    /// 每個品項依序分配到最早可用的槽位（閒置槽位優先），
    /// 本站所需時間為所有品項中最長者。
    pub fn propose(&self, order_time: Decimal, items: &[Item]) -> StageProposal {
        let mut slots = self.slots.clone();
        let mut duration = Decimal::ZERO;

        for item in items {
            let item_duration = allocate(&mut slots, order_time, self.task_duration);
            tracing::debug!(
                "{}: 品項 {} 需要 {} 秒",
                self.kind,
                item.code,
                item_duration
            );
            duration = duration.max(item_duration);
        }

        tracing::info!("{}: 訂單需要 {} 秒", self.kind, duration);
        StageProposal { slots, duration }
    }

    /// 提交候選排程
    pub fn commit(&mut self, proposal: StageProposal) {
        debug_assert_eq!(proposal.slots.len(), self.slots.len());
        self.slots = proposal.slots;
    }
}

/// 將一個品項分配到最早可用的槽位，回傳含等待的所需時間
///
/// 同樣早的槽位取索引最小者；閒置槽位（None）排序在任何完成時間之前。
fn allocate(slots: &mut [Option<Decimal>], order_time: Decimal, task_duration: Decimal) -> Decimal {
    let Some(slot) = slots.iter_mut().min_by_key(|slot| **slot) else {
        return task_duration;
    };

    let available_at = slot.unwrap_or(order_time);
    let wait_time = (available_at - order_time).max(Decimal::ZERO);
    *slot = Some(order_time + task_duration + wait_time);

    task_duration + wait_time
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn cooking(capacity: usize) -> Stage {
        Stage::new(StageKind::Cooking, capacity, Decimal::from(60)).unwrap()
    }

    fn items(codes: &[&str]) -> Vec<Item> {
        codes.iter().map(|c| Item::parse(c).unwrap()).collect()
    }

    fn burgers(count: usize) -> Vec<Item> {
        (0..count).map(|_| Item::parse("BLT").unwrap()).collect()
    }

    #[test]
    fn test_create_stage() {
        let stage = cooking(4);

        assert_eq!(stage.kind(), StageKind::Cooking);
        assert_eq!(stage.capacity(), 4);
        assert_eq!(stage.task_duration(), Decimal::from(60));
        assert_eq!(stage.committed_slots(), &[None, None, None, None]);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        assert!(matches!(
            Stage::new(StageKind::Cooking, 0, Decimal::from(60)),
            Err(KitchenError::Validation(_))
        ));
    }

    #[test]
    fn test_allocate_sequence() {
        let mut slots = vec![None; 4];
        let d = Decimal::from(60);

        assert_eq!(allocate(&mut slots, Decimal::ZERO, d), Decimal::from(60));

        // 填滿剩餘槽位，仍可並行
        allocate(&mut slots, Decimal::ZERO, d);
        allocate(&mut slots, Decimal::ZERO, d);
        assert_eq!(allocate(&mut slots, Decimal::ZERO, d), Decimal::from(60));

        // 槽位已滿，需等待前一個品項
        assert_eq!(allocate(&mut slots, Decimal::ZERO, d), Decimal::from(120));

        // 30 秒後到達的新品項
        assert_eq!(allocate(&mut slots, Decimal::from(30), d), Decimal::from(90));
    }

    #[test]
    fn test_propose_three_items_fit_idle_slots() {
        let stage = cooking(4);
        let proposal = stage.propose(Decimal::ZERO, &items(&["BLT", "LT", "VLT"]));

        assert_eq!(proposal.duration, Decimal::from(60));
    }

    #[test]
    fn test_propose_overflow_waits() {
        let stage = cooking(4);
        let proposal = stage.propose(Decimal::ZERO, &burgers(5));

        assert_eq!(proposal.duration, Decimal::from(120));
    }

    #[test]
    fn test_propose_does_not_mutate() {
        let stage = cooking(2);
        let before = stage.clone();

        let proposal = stage.propose(Decimal::ZERO, &burgers(3));
        assert_eq!(stage, before);
        assert_eq!(
            proposal.slots(),
            &[Some(Decimal::from(120)), Some(Decimal::from(60))]
        );
    }

    #[test]
    fn test_commit_then_follow_up_order() {
        let mut stage = cooking(4);
        let first = stage.propose(Decimal::ZERO, &items(&["BLT", "LT", "VLT"]));
        stage.commit(first);

        let second = stage.propose(Decimal::ONE, &items(&["VLT", "VT", "BLT", "LT", "VLT"]));
        assert_eq!(second.duration, Decimal::from(120));
    }

    #[test]
    fn test_discarded_proposal_leaves_schedule() {
        let mut stage = cooking(1);
        stage.commit(stage.propose(Decimal::ZERO, &burgers(1)));
        let committed = stage.committed_slots().to_vec();

        let _ = stage.propose(Decimal::ZERO, &burgers(3));
        assert_eq!(stage.committed_slots(), committed.as_slice());

        // 再次試算得到相同結果
        let again = stage.propose(Decimal::ZERO, &burgers(1));
        assert_eq!(again.duration, Decimal::from(120));
    }

    #[test]
    fn test_empty_order_takes_no_time() {
        let stage = cooking(2);
        let proposal = stage.propose(Decimal::ZERO, &[]);

        assert_eq!(proposal.duration, Decimal::ZERO);
        assert_eq!(proposal.slots(), stage.committed_slots());
    }

    #[rstest]
    #[case(0, 160)]
    #[case(40, 120)]
    #[case(100, 60)]
    #[case(250, 60)]
    fn test_wait_time(#[case] arrival: i64, #[case] expected: i64) {
        // 單一槽位在 100 秒完成
        let mut stage = cooking(1);
        stage.commit(StageProposal {
            slots: vec![Some(Decimal::from(100))],
            duration: Decimal::ZERO,
        });

        let proposal = stage.propose(Decimal::from(arrival), &burgers(1));
        assert_eq!(proposal.duration, Decimal::from(expected));
    }

    proptest! {
        /// 容量內的品項皆無需等待；超出一個則等待一輪
        #[test]
        fn prop_capacity_monotonicity(capacity in 1usize..16, minutes in 1i64..30, t in 0i64..10_000) {
            let d = Decimal::from(minutes * 60);
            let stage = Stage::new(StageKind::Assembling, capacity, d).unwrap();
            let t = Decimal::from(t);

            prop_assert_eq!(stage.propose(t, &burgers(capacity)).duration, d);
            prop_assert_eq!(stage.propose(t, &burgers(capacity + 1)).duration, d + d);
        }

        /// 相同狀態下試算結果必定相同
        #[test]
        fn prop_propose_is_deterministic(capacity in 1usize..8, count in 0usize..20, t in 0i64..1_000) {
            let stage = cooking(capacity);
            let t = Decimal::from(t);

            prop_assert_eq!(stage.propose(t, &burgers(count)), stage.propose(t, &burgers(count)));
        }
    }
}
