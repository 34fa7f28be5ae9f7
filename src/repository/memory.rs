// ==========================================
// 托育预约排程引擎 - 内存仓储实现
// ==========================================
// 职责: 三个 Repository Trait 的内存参考实现
// 用途: 集成测试与本地演示;生产环境由远端存储适配器替换
// 红线: create 在持锁临界区内完成容量校验,模拟单写者事务
// ==========================================

use crate::domain::booking::StudentSlot;
use crate::domain::slot::SlotOccurrence;
use crate::domain::subscription::PackageSubscription;
use crate::domain::types::BookingStatus;
use crate::repository::booking_repo::{BookingRepository, NewStudentSlot};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::slot_repo::{SlotPage, SlotRepository};
use crate::repository::subscription_repo::SubscriptionRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

// ==========================================
// InMemorySlotRepository
// ==========================================
// 注: fail_dates 用于注入单日查询失败,驱动 UncheckedDate
// 与单调吸收的测试场景;每次失败消耗一次注入。
pub struct InMemorySlotRepository {
    occurrences: Mutex<Vec<SlotOccurrence>>,
    fail_dates: Mutex<HashSet<NaiveDate>>,
}

impl InMemorySlotRepository {
    pub fn new(occurrences: Vec<SlotOccurrence>) -> Self {
        Self {
            occurrences: Mutex::new(occurrences),
            fail_dates: Mutex::new(HashSet::new()),
        }
    }

    /// 注入一次性查询失败 (下次命中该日期时返回 TransientUnavailable)
    pub fn inject_failure(&self, date: NaiveDate) {
        self.fail_dates.lock().unwrap().insert(date);
    }
}

#[async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn query(
        &self,
        _student_id: &str,
        date: NaiveDate,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<SlotPage> {
        if self.fail_dates.lock().unwrap().remove(&date) {
            return Err(RepositoryError::TransientUnavailable(format!(
                "slot query failed for {}",
                date
            )));
        }

        // 返回全部模板,固定日期/星期规则的过滤由引擎负责;
        // 这里只做分页切片
        let all = self.occurrences.lock().unwrap().clone();
        let total_count = all.len();
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        let items = all
            .into_iter()
            .skip(page_index * page_size)
            .take(page_size)
            .collect();
        Ok(SlotPage {
            items,
            total_count,
            total_pages,
        })
    }

    async fn find_occurrence(
        &self,
        occurrence_id: &str,
    ) -> RepositoryResult<Option<SlotOccurrence>> {
        let all = self.occurrences.lock().unwrap();
        Ok(all.iter().find(|o| o.occurrence_id == occurrence_id).cloned())
    }
}

// ==========================================
// InMemorySubscriptionRepository
// ==========================================
pub struct InMemorySubscriptionRepository {
    subscriptions: Mutex<Vec<PackageSubscription>>,
}

impl InMemorySubscriptionRepository {
    pub fn new(subscriptions: Vec<PackageSubscription>) -> Self {
        Self {
            subscriptions: Mutex::new(subscriptions),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn list_by_student(
        &self,
        student_id: &str,
    ) -> RepositoryResult<Vec<PackageSubscription>> {
        // 保持插入顺序返回,"首个 Active"决选依赖该顺序
        let all = self.subscriptions.lock().unwrap();
        Ok(all
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }
}

// ==========================================
// InMemoryBookingRepository
// ==========================================
pub struct InMemoryBookingRepository {
    slots: Mutex<Vec<StudentSlot>>,
    capacities: Mutex<HashMap<String, u32>>, // occurrence_id → 容量上限
    timeframes: Mutex<HashMap<String, crate::domain::slot::Timeframe>>,
    create_calls: AtomicUsize,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            capacities: Mutex::new(HashMap::new()),
            timeframes: Mutex::new(HashMap::new()),
            create_calls: AtomicUsize::new(0),
        }
    }

    /// 登记模板容量与时段快照来源
    ///
    /// create 依据这里的容量做写入侧裁决;未登记的模板视作不限容量。
    pub fn register_occurrence(&self, occurrence: &SlotOccurrence) {
        self.capacities
            .lock()
            .unwrap()
            .insert(occurrence.occurrence_id.clone(), occurrence.capacity);
        self.timeframes
            .lock()
            .unwrap()
            .insert(occurrence.occurrence_id.clone(), occurrence.timeframe.clone());
    }

    /// create 被调用的次数 (测试用,验证前置校验短路)
    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// 测试用: 直接播种一条指定状态的预约记录
    ///
    /// Completed/NoShow 在生产中归外部批处理,引擎路径从不写入;
    /// 这里只为容量与取消守卫的测试场景造数。
    pub fn seed_slot(&self, slot: StudentSlot) {
        self.slots.lock().unwrap().push(slot);
    }

    /// 测试用: 读取预约记录快照
    pub fn snapshot(&self) -> Vec<StudentSlot> {
        self.slots.lock().unwrap().clone()
    }
}

impl Default for InMemoryBookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, new_slot: NewStudentSlot) -> RepositoryResult<StudentSlot> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        // 单写者临界区: 容量校验与写入在同一把锁内完成
        let mut slots = self.slots.lock().unwrap();

        if let Some(&capacity) = self
            .capacities
            .lock()
            .unwrap()
            .get(&new_slot.occurrence_id)
        {
            let active = slots
                .iter()
                .filter(|s| {
                    s.occurrence_id == new_slot.occurrence_id
                        && s.date == new_slot.date
                        && s.status.occupies_capacity()
                })
                .count() as u32;
            if active >= capacity {
                return Err(RepositoryError::Conflict(format!(
                    "capacity exhausted: occurrence_id={} date={} capacity={}",
                    new_slot.occurrence_id, new_slot.date, capacity
                )));
            }
        }

        let timeframe = self
            .timeframes
            .lock()
            .unwrap()
            .get(&new_slot.occurrence_id)
            .cloned();

        let slot = StudentSlot {
            slot_id: Uuid::new_v4().to_string(),
            student_id: new_slot.student_id,
            occurrence_id: new_slot.occurrence_id,
            date: new_slot.date,
            status: BookingStatus::Booked,
            room_id: new_slot.room_id,
            timeframe,
            parent_note: new_slot.parent_note,
        };
        slots.push(slot.clone());
        Ok(slot)
    }

    async fn cancel(&self, slot_id: &str, student_id: &str) -> RepositoryResult<()> {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots
            .iter_mut()
            .find(|s| s.slot_id == slot_id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "StudentSlot".to_string(),
                id: slot_id.to_string(),
            })?;
        if slot.student_id != student_id {
            return Err(RepositoryError::Forbidden(format!(
                "slot {} does not belong to student {}",
                slot_id, student_id
            )));
        }
        // 终态迁移,不删记录
        slot.status = BookingStatus::Cancelled;
        Ok(())
    }

    async fn find_slot(
        &self,
        slot_id: &str,
        student_id: &str,
    ) -> RepositoryResult<Option<StudentSlot>> {
        let slots = self.slots.lock().unwrap();
        Ok(slots
            .iter()
            .find(|s| s.slot_id == slot_id && s.student_id == student_id)
            .cloned())
    }

    async fn count_active(
        &self,
        occurrence_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<u32> {
        let slots = self.slots.lock().unwrap();
        Ok(slots
            .iter()
            .filter(|s| {
                s.occurrence_id == occurrence_id
                    && s.date == date
                    && s.status.occupies_capacity()
            })
            .count() as u32)
    }
}
