// ==========================================
// 托育预约排程引擎 - 取消服务
// ==========================================
// 职责: 校验并提交预约取消
// 红线: 仅 status==Booked 且窗口 ∈ {Upcoming, Current} 可取消;
//       取消是 Booked→Cancelled 终态迁移,不删记录
// ==========================================

use crate::domain::types::{BookingStatus, TimeWindow};
use crate::engine::error::{BookingError, BookingResult};
use crate::engine::repositories::BookingRepositories;
use crate::engine::time_window::TimeWindowClassifier;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

// ==========================================
// CancellationService - 取消服务
// ==========================================
pub struct CancellationService {
    repos: BookingRepositories,
}

impl CancellationService {
    pub fn new(repos: BookingRepositories) -> Self {
        Self { repos }
    }

    /// 校验并提交取消
    ///
    /// # 流程
    /// 1. 定位学员名下的预约记录
    /// 2. 状态守卫: status != Booked → NotCancellable (与窗口无关)
    /// 3. 窗口守卫: 按快照时段分类,Past → NotCancellable
    /// 4. 提交仓储 cancel (Booked→Cancelled)
    ///
    /// # 参数
    /// - slot_id: 预约ID
    /// - student_id: 学员ID
    /// - now: 当前时刻 (UTC)
    pub async fn cancel(
        &self,
        slot_id: &str,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> BookingResult<()> {
        // === 步骤 1: 定位预约 ===
        let slot = self
            .repos
            .booking_repo
            .find_slot(slot_id, student_id)
            .await?
            .ok_or_else(|| BookingError::NotFound {
                entity: "StudentSlot".to_string(),
                id: slot_id.to_string(),
            })?;

        // === 步骤 2: 状态守卫 ===
        if slot.status != BookingStatus::Booked {
            return Err(BookingError::NotCancellable {
                slot_id: slot_id.to_string(),
                reason: format!("status={} 不是 BOOKED", slot.status),
            });
        }

        // === 步骤 3: 窗口守卫 ===
        // 时段快照缺失时按 fail-open 归为 Upcoming (可取消)
        let window =
            TimeWindowClassifier::classify(Some(slot.date), slot.timeframe.as_ref(), now);
        debug!(slot_id = %slot_id, date = %slot.date, window = %window, "取消窗口判定");
        if window == TimeWindow::Past {
            return Err(BookingError::NotCancellable {
                slot_id: slot_id.to_string(),
                reason: format!("时段已结束: date={} window=PAST", slot.date),
            });
        }

        // === 步骤 4: 提交仓储 ===
        self.repos.booking_repo.cancel(slot_id, student_id).await?;

        info!(
            slot_id = %slot_id,
            student_id = %student_id,
            date = %slot.date,
            "预约已取消"
        );
        Ok(())
    }
}
