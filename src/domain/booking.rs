// ==========================================
// 托育预约排程引擎 - 预约记录领域模型
// ==========================================
// 职责: 定义 StudentSlot (一次已提交的预约)
// 红线: 预约记录只新增不硬删,取消是状态迁移
// ==========================================

use crate::domain::slot::Timeframe;
use crate::domain::types::BookingStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// StudentSlot - 预约记录
// ==========================================
// 学员对某时段模板在某具体日期上的一次预约。
// 仅由 BookingOrchestrator 创建;Booked→Cancelled 仅由
// CancellationService 触发;Completed/NoShow 归外部批处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSlot {
    pub slot_id: String,              // 预约ID
    pub student_id: String,           // 学员ID
    pub occurrence_id: String,        // 时段模板ID
    pub date: NaiveDate,              // 预约日期 (与模板约束一致)
    pub status: BookingStatus,        // 预约状态
    pub room_id: Option<String>,      // 落位教室 (仓储分配,可空)

    // ===== 快照字段 =====
    // 预约时从模板冗余,避免取消校验时反查模板;
    // 缺失时按 fail-open 策略归为 Upcoming (可取消)
    pub timeframe: Option<Timeframe>, // 时段起止时刻快照
    pub parent_note: Option<String>,  // 家长备注
}

impl StudentSlot {
    /// 是否处于已预约状态 (可取消的前提之一)
    pub fn is_booked(&self) -> bool {
        self.status == BookingStatus::Booked
    }
}
