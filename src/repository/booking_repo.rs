// ==========================================
// 托育预约排程引擎 - 预约 Repository Trait
// ==========================================
// 职责: 定义预约记录的数据访问接口 (不含业务逻辑)
// 红线: create 是容量与原子性的唯一裁决点;
//       容量耗尽/并发冲突必须以 Conflict 拒绝,由引擎映射为 SlotFull
// ==========================================

use crate::domain::booking::StudentSlot;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// NewStudentSlot - 预约创建参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentSlot {
    pub student_id: String,          // 学员ID
    pub occurrence_id: String,       // 时段模板ID
    pub subscription_id: String,     // 使用的订阅ID
    pub room_id: Option<String>,     // 指定教室 (None 由仓储分配)
    pub date: NaiveDate,             // 预约日期
    pub parent_note: Option<String>, // 家长备注
}

// ==========================================
// BookingRepository Trait
// ==========================================
// 用途: 预约记录的创建/取消/查询 (外部协作方)
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 创建预约记录
    ///
    /// 实现方必须在单写者事务内做容量校验
    /// (有效占用 = count(status ∈ {Booked, Completed}))。
    ///
    /// # 返回
    /// - Ok(StudentSlot): 新预约 (status=Booked)
    /// - Err(Conflict): 容量耗尽或并发冲突
    async fn create(&self, new_slot: NewStudentSlot) -> RepositoryResult<StudentSlot>;

    /// 取消预约 (Booked→Cancelled 终态迁移,不删记录)
    ///
    /// # 返回
    /// - Err(NotFound): 预约不存在
    /// - Err(Forbidden): 预约不属于该学员
    async fn cancel(&self, slot_id: &str, student_id: &str) -> RepositoryResult<()>;

    /// 按ID查询学员的预约记录
    ///
    /// # 返回
    /// - Ok(None): 不存在或不属于该学员
    async fn find_slot(
        &self,
        slot_id: &str,
        student_id: &str,
    ) -> RepositoryResult<Option<StudentSlot>>;

    /// 统计某模板某日期的有效占用数
    ///
    /// 仅计 status ∈ {Booked, Completed};Cancelled 自取消起
    /// 不再计入,但不回溯修改历史报表。
    async fn count_active(
        &self,
        occurrence_id: &str,
        date: NaiveDate,
    ) -> RepositoryResult<u32>;
}
