// ==========================================
// 托育预约排程引擎 - 套餐订阅领域模型
// ==========================================
// 职责: 定义 PackageSubscription (学员的套餐权益)
// ==========================================

use crate::domain::types::SubscriptionStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// PackageSubscription - 套餐订阅
// ==========================================
// 学员名下的一份套餐权益。只有 Active 状态可用于预约。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSubscription {
    pub subscription_id: String,    // 订阅ID
    pub student_id: String,         // 学员ID
    pub package_id: String,         // 套餐ID
    pub status: SubscriptionStatus, // 订阅状态
    pub total_slots: u32,           // 套餐总课时
    pub used_slots: u32,            // 已用课时
}

impl PackageSubscription {
    /// 是否生效中
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// 剩余课时 (已用超出总量时取 0)
    pub fn remaining_slots(&self) -> u32 {
        self.total_slots.saturating_sub(self.used_slots)
    }
}
