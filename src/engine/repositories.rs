// ==========================================
// 托育预约排程引擎 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合预约引擎所需的全部 Repository 句柄
// 目标: 减少各引擎构造函数的参数数量,便于测试时整体替换
// ==========================================

use std::sync::Arc;

use crate::repository::{BookingRepository, SlotRepository, SubscriptionRepository};

/// 预约引擎仓储集合
///
/// 三个外部存储接口的 Arc 句柄打包成一个结构体参数。
#[derive(Clone)]
pub struct BookingRepositories {
    /// 时段模板仓储
    pub slot_repo: Arc<dyn SlotRepository>,
    /// 套餐订阅仓储
    pub subscription_repo: Arc<dyn SubscriptionRepository>,
    /// 预约记录仓储
    pub booking_repo: Arc<dyn BookingRepository>,
}

impl BookingRepositories {
    /// 创建新的仓储集合
    pub fn new(
        slot_repo: Arc<dyn SlotRepository>,
        subscription_repo: Arc<dyn SubscriptionRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            slot_repo,
            subscription_repo,
            booking_repo,
        }
    }
}
