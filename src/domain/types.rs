// ==========================================
// 托育预约排程引擎 - 领域类型定义
// ==========================================
// 职责: 定义状态枚举与时间窗口分类
// 红线: 状态是枚举制,不是字符串约定
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 时间窗口分类 (Time Window)
// ==========================================
// 由 (日期, 时段, 当前时刻) 按需推导,不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeWindow {
    Past,     // 已结束
    Current,  // 进行中
    Upcoming, // 未开始
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::Past => write!(f, "PAST"),
            TimeWindow::Current => write!(f, "CURRENT"),
            TimeWindow::Upcoming => write!(f, "UPCOMING"),
        }
    }
}

// ==========================================
// 预约状态 (Booking Status)
// ==========================================
// 红线: Booked→Cancelled 只能经由 CancellationService;
//       Completed/NoShow 由外部批处理产生,本引擎从不写入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,      // 已预约
    Completed,   // 已完成(外部批处理)
    Cancelled,   // 已取消
    NoShow,      // 未到场(外部批处理)
    Rescheduled, // 已改期
}

impl BookingStatus {
    /// 该状态是否占用时段容量
    ///
    /// # 规则
    /// - 有效容量 = capacity - count(status ∈ {Booked, Completed})
    /// - Cancelled/NoShow/Rescheduled 不占容量
    pub fn occupies_capacity(&self) -> bool {
        matches!(self, BookingStatus::Booked | BookingStatus::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Booked => write!(f, "BOOKED"),
            BookingStatus::Completed => write!(f, "COMPLETED"),
            BookingStatus::Cancelled => write!(f, "CANCELLED"),
            BookingStatus::NoShow => write!(f, "NO_SHOW"),
            BookingStatus::Rescheduled => write!(f, "RESCHEDULED"),
        }
    }
}

// ==========================================
// 套餐订阅状态 (Subscription Status)
// ==========================================
// 只有 Active 订阅可用于预约
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Active,   // 生效中
    Inactive, // 未生效
    Expired,  // 已过期
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "ACTIVE"),
            SubscriptionStatus::Inactive => write!(f, "INACTIVE"),
            SubscriptionStatus::Expired => write!(f, "EXPIRED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupies_capacity() {
        assert!(BookingStatus::Booked.occupies_capacity());
        assert!(BookingStatus::Completed.occupies_capacity());
        assert!(!BookingStatus::Cancelled.occupies_capacity());
        assert!(!BookingStatus::NoShow.occupies_capacity());
        assert!(!BookingStatus::Rescheduled.occupies_capacity());
    }

    #[test]
    fn test_status_serde_format() {
        // 序列化格式与远端存储保持 SCREAMING_SNAKE_CASE 一致
        let json = serde_json::to_string(&BookingStatus::NoShow).unwrap();
        assert_eq!(json, "\"NO_SHOW\"");
        let back: BookingStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(back, BookingStatus::Cancelled);
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeWindow::Upcoming.to_string(), "UPCOMING");
        assert_eq!(SubscriptionStatus::Active.to_string(), "ACTIVE");
    }
}
