// ==========================================
// 托育预约排程引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、匹配规则
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod availability;
pub mod booking;
pub mod slot;
pub mod subscription;
pub mod types;

// 重导出核心类型
pub use availability::{DateAvailability, MonthAvailability};
pub use booking::StudentSlot;
pub use slot::{RequiredSchedule, SlotOccurrence, Timeframe};
pub use subscription::PackageSubscription;
pub use types::{BookingStatus, SubscriptionStatus, TimeWindow};
