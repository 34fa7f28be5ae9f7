// ==========================================
// 托育预约排程引擎 - 数据仓储层
// ==========================================
// 职责: 定义远端存储的窄查询/命令接口与错误分类
// 红线: Repository 不含业务规则;引擎不拼查询条件,
//       字段形态在实现侧规范化后才进入引擎
// ==========================================

pub mod booking_repo;
pub mod error;
pub mod memory;
pub mod slot_repo;
pub mod subscription_repo;

// 重导出核心类型
pub use booking_repo::{BookingRepository, NewStudentSlot};
pub use error::{RepositoryError, RepositoryResult};
pub use memory::{
    InMemoryBookingRepository, InMemorySlotRepository, InMemorySubscriptionRepository,
};
pub use slot_repo::{SlotPage, SlotRepository};
pub use subscription_repo::SubscriptionRepository;
