// ==========================================
// 托育预约排程引擎 - 引擎层
// ==========================================
// 职责: 实现预约业务规则引擎
// 红线: Engine 不碰持久化细节,所有状态经 Repository 接口;
//       无内部长生命周期状态,无内部重试
// ==========================================

pub mod availability;
pub mod booking;
pub mod bulk_planner;
pub mod cancellation;
pub mod error;
pub mod package_validator;
pub mod repositories;
pub mod time_window;

// 重导出核心引擎
pub use availability::{
    AvailabilityAggregator, AvailabilityScan, DateRange, ScanSession,
};
pub use booking::{BookingOrchestrator, BookingRequest};
pub use bulk_planner::{
    expand_dates, BulkBookingFailure, BulkBookingOutcome, BulkBookingPlanner, BulkBookingRequest,
};
pub use cancellation::CancellationService;
pub use error::{BookingError, BookingResult};
pub use package_validator::PackageValidator;
pub use repositories::BookingRepositories;
pub use time_window::TimeWindowClassifier;
