// ==========================================
// 托育预约排程引擎 - 核心库
// ==========================================
// 系统定位: 时段可用性与预约决策引擎
// 边界: 界面渲染/钱包支付/文件上传/通知/鉴权均为外部协作方
// 时区红线: 所有日期时间运算固定锚定 UTC+7
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 外部存储接口
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎调优参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{BookingStatus, SubscriptionStatus, TimeWindow};

// 领域实体
pub use domain::{
    DateAvailability, MonthAvailability, PackageSubscription, RequiredSchedule, SlotOccurrence,
    StudentSlot, Timeframe,
};

// 引擎
pub use engine::{
    AvailabilityAggregator, AvailabilityScan, BookingError, BookingOrchestrator,
    BookingRepositories, BookingRequest, BookingResult, BulkBookingOutcome, BulkBookingPlanner,
    BulkBookingRequest, CancellationService, DateRange, PackageValidator, ScanSession,
    TimeWindowClassifier,
};

// 配置
pub use config::{EngineConfig, SERVICE_UTC_OFFSET_HOURS};

// API
pub use api::BookingApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "托育预约排程引擎";
