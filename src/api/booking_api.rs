// ==========================================
// 托育预约排程引擎 - 预约业务接口
// ==========================================
// 职责: 在一套仓储句柄之上装配全部引擎,供界面层调用
// ==========================================

use crate::config::EngineConfig;
use crate::domain::booking::StudentSlot;
use crate::domain::subscription::PackageSubscription;
use crate::engine::availability::{AvailabilityAggregator, AvailabilityScan, DateRange, ScanSession};
use crate::engine::booking::{BookingOrchestrator, BookingRequest};
use crate::engine::bulk_planner::{BulkBookingOutcome, BulkBookingPlanner, BulkBookingRequest};
use crate::engine::cancellation::CancellationService;
use crate::engine::error::{BookingError, BookingResult};
use crate::engine::package_validator::PackageValidator;
use crate::engine::repositories::BookingRepositories;
use chrono::{DateTime, Utc};
use tracing::info;

// ==========================================
// BookingApi - 预约业务接口
// ==========================================
pub struct BookingApi {
    repos: BookingRepositories,
    config: EngineConfig,
    aggregator: AvailabilityAggregator,
    orchestrator: BookingOrchestrator,
    cancellation: CancellationService,
    validator: PackageValidator,
}

impl BookingApi {
    /// 在一套仓储句柄之上装配全部引擎
    pub fn new(repos: BookingRepositories, config: EngineConfig) -> Self {
        let aggregator =
            AvailabilityAggregator::new(repos.slot_repo.clone(), config.clone());
        let orchestrator = BookingOrchestrator::new(repos.clone());
        let cancellation = CancellationService::new(repos.clone());
        let validator = PackageValidator::new(repos.subscription_repo.clone());
        Self {
            repos,
            config,
            aggregator,
            orchestrator,
            cancellation,
            validator,
        }
    }

    /// 发起可用性扫描 (调用方驱动逐月取结果)
    pub fn scan_availability(
        &self,
        student_id: &str,
        range: DateRange,
        session: ScanSession,
    ) -> AvailabilityScan {
        self.aggregator.scan(student_id, range, session)
    }

    /// 静默校验学员套餐能否用于指定时段
    pub async fn validate_package(
        &self,
        student_id: &str,
        occurrence_id: &str,
    ) -> BookingResult<PackageSubscription> {
        let occurrence = self
            .repos
            .slot_repo
            .find_occurrence(occurrence_id)
            .await?
            .ok_or_else(|| BookingError::NotFound {
                entity: "SlotOccurrence".to_string(),
                id: occurrence_id.to_string(),
            })?;
        self.validator.validate(student_id, &occurrence).await
    }

    /// 提交单次预约
    pub async fn book(&self, request: BookingRequest) -> BookingResult<StudentSlot> {
        info!(
            student_id = %request.student_id,
            occurrence_id = %request.occurrence_id,
            date = %request.date,
            "收到预约请求"
        );
        self.orchestrator.book(request).await
    }

    /// 取消预约
    pub async fn cancel(
        &self,
        slot_id: &str,
        student_id: &str,
        now: DateTime<Utc>,
    ) -> BookingResult<()> {
        info!(slot_id = %slot_id, student_id = %student_id, "收到取消请求");
        self.cancellation.cancel(slot_id, student_id, now).await
    }

    /// 周期性批量预约
    pub async fn plan_recurring(
        &self,
        request: BulkBookingRequest,
    ) -> BookingResult<BulkBookingOutcome> {
        info!(
            student_id = %request.student_id,
            occurrence_id = %request.occurrence_id,
            "收到批量预约请求"
        );
        BulkBookingPlanner::new(&self.orchestrator).plan(request).await
    }

    /// 引擎配置 (只读)
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
