// ==========================================
// 托育预约排程引擎 - 预约编排器
// ==========================================
// 职责: 校验并提交单次预约
// 红线: 所有前置校验在任何写入之前完成,失败即返回,无半成品状态;
//       容量裁决归仓储,Conflict 映射为 SlotFull 且绝不自动重试
//       (调用方应重跑可用性扫描后显式重试)
// ==========================================

use crate::domain::booking::StudentSlot;
use crate::domain::slot::SlotOccurrence;
use crate::engine::error::{BookingError, BookingResult};
use crate::engine::package_validator::PackageValidator;
use crate::engine::repositories::BookingRepositories;
use crate::repository::booking_repo::NewStudentSlot;
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

// ==========================================
// BookingRequest - 预约请求
// ==========================================
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub student_id: String,
    pub occurrence_id: String,
    pub date: NaiveDate,
    /// 指定教室;None 表示由仓储分配,容量裁决完全交给仓储
    pub room_id: Option<String>,
    /// 指定订阅;None 时经 PackageValidator 解析
    pub subscription_id: Option<String>,
    pub parent_note: Option<String>,
}

// ==========================================
// BookingOrchestrator - 预约编排器
// ==========================================
pub struct BookingOrchestrator {
    repos: BookingRepositories,
    validator: PackageValidator,
}

impl BookingOrchestrator {
    pub fn new(repos: BookingRepositories) -> Self {
        let validator = PackageValidator::new(repos.subscription_repo.clone());
        Self { repos, validator }
    }

    /// 校验并提交一次预约
    ///
    /// # 流程
    /// 1. 入参非空校验
    /// 2. 定位时段模板
    /// 3. 日期与模板约束一致性校验 (固定日期精确相等或星期命中)
    /// 4. 订阅解析 (未指定时走 PackageValidator,校验错误原样上抛)
    /// 5. 提交仓储 create;Conflict → SlotFull,不重试
    ///
    /// # 返回
    /// 新建的 StudentSlot;除此之外无任何副作用
    pub async fn book(&self, request: BookingRequest) -> BookingResult<StudentSlot> {
        // === 步骤 1: 入参校验 ===
        if request.student_id.trim().is_empty() {
            return Err(BookingError::InvalidRequest("student_id 为空".to_string()));
        }
        if request.occurrence_id.trim().is_empty() {
            return Err(BookingError::InvalidRequest("occurrence_id 为空".to_string()));
        }

        // === 步骤 2: 定位时段模板 ===
        let occurrence = self
            .repos
            .slot_repo
            .find_occurrence(&request.occurrence_id)
            .await?
            .ok_or_else(|| BookingError::NotFound {
                entity: "SlotOccurrence".to_string(),
                id: request.occurrence_id.clone(),
            })?;

        // === 步骤 3: 日期一致性校验 ===
        self.check_date_matches(&occurrence, request.date)?;
        debug!(
            occurrence_id = %occurrence.occurrence_id,
            date = %request.date,
            "日期与时段约束校验通过"
        );

        // === 步骤 4: 订阅解析 ===
        let subscription_id = match &request.subscription_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => {
                let chosen = self
                    .validator
                    .validate(&request.student_id, &occurrence)
                    .await?;
                chosen.subscription_id
            }
        };

        // === 步骤 5: 提交仓储 ===
        let new_slot = NewStudentSlot {
            student_id: request.student_id.clone(),
            occurrence_id: request.occurrence_id.clone(),
            subscription_id,
            room_id: request.room_id.clone(),
            date: request.date,
            parent_note: request.parent_note.clone(),
        };
        let created = match self.repos.booking_repo.create(new_slot).await {
            Ok(slot) => slot,
            Err(RepositoryError::Conflict(msg)) => {
                // 仓储是容量事实的唯一来源;满员不在引擎侧重试
                warn!(
                    occurrence_id = %request.occurrence_id,
                    date = %request.date,
                    detail = %msg,
                    "仓储拒绝写入: 时段已满"
                );
                return Err(BookingError::SlotFull {
                    occurrence_id: request.occurrence_id.clone(),
                    date: request.date,
                });
            }
            Err(other) => return Err(other.into()),
        };

        info!(
            slot_id = %created.slot_id,
            student_id = %created.student_id,
            occurrence_id = %created.occurrence_id,
            date = %created.date,
            "预约已提交"
        );
        Ok(created)
    }

    /// 日期必须满足模板的固定日期或星期规则
    fn check_date_matches(
        &self,
        occurrence: &SlotOccurrence,
        date: NaiveDate,
    ) -> BookingResult<()> {
        if occurrence.matches_date(date) {
            return Ok(());
        }
        match occurrence.required_schedule() {
            Some(required) => Err(BookingError::DateSlotMismatch {
                occurrence_id: occurrence.occurrence_id.clone(),
                date,
                required,
            }),
            // 固定日期与星期规则都缺失: 模板不可预约
            None => Err(BookingError::InvalidRequest(format!(
                "时段模板缺失日期约束,不可预约: occurrence_id={}",
                occurrence.occurrence_id
            ))),
        }
    }
}
