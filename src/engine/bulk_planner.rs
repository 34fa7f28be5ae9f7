// ==========================================
// 托育预约排程引擎 - 批量预约规划器
// ==========================================
// 职责: 把周期性请求 (日期区间 × 星期集合) 展开为具体日期,
//       逐日独立驱动 BookingOrchestrator
// 红线: 尽力而为的批处理,不是事务;逐日成败分别记录,
//       两个清单总是一并返回,绝无"全有或全无"
// ==========================================

use crate::domain::booking::StudentSlot;
use crate::engine::booking::{BookingOrchestrator, BookingRequest};
use crate::engine::error::BookingResult;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

// ==========================================
// BulkBookingRequest - 批量预约请求
// ==========================================
#[derive(Debug, Clone)]
pub struct BulkBookingRequest {
    pub student_id: String,
    pub occurrence_id: String,
    pub subscription_id: String,
    pub start_date: NaiveDate,        // 闭区间起点
    pub end_date: NaiveDate,          // 闭区间终点
    pub weekdays: BTreeSet<u8>,       // 0=周日..6=周六
    pub parent_note: Option<String>,
}

// ==========================================
// BulkBookingOutcome - 批量预约结果
// ==========================================
#[derive(Debug)]
pub struct BulkBookingOutcome {
    pub booked: Vec<StudentSlot>,
    pub failed: Vec<BulkBookingFailure>,
}

/// 单日失败明细
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkBookingFailure {
    pub date: NaiveDate,
    pub reason: String,
}

// ==========================================
// BulkBookingPlanner - 批量预约规划器
// ==========================================
pub struct BulkBookingPlanner<'a> {
    orchestrator: &'a BookingOrchestrator,
}

impl<'a> BulkBookingPlanner<'a> {
    pub fn new(orchestrator: &'a BookingOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// 展开并逐日预约
    ///
    /// # 规则
    /// 1. [start_date, end_date] 双边闭区间展开,按星期集合过滤
    /// 2. 每个候选日期独立调用 book(),互不影响
    /// 3. 成功入 booked,失败入 failed (带日期与原因),全部返回
    pub async fn plan(&self, request: BulkBookingRequest) -> BookingResult<BulkBookingOutcome> {
        let dates = expand_dates(request.start_date, request.end_date, &request.weekdays);
        info!(
            student_id = %request.student_id,
            occurrence_id = %request.occurrence_id,
            start = %request.start_date,
            end = %request.end_date,
            candidates = dates.len(),
            "批量预约展开完成"
        );

        let mut booked = Vec::new();
        let mut failed = Vec::new();
        for date in dates {
            let booking = BookingRequest {
                student_id: request.student_id.clone(),
                occurrence_id: request.occurrence_id.clone(),
                date,
                room_id: None,
                subscription_id: Some(request.subscription_id.clone()),
                parent_note: request.parent_note.clone(),
            };
            match self.orchestrator.book(booking).await {
                Ok(slot) => booked.push(slot),
                Err(err) => {
                    warn!(date = %date, error = %err, "批量预约单日失败");
                    failed.push(BulkBookingFailure {
                        date,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            booked = booked.len(),
            failed = failed.len(),
            "批量预约完成"
        );
        Ok(BulkBookingOutcome { booked, failed })
    }
}

/// 把闭区间按星期集合展开为升序日期列表
///
/// start > end 或星期集合为空时返回空列表。
pub fn expand_dates(start: NaiveDate, end: NaiveDate, weekdays: &BTreeSet<u8>) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut d = start;
    while d <= end {
        let weekday = d.weekday().num_days_from_sunday() as u8;
        if weekdays.contains(&weekday) {
            dates.push(d);
        }
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    dates
}
