// ==========================================
// 托育预约排程引擎 - 可用性聚合引擎
// ==========================================
// 职责: 按月惰性扫描日期区间,产出逐日容量候选
// 红线: 同批日期并发、批间串行 (有界扇出,不做无界并行);
//       查询失败的日期标记 UncheckedDate,解析结果单调不降级;
//       扫描不可中途续传,取消后重发一律从头开始
// ==========================================

use crate::config::EngineConfig;
use crate::domain::availability::{DateAvailability, MonthAvailability};
use crate::domain::slot::SlotOccurrence;
use crate::engine::error::{BookingError, BookingResult};
use crate::repository::slot_repo::SlotRepository;
use chrono::{Datelike, NaiveDate};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// DateRange - 扫描区间 (双边闭区间)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> BookingResult<Self> {
        if start > end {
            return Err(BookingError::InvalidRequest(format!(
                "日期区间起点晚于终点: start={} end={}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }
}

// ==========================================
// ScanSession - 扫描会话
// ==========================================
// 调用方持有的显式会话值,自带取消标志。
// 取代旧实现里"是否有扫描在飞"的模块级全局布尔。
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    cancelled: Arc<AtomicBool>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消;正在进行的批完成后扫描即停止
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ==========================================
// AvailabilityAggregator - 可用性聚合引擎
// ==========================================
pub struct AvailabilityAggregator {
    slot_repo: Arc<dyn SlotRepository>,
    config: EngineConfig,
}

impl AvailabilityAggregator {
    pub fn new(slot_repo: Arc<dyn SlotRepository>, config: EngineConfig) -> Self {
        Self { slot_repo, config }
    }

    /// 发起一次可用性扫描
    ///
    /// 返回由调用方驱动的惰性月序列 (近月在前)。
    /// 重复发起总是从区间起点重新开始,不续传。
    ///
    /// # 参数
    /// - student_id: 学员ID
    /// - range: 扫描区间 (闭区间)
    /// - session: 调用方持有的扫描会话
    pub fn scan(&self, student_id: &str, range: DateRange, session: ScanSession) -> AvailabilityScan {
        info!(
            student_id = %student_id,
            start = %range.start,
            end = %range.end,
            batch_width = self.config.scan_batch_width,
            "发起可用性扫描"
        );
        AvailabilityScan {
            slot_repo: Arc::clone(&self.slot_repo),
            config: self.config.clone(),
            student_id: student_id.to_string(),
            range,
            session,
            cursor: Some(range.start),
            resolved: HashMap::new(),
        }
    }
}

// ==========================================
// AvailabilityScan - 惰性扫描序列
// ==========================================
pub struct AvailabilityScan {
    slot_repo: Arc<dyn SlotRepository>,
    config: EngineConfig,
    student_id: String,
    range: DateRange,
    session: ScanSession,
    cursor: Option<NaiveDate>, // 下一个待扫日期;None 表示扫描结束
    resolved: HashMap<NaiveDate, DateAvailability>,
}

impl AvailabilityScan {
    /// 推进到下一个月并产出该月结果
    ///
    /// # 规则
    /// 1. 会话已取消或区间耗尽 → None (有限序列)
    /// 2. 该月落在区间内的日期切成固定批宽;批内 join_all 并发,
    ///    第 N+1 批在第 N 批全部落地后才启动
    /// 3. 单日查询失败 → resolved=false,不中断整月
    /// 4. 结果经单调吸收落入会话内缓存
    pub async fn next_month(&mut self) -> Option<MonthAvailability> {
        let start = self.cursor?;
        if self.session.is_cancelled() {
            self.cursor = None;
            return None;
        }

        // 本月落在区间内的日期 (升序)
        let month_end = last_day_of_month(start).min(self.range.end);
        let mut dates = Vec::new();
        let mut d = start;
        while d <= month_end {
            dates.push(d);
            d = d.succ_opt()?;
        }

        // 批内并发、批间串行
        for batch in dates.chunks(self.config.scan_batch_width) {
            if self.session.is_cancelled() {
                debug!(month = start.month(), "扫描会话已取消,停止后续批次");
                self.cursor = None;
                return None;
            }
            let results = {
                let futures = batch.iter().map(|&date| {
                    resolve_date(
                        &self.slot_repo,
                        &self.student_id,
                        date,
                        self.config.slot_page_size,
                    )
                });
                join_all(futures).await
            };
            for availability in results {
                self.resolved
                    .entry(availability.date)
                    .and_modify(|existing| existing.absorb(availability.clone()))
                    .or_insert(availability);
            }
        }

        let month = MonthAvailability {
            year: start.year(),
            month: start.month(),
            dates: dates
                .iter()
                .map(|d| {
                    self.resolved
                        .get(d)
                        .cloned()
                        .unwrap_or_else(|| DateAvailability::unchecked(*d))
                })
                .collect(),
        };

        info!(
            year = month.year,
            month = month.month,
            dates = month.dates.len(),
            unchecked = month.unchecked_count(),
            "单月扫描完成"
        );

        // 推进游标到下月首日
        let next = first_day_of_next_month(start);
        self.cursor = if next > self.range.end { None } else { Some(next) };
        Some(month)
    }

    /// 复查单个日期并单调吸收结果
    ///
    /// 已解析的日期不会被失败的复查降级回未解析。
    pub async fn recheck(&mut self, date: NaiveDate) -> DateAvailability {
        let fresh = resolve_date(
            &self.slot_repo,
            &self.student_id,
            date,
            self.config.slot_page_size,
        )
        .await;
        let entry = self
            .resolved
            .entry(date)
            .or_insert_with(|| DateAvailability::unchecked(date));
        entry.absorb(fresh);
        entry.clone()
    }

    /// 当前会话内某日期的缓存结果
    pub fn date_result(&self, date: NaiveDate) -> Option<&DateAvailability> {
        self.resolved.get(&date)
    }
}

/// 解析单个日期: 逐页拉取并按固定日期/星期规则过滤
async fn resolve_date(
    slot_repo: &Arc<dyn SlotRepository>,
    student_id: &str,
    date: NaiveDate,
    page_size: usize,
) -> DateAvailability {
    let mut candidates: Vec<SlotOccurrence> = Vec::new();
    let mut page_index = 0usize;
    loop {
        let page = match slot_repo.query(student_id, date, page_index, page_size).await {
            Ok(page) => page,
            Err(err) => {
                // 单日失败是软状态,不是错误;绝不伪装成"无可用"
                warn!(date = %date, error = %err, "单日时段查询失败,标记为未解析");
                return DateAvailability::unchecked(date);
            }
        };
        let exhausted = page.items.is_empty() || page_index + 1 >= page.total_pages;
        candidates.extend(page.items.into_iter().filter(|occ| occ.matches_date(date)));
        if exhausted {
            break;
        }
        page_index += 1;
    }
    debug!(date = %date, count = candidates.len(), "单日时段解析完成");
    DateAvailability::resolved(date, candidates)
}

/// 该日期所在月份的最后一天
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_next_month(date).pred_opt().unwrap_or(date)
}

/// 下月首日
fn first_day_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // 任意年份的 1 号总是存在
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
