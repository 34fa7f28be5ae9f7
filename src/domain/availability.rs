// ==========================================
// 托育预约排程引擎 - 可用性领域模型
// ==========================================
// 职责: 定义逐日/逐月可用性视图
// 红线: 查询失败的日期标记 resolved=false (UncheckedDate),
//       绝不伪装成 slot_count=0;已解析结果不可被失败降级
// ==========================================

use crate::domain::slot::SlotOccurrence;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DateAvailability - 单日可用性
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateAvailability {
    pub date: NaiveDate,                 // 日历日期
    pub resolved: bool,                  // 是否成功解析 (false = UncheckedDate)
    pub slot_count: usize,               // 匹配的时段模板数 (仅 resolved 时有意义)
    pub candidates: Vec<SlotOccurrence>, // 匹配的时段模板
}

impl DateAvailability {
    /// 已解析的单日结果
    pub fn resolved(date: NaiveDate, candidates: Vec<SlotOccurrence>) -> Self {
        Self {
            date,
            resolved: true,
            slot_count: candidates.len(),
            candidates,
        }
    }

    /// 查询失败的单日结果 (软状态,非错误)
    ///
    /// 调用方不得把 UncheckedDate 当作"无可用时段"。
    pub fn unchecked(date: NaiveDate) -> Self {
        Self {
            date,
            resolved: false,
            slot_count: 0,
            candidates: Vec::new(),
        }
    }

    /// 单调吸收一次复查结果
    ///
    /// # 规则
    /// 1. 本地未解析 + 复查已解析 → 采纳复查结果
    /// 2. 本地已解析 + 复查未解析 → 保留本地 (不降级)
    /// 3. 双方都已解析 → 采纳较新的复查结果
    pub fn absorb(&mut self, other: DateAvailability) {
        debug_assert_eq!(self.date, other.date);
        if other.resolved || !self.resolved {
            *self = other;
        }
    }
}

// ==========================================
// MonthAvailability - 单月可用性
// ==========================================
// AvailabilityScan 每前进一步产出一个月的结果,近月在前
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthAvailability {
    pub year: i32,                    // 年
    pub month: u32,                   // 月 (1..=12)
    pub dates: Vec<DateAvailability>, // 该月落在扫描区间内的日期,升序
}

impl MonthAvailability {
    /// 该月内未能解析的日期数
    pub fn unchecked_count(&self) -> usize {
        self.dates.iter().filter(|d| !d.resolved).count()
    }
}
