// ==========================================
// 托育预约排程引擎 - 时段领域模型
// ==========================================
// 职责: 定义时段模板 (SlotOccurrence) 与时间框 (Timeframe)
// 红线: 日期匹配规则只在这里定义,引擎层不得另行推导
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Timeframe - 时间框
// ==========================================
// 一天内的起止时刻对,不含日期。
// 起止时刻以远端存储原样的 "HH:MM" 或 "HH:MM:SS" 字符串承载,
// 规范化在 TimeWindowClassifier 内完成。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub name: String,       // 时段名称 (如 "上午班")
    pub start_time: String, // 开始时刻 HH:MM[:SS]
    pub end_time: String,   // 结束时刻 HH:MM[:SS],约定 start < end
}

impl Timeframe {
    pub fn new(name: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            name: name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

// ==========================================
// RequiredSchedule - 时段的日期约束
// ==========================================
// 用于 DateSlotMismatch 错误的可解释性输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredSchedule {
    /// 仅限固定日期
    FixedDate(NaiveDate),
    /// 仅限指定星期 (0=周日..6=周六)
    Weekdays(Vec<u8>),
}

impl fmt::Display for RequiredSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredSchedule::FixedDate(d) => write!(f, "fixed_date={}", d),
            RequiredSchedule::Weekdays(ws) => {
                let joined: Vec<String> = ws.iter().map(|w| w.to_string()).collect();
                write!(f, "weekdays=[{}]", joined.join(","))
            }
        }
    }
}

// ==========================================
// SlotOccurrence - 时段模板
// ==========================================
// 一个可预约的 (时间框 × 教室 × 固定日期或星期规则) 模板。
// 由外部系统维护,本引擎只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotOccurrence {
    pub occurrence_id: String,            // 时段模板ID
    pub timeframe: Timeframe,             // 当日起止时刻
    pub room_id: Option<String>,          // 教室ID (可空,落位由仓储决定)
    pub capacity: u32,                    // 容量上限
    pub fixed_date: Option<NaiveDate>,    // 固定日期 (优先生效)
    pub weekday_pattern: Option<Vec<u8>>, // 星期规则 0=周日..6=周六
    pub allowed_package_ids: Vec<String>, // 允许的套餐范围,空表示不限
}

impl SlotOccurrence {
    /// 判断日历日期是否匹配本模板
    ///
    /// # 规则
    /// 1. fixed_date 存在 → 仅精确相等的日期匹配
    /// 2. 否则 weekday_pattern 存在 → 日期的星期值在规则内即匹配
    /// 3. 两者都缺失 → 模板不可预约,任何日期都不匹配
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        if let Some(fixed) = self.fixed_date {
            return fixed == date;
        }
        if let Some(pattern) = &self.weekday_pattern {
            let weekday = date.weekday().num_days_from_sunday() as u8;
            return pattern.contains(&weekday);
        }
        false
    }

    /// 本模板的日期约束 (用于错误提示)
    ///
    /// # 返回
    /// - Some(RequiredSchedule): 固定日期或星期规则
    /// - None: 模板缺失约束,不可预约
    pub fn required_schedule(&self) -> Option<RequiredSchedule> {
        if let Some(fixed) = self.fixed_date {
            return Some(RequiredSchedule::FixedDate(fixed));
        }
        self.weekday_pattern
            .as_ref()
            .map(|p| RequiredSchedule::Weekdays(p.clone()))
    }

    /// 判断套餐是否在允许范围内 (空范围表示不限)
    pub fn allows_package(&self, package_id: &str) -> bool {
        self.allowed_package_ids.is_empty()
            || self.allowed_package_ids.iter().any(|p| p == package_id)
    }
}
