// ==========================================
// 托育预约排程引擎 - 时间窗口分类器
// ==========================================
// 职责: 判定 (日期, 时段) 相对 now 的 Past/Current/Upcoming
// 红线: 全函数,永不失败;缺失/畸形输入按 fail-open 归为 Upcoming
//       (这是明文策略: 排程界面绝不因单条坏数据阻塞整个日历)
// 红线: 起止时刻固定锚定 UTC+7,与调用方本地时区无关
// ==========================================

use crate::config::SERVICE_UTC_OFFSET_HOURS;
use crate::domain::slot::Timeframe;
use crate::domain::types::TimeWindow;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

// ==========================================
// TimeWindowClassifier - 纯函数工具类
// ==========================================
pub struct TimeWindowClassifier;

impl TimeWindowClassifier {
    /// 分类一次时段发生相对 now 的时间窗口
    ///
    /// # 规则
    /// 1. date 或 timeframe 缺失 → Upcoming (fail-open)
    /// 2. 起止时刻规范化为 HH:MM:SS (仅 HH:MM 时补 ":00"),解析失败 → Upcoming
    /// 3. 以固定 UTC+7 偏移把 (date, 时刻) 组合成瞬时
    /// 4. end < now → Past
    /// 5. start ≤ now ≤ end → Current (双边闭区间)
    /// 6. 否则 → Upcoming
    ///
    /// # 参数
    /// - date: 发生日期 (可能缺失)
    /// - timeframe: 当日起止时刻 (可能缺失)
    /// - now: 当前时刻 (UTC)
    pub fn classify(
        date: Option<NaiveDate>,
        timeframe: Option<&Timeframe>,
        now: DateTime<Utc>,
    ) -> TimeWindow {
        // 规则 1: 缺失输入 fail-open
        let (Some(date), Some(timeframe)) = (date, timeframe) else {
            return TimeWindow::Upcoming;
        };

        // 规则 2: 时刻规范化与解析
        let (Some(start), Some(end)) = (
            Self::parse_time_of_day(&timeframe.start_time),
            Self::parse_time_of_day(&timeframe.end_time),
        ) else {
            return TimeWindow::Upcoming;
        };

        // 规则 3: 锚定服务区固定偏移
        let Some(offset) = FixedOffset::east_opt(SERVICE_UTC_OFFSET_HOURS * 3600) else {
            return TimeWindow::Upcoming;
        };
        let (Some(start_at), Some(end_at)) = (
            date.and_time(start).and_local_timezone(offset).single(),
            date.and_time(end).and_local_timezone(offset).single(),
        ) else {
            return TimeWindow::Upcoming;
        };

        // 规则 4-6: 与 now 比较 (统一换算到服务区偏移)
        let now = now.with_timezone(&offset);
        if end_at < now {
            TimeWindow::Past
        } else if start_at <= now && now <= end_at {
            TimeWindow::Current
        } else {
            TimeWindow::Upcoming
        }
    }

    /// 规范化并解析当日时刻
    ///
    /// # 规则
    /// - "HH:MM" → 补秒为 "HH:MM:00"
    /// - "HH:MM:SS" → 原样
    /// - 其余形态解析失败 → None
    fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
        let trimmed = raw.trim();
        let normalized = if trimmed.chars().filter(|c| *c == ':').count() == 1 {
            format!("{}:00", trimmed)
        } else {
            trimmed.to_string()
        };
        NaiveTime::parse_from_str(&normalized, "%H:%M:%S").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// 构造服务区 (UTC+7) 本地时刻对应的 UTC now
    fn local_now(y: i32, m: u32, d: u32, hms: &str) -> DateTime<Utc> {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let t = NaiveTime::parse_from_str(hms, "%H:%M:%S").unwrap();
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        offset
            .from_local_datetime(&date.and_time(t))
            .unwrap()
            .with_timezone(&Utc)
    }

    fn frame() -> Timeframe {
        Timeframe::new("上午班", "09:00", "10:00")
    }

    // ==========================================
    // 测试 1: 边界闭区间
    // ==========================================

    #[test]
    fn test_classify_before_start_is_upcoming() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = local_now(2024, 12, 2, "08:59:59");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Upcoming
        );
    }

    #[test]
    fn test_classify_start_boundary_is_current() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = local_now(2024, 12, 2, "09:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Current
        );
    }

    #[test]
    fn test_classify_end_boundary_is_current() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = local_now(2024, 12, 2, "10:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Current
        );
    }

    #[test]
    fn test_classify_just_after_end_is_past() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = local_now(2024, 12, 2, "10:00:01");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Past
        );
    }

    // ==========================================
    // 测试 2: fail-open 策略
    // ==========================================

    #[test]
    fn test_classify_missing_date_is_upcoming() {
        let now = local_now(2024, 12, 2, "12:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(None, Some(&frame()), now),
            TimeWindow::Upcoming
        );
    }

    #[test]
    fn test_classify_missing_timeframe_is_upcoming() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = local_now(2024, 12, 2, "12:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), None, now),
            TimeWindow::Upcoming
        );
    }

    #[test]
    fn test_classify_malformed_time_is_upcoming() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let bad = Timeframe::new("坏数据", "morning", "10:00");
        let now = local_now(2024, 12, 2, "12:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&bad), now),
            TimeWindow::Upcoming
        );
    }

    // ==========================================
    // 测试 3: 时刻规范化
    // ==========================================

    #[test]
    fn test_classify_accepts_full_hms_times() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let f = Timeframe::new("上午班", "09:00:00", "10:30:30");
        let now = local_now(2024, 12, 2, "10:30:30");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&f), now),
            TimeWindow::Current
        );
        let later = local_now(2024, 12, 2, "10:30:31");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&f), later),
            TimeWindow::Past
        );
    }

    // ==========================================
    // 测试 4: 时区锚定 (不随观察者漂移)
    // ==========================================

    #[test]
    fn test_classify_pinned_to_service_offset() {
        // 服务区 2024-12-02 09:30 = UTC 2024-12-02 02:30;
        // 观察者无论身在何处,结论一致为 Current
        let d = NaiveDate::from_ymd_opt(2024, 12, 2).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 12, 2, 2, 30, 0).unwrap();
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Current
        );
        // UTC 正午早已越过服务区 10:00
        let noon_utc = Utc.with_ymd_and_hms(2024, 12, 2, 12, 0, 0).unwrap();
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), noon_utc),
            TimeWindow::Past
        );
    }

    #[test]
    fn test_classify_other_day_is_upcoming() {
        let d = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        let now = local_now(2024, 12, 2, "12:00:00");
        assert_eq!(
            TimeWindowClassifier::classify(Some(d), Some(&frame()), now),
            TimeWindow::Upcoming
        );
    }
}
