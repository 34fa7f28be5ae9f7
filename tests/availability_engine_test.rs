// ==========================================
// AvailabilityAggregator 引擎集成测试
// ==========================================
// 测试目标: 验证逐月扫描、日期过滤、分页、UncheckedDate 与单调吸收
// 覆盖范围: 跨月区间、会话取消、注入失败、复查不降级
// ==========================================


use childcare_booking::engine::availability::{
    AvailabilityAggregator, DateRange, ScanSession,
};
use test_helpers::{fixed_date_occurrence, harness, weekday_occurrence, ymd};

// ==========================================
// 测试用例 1: 基本扫描与日期过滤
// ==========================================

#[tokio::test]
async fn test_scan_filters_by_schedule_rules() {
    // 周一规则模板 + 12-04 固定日期模板
    let h = harness(
        vec![
            weekday_occurrence("OCC_MON", vec![1], 5),
            fixed_date_occurrence("OCC_FIX", ymd(2024, 12, 4), 3),
        ],
        vec![],
    );
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 1), ymd(2024, 12, 7)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());

    let month = scan.next_month().await.expect("本月应有结果");
    assert_eq!(month.year, 2024);
    assert_eq!(month.month, 12);
    assert_eq!(month.dates.len(), 7);

    // 12-02 周一: 仅星期规则模板命中
    let mon = &month.dates[1];
    assert!(mon.resolved);
    assert_eq!(mon.slot_count, 1);
    assert_eq!(mon.candidates[0].occurrence_id, "OCC_MON");

    // 12-04 周三: 仅固定日期模板命中
    let wed = &month.dates[3];
    assert_eq!(wed.slot_count, 1);
    assert_eq!(wed.candidates[0].occurrence_id, "OCC_FIX");

    // 12-03 周二: 无命中,但 resolved=true (真实的"无可用")
    let tue = &month.dates[2];
    assert!(tue.resolved);
    assert_eq!(tue.slot_count, 0);

    // 区间耗尽
    assert!(scan.next_month().await.is_none());
}

// ==========================================
// 测试用例 2: 跨月扫描,近月在前
// ==========================================

#[tokio::test]
async fn test_scan_spans_months_nearest_first() {
    let h = harness(vec![weekday_occurrence("OCC_MON", vec![1], 5)], vec![]);
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 25), ymd(2025, 1, 5)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());

    let dec = scan.next_month().await.unwrap();
    assert_eq!((dec.year, dec.month), (2024, 12));
    assert_eq!(dec.dates.len(), 7); // 12-25..=12-31

    let jan = scan.next_month().await.unwrap();
    assert_eq!((jan.year, jan.month), (2025, 1));
    assert_eq!(jan.dates.len(), 5); // 01-01..=01-05

    assert!(scan.next_month().await.is_none());
    // 序列有限: 结束后持续返回 None
    assert!(scan.next_month().await.is_none());
}

// ==========================================
// 测试用例 3: 查询失败标记 UncheckedDate
// ==========================================

#[tokio::test]
async fn test_failed_date_is_unchecked_not_zero() {
    let h = harness(vec![weekday_occurrence("OCC_MON", vec![1], 5)], vec![]);
    h.slot_repo.inject_failure(ymd(2024, 12, 2));
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 2), ymd(2024, 12, 4)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());
    let month = scan.next_month().await.unwrap();

    // 12-02 查询失败 → 未解析,不是 slot_count=0
    let failed = &month.dates[0];
    assert!(!failed.resolved);
    assert_eq!(month.unchecked_count(), 1);

    // 其余日期正常解析
    assert!(month.dates[1].resolved);
    assert!(month.dates[2].resolved);
}

// ==========================================
// 测试用例 4: 单调吸收 (复查失败不降级)
// ==========================================

#[tokio::test]
async fn test_resolved_date_never_downgraded_by_failed_recheck() {
    let h = harness(vec![weekday_occurrence("OCC_MON", vec![1], 5)], vec![]);
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 2), ymd(2024, 12, 2)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());
    let month = scan.next_month().await.unwrap();
    assert!(month.dates[0].resolved);
    assert_eq!(month.dates[0].slot_count, 1);

    // 注入失败后复查: 结果保持已解析
    h.slot_repo.inject_failure(ymd(2024, 12, 2));
    let rechecked = scan.recheck(ymd(2024, 12, 2)).await;
    assert!(rechecked.resolved);
    assert_eq!(rechecked.slot_count, 1);
    assert!(scan.date_result(ymd(2024, 12, 2)).unwrap().resolved);
}

#[tokio::test]
async fn test_unchecked_date_upgraded_by_successful_recheck() {
    let h = harness(vec![weekday_occurrence("OCC_MON", vec![1], 5)], vec![]);
    h.slot_repo.inject_failure(ymd(2024, 12, 2));
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 2), ymd(2024, 12, 2)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());
    let month = scan.next_month().await.unwrap();
    assert!(!month.dates[0].resolved);

    // 失败注入是一次性的,复查成功 → 升级为已解析
    let rechecked = scan.recheck(ymd(2024, 12, 2)).await;
    assert!(rechecked.resolved);
    assert_eq!(rechecked.slot_count, 1);
}

// ==========================================
// 测试用例 5: 会话取消与重发从头开始
// ==========================================

#[tokio::test]
async fn test_cancelled_session_stops_scan() {
    let h = harness(vec![weekday_occurrence("OCC_MON", vec![1], 5)], vec![]);
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), h.config.clone());

    let range = DateRange::new(ymd(2024, 12, 1), ymd(2025, 2, 28)).unwrap();
    let session = ScanSession::new();
    let mut scan = aggregator.scan("STU001", range, session.clone());

    assert!(scan.next_month().await.is_some());
    session.cancel();
    // 取消后不再产出
    assert!(scan.next_month().await.is_none());

    // 不可续传: 重发新会话从区间起点重新开始
    let mut fresh = aggregator.scan("STU001", range, ScanSession::new());
    let first = fresh.next_month().await.unwrap();
    assert_eq!((first.year, first.month), (2024, 12));
    assert_eq!(first.dates[0].date, ymd(2024, 12, 1));
}

// ==========================================
// 测试用例 6: 分页逐页取全
// ==========================================

#[tokio::test]
async fn test_scan_pages_through_all_results() {
    // 模板数大于页宽,必须跨页收齐
    let occurrences: Vec<_> = (0..25)
        .map(|i| weekday_occurrence(&format!("OCC{:03}", i), vec![1], 5))
        .collect();
    let h = harness(occurrences, vec![]);
    let mut config = h.config.clone();
    config.slot_page_size = 10;
    let aggregator = AvailabilityAggregator::new(h.slot_repo.clone(), config);

    let range = DateRange::new(ymd(2024, 12, 2), ymd(2024, 12, 2)).unwrap();
    let mut scan = aggregator.scan("STU001", range, ScanSession::new());
    let month = scan.next_month().await.unwrap();
    assert_eq!(month.dates[0].slot_count, 25);
}
