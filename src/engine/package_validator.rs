// ==========================================
// 托育预约排程引擎 - 套餐校验引擎
// ==========================================
// 职责: 判定学员的生效订阅能否用于指定时段模板
// 红线: 只认 Active 订阅;"首个 Active (按存储返回顺序)" 的决选
//       是既定简化——学员同时持有多个不同范围的 Active 订阅时
//       行为未定义,挂起未决,不在此处擅自加排序
// ==========================================

use crate::domain::slot::SlotOccurrence;
use crate::domain::subscription::PackageSubscription;
use crate::engine::error::{BookingError, BookingResult};
use crate::repository::subscription_repo::SubscriptionRepository;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// PackageValidator - 套餐校验引擎
// ==========================================
pub struct PackageValidator {
    subscription_repo: Arc<dyn SubscriptionRepository>,
}

impl PackageValidator {
    pub fn new(subscription_repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscription_repo }
    }

    /// 校验并选出可用于该时段的订阅
    ///
    /// # 规则
    /// 1. 拉取学员全部订阅,过滤 status == Active
    /// 2. 无 Active 订阅 → NoActiveSubscription
    /// 3. 模板 allowed_package_ids 非空 → 取首个套餐在范围内的
    ///    Active 订阅;无一命中 → PackageNotAllowedForSlot
    /// 4. allowed_package_ids 为空 → 无条件取首个 Active 订阅
    ///
    /// # 参数
    /// - student_id: 学员ID
    /// - occurrence: 目标时段模板
    pub async fn validate(
        &self,
        student_id: &str,
        occurrence: &SlotOccurrence,
    ) -> BookingResult<PackageSubscription> {
        let subscriptions = self.subscription_repo.list_by_student(student_id).await?;
        let active: Vec<PackageSubscription> = subscriptions
            .into_iter()
            .filter(|s| s.is_active())
            .collect();

        debug!(
            student_id = %student_id,
            occurrence_id = %occurrence.occurrence_id,
            active_count = active.len(),
            "套餐校验: Active 订阅过滤完成"
        );

        if active.is_empty() {
            return Err(BookingError::NoActiveSubscription {
                student_id: student_id.to_string(),
            });
        }

        let chosen = active
            .into_iter()
            .find(|s| occurrence.allows_package(&s.package_id))
            .ok_or_else(|| BookingError::PackageNotAllowedForSlot {
                occurrence_id: occurrence.occurrence_id.clone(),
                allowed_package_ids: occurrence.allowed_package_ids.clone(),
            })?;

        info!(
            student_id = %student_id,
            occurrence_id = %occurrence.occurrence_id,
            subscription_id = %chosen.subscription_id,
            package_id = %chosen.package_id,
            "套餐校验通过"
        );
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slot::Timeframe;
    use crate::domain::types::SubscriptionStatus;
    use crate::repository::memory::InMemorySubscriptionRepository;

    fn occurrence(allowed: Vec<&str>) -> SlotOccurrence {
        SlotOccurrence {
            occurrence_id: "OCC001".to_string(),
            timeframe: Timeframe::new("上午班", "09:00", "10:00"),
            room_id: None,
            capacity: 5,
            fixed_date: None,
            weekday_pattern: Some(vec![1]),
            allowed_package_ids: allowed.into_iter().map(String::from).collect(),
        }
    }

    fn subscription(id: &str, package: &str, status: SubscriptionStatus) -> PackageSubscription {
        PackageSubscription {
            subscription_id: id.to_string(),
            student_id: "STU001".to_string(),
            package_id: package.to_string(),
            status,
            total_slots: 10,
            used_slots: 0,
        }
    }

    fn validator(subs: Vec<PackageSubscription>) -> PackageValidator {
        PackageValidator::new(Arc::new(InMemorySubscriptionRepository::new(subs)))
    }

    #[tokio::test]
    async fn test_no_subscriptions_at_all() {
        let v = validator(vec![]);
        let err = v.validate("STU001", &occurrence(vec![])).await.unwrap_err();
        assert!(matches!(err, BookingError::NoActiveSubscription { .. }));
    }

    #[tokio::test]
    async fn test_no_active_subscription() {
        let v = validator(vec![
            subscription("SUB001", "PKG_A", SubscriptionStatus::Expired),
            subscription("SUB002", "PKG_B", SubscriptionStatus::Inactive),
        ]);
        let err = v.validate("STU001", &occurrence(vec![])).await.unwrap_err();
        assert!(matches!(err, BookingError::NoActiveSubscription { .. }));
    }

    #[tokio::test]
    async fn test_empty_allow_list_accepts_first_active() {
        let v = validator(vec![
            subscription("SUB001", "PKG_A", SubscriptionStatus::Expired),
            subscription("SUB002", "PKG_B", SubscriptionStatus::Active),
            subscription("SUB003", "PKG_C", SubscriptionStatus::Active),
        ]);
        // 按存储顺序取首个 Active
        let chosen = v.validate("STU001", &occurrence(vec![])).await.unwrap();
        assert_eq!(chosen.subscription_id, "SUB002");
    }

    #[tokio::test]
    async fn test_allow_list_skips_out_of_scope_active() {
        let v = validator(vec![
            subscription("SUB001", "PKG_A", SubscriptionStatus::Active),
            subscription("SUB002", "PKG_B", SubscriptionStatus::Active),
        ]);
        let chosen = v
            .validate("STU001", &occurrence(vec!["PKG_B"]))
            .await
            .unwrap();
        assert_eq!(chosen.subscription_id, "SUB002");
    }

    #[tokio::test]
    async fn test_allow_list_rejects_when_no_match() {
        let v = validator(vec![subscription(
            "SUB001",
            "PKG_A",
            SubscriptionStatus::Active,
        )]);
        let err = v
            .validate("STU001", &occurrence(vec!["PKG_X"]))
            .await
            .unwrap_err();
        match err {
            BookingError::PackageNotAllowedForSlot {
                occurrence_id,
                allowed_package_ids,
            } => {
                assert_eq!(occurrence_id, "OCC001");
                assert_eq!(allowed_package_ids, vec!["PKG_X".to_string()]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
