// ==========================================
// 托育预约排程引擎 - 订阅 Repository Trait
// ==========================================
// 职责: 定义套餐订阅的数据访问接口 (不含业务逻辑)
// ==========================================

use crate::domain::subscription::PackageSubscription;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// SubscriptionRepository Trait
// ==========================================
// 用途: 学员套餐订阅查询 (外部协作方,本引擎只读)
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// 查询学员名下全部订阅 (按存储返回顺序,不重排)
    ///
    /// # 参数
    /// - student_id: 学员ID
    ///
    /// # 返回
    /// - Ok(Vec): 全部订阅,含非 Active 状态;过滤由引擎层负责
    ///
    /// 注: PackageValidator 的"首个 Active"决选依赖此处的
    /// 返回顺序,实现侧不得自行排序。
    async fn list_by_student(
        &self,
        student_id: &str,
    ) -> RepositoryResult<Vec<PackageSubscription>>;
}
