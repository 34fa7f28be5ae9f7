// ==========================================
// 托育预约排程引擎 - 时段 Repository Trait
// ==========================================
// 职责: 定义时段模板的数据访问接口 (不含业务逻辑)
// 红线: Repository 不含业务规则,只做数据查询;
//       字段形态在实现侧规范化为 SlotOccurrence,引擎不认别名字段
// ==========================================

use crate::domain::slot::SlotOccurrence;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SlotPage - 分页查询结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotPage {
    pub items: Vec<SlotOccurrence>, // 本页时段模板
    pub total_count: usize,         // 总记录数
    pub total_pages: usize,         // 总页数 = ceil(total_count / page_size)
}

impl SlotPage {
    /// 空结果页
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
        }
    }
}

// ==========================================
// SlotRepository Trait
// ==========================================
// 用途: 时段模板查询 (外部协作方,本引擎只读)
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// 按日期分页查询学员可见的时段模板
    ///
    /// # 参数
    /// - student_id: 学员ID
    /// - date: 查询日期
    /// - page_index: 页索引 (0 起)
    /// - page_size: 每页记录数
    ///
    /// # 返回
    /// - Ok(SlotPage): 本页结果;调用方需逐页取完
    /// - Err: 传输级错误 (该日期在扫描中标记为 UncheckedDate)
    async fn query(
        &self,
        student_id: &str,
        date: NaiveDate,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<SlotPage>;

    /// 按ID获取单个时段模板
    ///
    /// # 参数
    /// - occurrence_id: 时段模板ID
    ///
    /// # 返回
    /// - Ok(Some(occ)): 找到模板
    /// - Ok(None): 不存在
    async fn find_occurrence(
        &self,
        occurrence_id: &str,
    ) -> RepositoryResult<Option<SlotOccurrence>>;
}
