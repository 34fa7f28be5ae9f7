// ==========================================
// 托育预约排程引擎 - 仓储层错误类型
// ==========================================
// 职责: 定义远端存储访问的传输级错误分类
// 红线: 仓储必须区分 NotFound/Conflict/Forbidden/TransientUnavailable,
//       引擎层按 §错误策略逐一映射,不做隐式重试
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据定位错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 写冲突错误 =====
    // 容量耗尽或并发写冲突;仓储是容量裁决的唯一权威
    #[error("写冲突: {0}")]
    Conflict(String),

    // ===== 权限错误 =====
    #[error("操作被拒绝: {0}")]
    Forbidden(String),

    // ===== 传输/后端错误 =====
    // 原样上抛给调用方做重试/退避,引擎不吞不改
    #[error("存储暂不可用: {0}")]
    TransientUnavailable(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
