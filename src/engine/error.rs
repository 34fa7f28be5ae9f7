// ==========================================
// 托育预约排程引擎 - 引擎层错误类型
// ==========================================
// 职责: 定义面向调用方的错误分类,转换仓储层传输错误
// 红线: 每个错误恰好落入一种分类;校验类错误本地判定并带足上下文
//       (所需日期/星期、模板ID),存储不可用原样上抛,引擎不做隐式重试
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::slot::RequiredSchedule;
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum BookingError {
    // ===== 套餐校验错误 =====
    #[error("无生效订阅: student_id={student_id}")]
    NoActiveSubscription { student_id: String },

    #[error("套餐不适用于该时段: occurrence_id={occurrence_id}, 允许套餐={allowed_package_ids:?}")]
    PackageNotAllowedForSlot {
        occurrence_id: String,
        allowed_package_ids: Vec<String>,
    },

    // ===== 预约校验错误 =====
    #[error("日期与时段不匹配: occurrence_id={occurrence_id}, date={date}, 要求 {required}")]
    DateSlotMismatch {
        occurrence_id: String,
        date: NaiveDate,
        required: RequiredSchedule,
    },

    #[error("时段已满: occurrence_id={occurrence_id}, date={date}")]
    SlotFull {
        occurrence_id: String,
        date: NaiveDate,
    },

    // ===== 取消校验错误 =====
    #[error("预约不可取消: slot_id={slot_id}, 原因: {reason}")]
    NotCancellable { slot_id: String, reason: String },

    // ===== 输入/定位错误 =====
    #[error("无效请求: {0}")]
    InvalidRequest(String),

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 传输/后端错误 =====
    // 原样透传,重试/退避策略归调用方
    #[error("存储暂不可用: {0}")]
    RepositoryUnavailable(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 传输级错误映射为调用方可处置的分类;
//       Conflict→SlotFull 需要模板/日期上下文,在调用点单独映射
// ==========================================
impl From<RepositoryError> for BookingError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => BookingError::NotFound { entity, id },
            RepositoryError::Conflict(msg) => {
                // 调用点应先行映射为 SlotFull;兜底保留冲突语义
                BookingError::InvalidRequest(format!("写冲突: {}", msg))
            }
            RepositoryError::Forbidden(msg) => BookingError::InvalidRequest(msg),
            RepositoryError::TransientUnavailable(msg) => {
                BookingError::RepositoryUnavailable(msg)
            }
            RepositoryError::Other(err) => BookingError::Other(err),
        }
    }
}

/// Result 类型别名
pub type BookingResult<T> = Result<T, BookingError>;
