// ==========================================
// 托育预约排程引擎 - 配置层
// ==========================================
// 职责: 引擎调优参数与服务时区常量
// 红线: 时区固定锚定 UTC+7,绝不读取宿主机本地时区
//       (跨时区观察者造成的日期偏移是排程正确性事故)
// ==========================================

use serde::{Deserialize, Serialize};

/// 服务区时区偏移 (小时)
///
/// 所有日期时间运算固定锚定 UTC+7;分类结果不随调用方时钟漂移。
pub const SERVICE_UTC_OFFSET_HOURS: i32 = 7;

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 可用性扫描的批宽 (同批日期并发查询,批间串行)
    pub scan_batch_width: usize,
    /// 时段查询的每页记录数
    pub slot_page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_batch_width: 7,
            slot_page_size: 20,
        }
    }
}

impl EngineConfig {
    /// 带参创建;batch_width=0 或 page_size=0 回退默认值
    pub fn new(scan_batch_width: usize, slot_page_size: usize) -> Self {
        let defaults = Self::default();
        Self {
            scan_batch_width: if scan_batch_width == 0 {
                defaults.scan_batch_width
            } else {
                scan_batch_width
            },
            slot_page_size: if slot_page_size == 0 {
                defaults.slot_page_size
            } else {
                slot_page_size
            },
        }
    }
}
