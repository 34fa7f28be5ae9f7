// ==========================================
// 托育预约排程引擎 - API 层
// ==========================================
// 职责: 聚合六个引擎组件,暴露面向界面层的业务接口
// 红线: 不含传输/鉴权/渲染;错误原样返回 BookingError,
//       界面层负责把错误分类翻译成用户文案
// ==========================================

pub mod booking_api;

pub use booking_api::BookingApi;
