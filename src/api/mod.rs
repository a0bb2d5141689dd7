// ==========================================
// 电商后台发货核心 - API 层
// ==========================================
// 职责: 提供发货弹窗业务接口,供宿主页面事件调用
// ==========================================

pub mod error;
pub mod shipment_dialog;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use shipment_dialog::{RateFetchSummary, ShipmentDialog};
