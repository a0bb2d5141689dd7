// ==========================================
// 电商后台发货核心 - 引擎层
// ==========================================
// 职责: 发货弹窗的业务规则（校验、选择状态机、报价聚合、提交闸门）
// 红线: Engine 不直接发 HTTP、不拼 SQL；网络访问只经由 ShippingGateway
// ==========================================

pub mod item_selection;
pub mod package_validator;
pub mod rate_aggregator;
pub mod selection;
pub mod submission_gate;

// 重导出核心引擎
pub use item_selection::{ItemSelection, DEFAULT_PER_ITEM_WEIGHT_KG};
pub use package_validator::{parse_dimension, validate_package, PackageFieldError};
pub use rate_aggregator::{
    filter_courier_rates, pick_service_rate, ProviderFailure, RateAggregator, RateFetchError,
    RateFetchOutcome, RateFetchTicket,
};
pub use selection::{SelectionError, ShipmentSelectionState};
pub use submission_gate::{build_shipment_request, can_submit, SubmitBlocker};
