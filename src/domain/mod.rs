// ==========================================
// 电商后台发货核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod order;
pub mod package;
pub mod rate;
pub mod shipment;
pub mod types;
pub mod warehouse;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use order::{Order, OrderItem};
pub use package::{PackageDimensions, PackageForm};
pub use rate::{CourierRate, ServiceRate};
pub use shipment::{ManualShipmentFields, ShipmentCreated, ShipmentRequest};
pub use types::{DimensionField, ServiceTier, ShipmentStage, ShippingProvider};
pub use warehouse::{ProviderCapability, Warehouse};
