// ==========================================
// 电商后台发货核心 - 核心库
// ==========================================
// 范围: 发货单创建与快递报价选择
// 技术栈: Rust + tokio + reqwest + SQLite
// 外部协作: 订单/发货后台 REST API（经 ShippingGateway 访问）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则与报价编排
pub mod engine;

// 客户端层 - 后台 REST API
pub mod client;

// 数据仓储层 - 操作日志
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 发货弹窗接口
pub mod api;

// 应用层 - 资源组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DimensionField, ServiceTier, ShipmentStage, ShippingProvider};

// 领域实体
pub use domain::{
    ActionLog, ActionType, CourierRate, ManualShipmentFields, Order, OrderItem, PackageDimensions,
    PackageForm, ServiceRate, ShipmentCreated, ShipmentRequest, Warehouse,
};

// 引擎
pub use engine::{
    can_submit, validate_package, RateAggregator, ShipmentSelectionState, SubmitBlocker,
};

// 客户端
pub use client::{GatewayConfig, HttpShippingGateway, Session, ShippingGateway};

// API
pub use api::{ApiError, ApiResult, ShipmentDialog};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "电商后台发货核心";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
