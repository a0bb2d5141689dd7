// ==========================================
// 电商后台发货核心 - 领域类型定义
// ==========================================
// 职责: 物流渠道、服务档位、流程阶段等枚举
// 序列化格式: 与后台 REST API 保持一致（小写/kebab-case）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 物流渠道 (Shipping Provider)
// ==========================================
// Manual: 人工录入运单（无需报价）
// Shiprocket: 多快递聚合平台（aggregator）
// Delhivery: 直连快递（integrated carrier，Express/Surface 两档）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingProvider {
    Manual,
    Shiprocket,
    Delhivery,
}

impl ShippingProvider {
    /// 需要拉取报价的渠道（按发起顺序）
    pub const RATE_PROVIDERS: [ShippingProvider; 2] =
        [ShippingProvider::Shiprocket, ShippingProvider::Delhivery];

    /// 转换为 API 字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingProvider::Manual => "manual",
            ShippingProvider::Shiprocket => "shiprocket",
            ShippingProvider::Delhivery => "delhivery",
        }
    }
}

impl fmt::Display for ShippingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 服务档位 (Service Tier)
// ==========================================
// Delhivery 专用；报价按档位分别请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTier {
    Express,
    Surface,
}

impl ServiceTier {
    /// 拉取顺序: Express 在前
    pub const FETCH_ORDER: [ServiceTier; 2] = [ServiceTier::Express, ServiceTier::Surface];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::Express => "express",
            ServiceTier::Surface => "surface",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 包裹尺寸字段 (Dimension Field)
// ==========================================
// 校验顺序: weight → length → breadth → height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionField {
    Weight,
    Length,
    Breadth,
    Height,
}

impl DimensionField {
    pub const ALL: [DimensionField; 4] = [
        DimensionField::Weight,
        DimensionField::Length,
        DimensionField::Breadth,
        DimensionField::Height,
    ];

    /// 面向用户的字段名（含单位）
    pub fn label(&self) -> &'static str {
        match self {
            DimensionField::Weight => "weight (kg)",
            DimensionField::Length => "length (cm)",
            DimensionField::Breadth => "breadth (cm)",
            DimensionField::Height => "height (cm)",
        }
    }
}

impl fmt::Display for DimensionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 发货流程阶段 (Shipment Stage)
// ==========================================
// 由 ShipmentSelectionState 推导，不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStage {
    NoWarehouse,
    WarehouseSelected,
    RatesFetching,
    RatesAvailable,
    ProviderSelected,
    CourierOrTierSelected,
    Ready,
}

impl fmt::Display for ShipmentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentStage::NoWarehouse => write!(f, "NO_WAREHOUSE"),
            ShipmentStage::WarehouseSelected => write!(f, "WAREHOUSE_SELECTED"),
            ShipmentStage::RatesFetching => write!(f, "RATES_FETCHING"),
            ShipmentStage::RatesAvailable => write!(f, "RATES_AVAILABLE"),
            ShipmentStage::ProviderSelected => write!(f, "PROVIDER_SELECTED"),
            ShipmentStage::CourierOrTierSelected => write!(f, "COURIER_OR_TIER_SELECTED"),
            ShipmentStage::Ready => write!(f, "READY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_lowercase() {
        let json = serde_json::to_string(&ShippingProvider::Delhivery).unwrap();
        assert_eq!(json, "\"delhivery\"");

        let parsed: ShippingProvider = serde_json::from_str("\"shiprocket\"").unwrap();
        assert_eq!(parsed, ShippingProvider::Shiprocket);
    }

    #[test]
    fn test_tier_fetch_order() {
        assert_eq!(ServiceTier::FETCH_ORDER[0], ServiceTier::Express);
        assert_eq!(ServiceTier::Surface.to_string(), "surface");
    }
}
