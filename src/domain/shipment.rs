// ==========================================
// 电商后台发货核心 - 发货单提交模型
// ==========================================
// 对齐: POST /orders/{orderId}/shipments 请求体
// ==========================================

use crate::domain::package::PackageDimensions;
use crate::domain::types::{ServiceTier, ShippingProvider};
use serde::{Deserialize, Serialize};

// ==========================================
// ManualShipmentFields - 人工录入运单字段
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualShipmentFields {
    pub tracking_id: String,
    pub carrier_name: String,
    pub tracking_url: String,
}

// ==========================================
// ShipmentRequest - 创建发货单请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub provider: ShippingProvider,
    pub warehouse_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<ServiceTier>,
    pub package: PackageDimensions,
    pub item_indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual: Option<ManualShipmentFields>,
}

// ==========================================
// ShipmentCreated - 创建结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentCreated {
    #[serde(default)]
    pub shipment_id: Option<String>,
    #[serde(default)]
    pub awb_code: Option<String>,
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
