// ==========================================
// 电商后台发货核心 - 后台发货接口契约
// ==========================================
// 职责: 定义报价/创建发货单的外部接口 trait
// 说明: Engine 层依赖此 trait，HTTP 实现与测试替身均实现它
// ==========================================

use async_trait::async_trait;
use serde::Deserialize;

use crate::client::error::{ClientError, ClientResult};
use crate::domain::{
    CourierRate, PackageDimensions, ServiceRate, ServiceTier, ShipmentCreated, ShipmentRequest,
};

/// 后台发货接口
#[async_trait]
pub trait ShippingGateway: Send + Sync {
    /// 聚合平台报价（Shiprocket）
    async fn get_courier_rates(
        &self,
        order_id: &str,
        warehouse_id: &str,
        package: &PackageDimensions,
    ) -> ClientResult<Vec<CourierRate>>;

    /// 直连快递报价（Delhivery），每个档位调用一次
    async fn get_delhivery_rates(
        &self,
        order_id: &str,
        warehouse_id: &str,
        tier: ServiceTier,
        weight: f64,
    ) -> ClientResult<Vec<ServiceRate>>;

    /// 创建发货单
    async fn create_shipment(
        &self,
        order_id: &str,
        request: &ShipmentRequest,
    ) -> ClientResult<ShipmentCreated>;
}

// ==========================================
// ApiEnvelope - 后台统一响应格式 {success, data, message}
// ==========================================
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// 取出 data；success=false 或缺少 data 均视为失败
    pub fn into_data(self) -> ClientResult<T> {
        if !self.success {
            return Err(ClientError::Rejected(
                self.message.unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ClientError::Rejected("response is missing data".to_string()))
    }
}
