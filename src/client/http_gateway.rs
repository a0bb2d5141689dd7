// ==========================================
// 电商后台发货核心 - HTTP 网关实现
// ==========================================
// 职责: 调用后台 REST API，解析 {success, data} 响应
// 说明: 只做“发送请求、返回解析结果或报错”，不做重试
// ==========================================

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::config::GatewayConfig;
use crate::client::error::{ClientError, ClientResult};
use crate::client::gateway::{ApiEnvelope, ShippingGateway};
use crate::client::session::Session;
use crate::domain::{
    CourierRate, PackageDimensions, ServiceRate, ServiceTier, ShipmentCreated, ShipmentRequest,
};

/// 后台 REST API 网关
pub struct HttpShippingGateway {
    client: Client,
    config: GatewayConfig,
    session: Session,
}

impl HttpShippingGateway {
    /// 创建网关
    ///
    /// # 参数
    /// - config: 地址/超时/额外请求头
    /// - session: 登录会话（携带 Bearer token）
    pub fn new(config: GatewayConfig, session: Session) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("API base URL not configured".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    /// 附加认证与自定义请求头
    fn decorate(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }
        request
    }

    /// 发送请求并解析统一响应
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = self.decorate(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        parse_response(status.as_u16(), status.is_success(), &body)
    }
}

/// 解析响应体: 非 2xx 优先取后台 message
fn parse_response<T: DeserializeOwned>(status: u16, ok: bool, body: &str) -> ClientResult<T> {
    if !ok {
        let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
            .ok()
            .and_then(|env| env.message);
        return match message {
            Some(msg) if !msg.trim().is_empty() => Err(ClientError::Rejected(msg)),
            _ => Err(ClientError::Status {
                status,
                body: body.chars().take(200).collect(),
            }),
        };
    }

    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    envelope.into_data()
}

#[async_trait]
impl ShippingGateway for HttpShippingGateway {
    async fn get_courier_rates(
        &self,
        order_id: &str,
        warehouse_id: &str,
        package: &PackageDimensions,
    ) -> ClientResult<Vec<CourierRate>> {
        let url = self.config.endpoint("shipments/courier-rates");
        debug!(order_id, warehouse_id, url = %url, "请求聚合平台报价");

        let request = self.client.get(&url).query(&[
            ("orderId", order_id.to_string()),
            ("warehouseId", warehouse_id.to_string()),
            ("weight", package.weight.to_string()),
            ("length", package.length.to_string()),
            ("breadth", package.breadth.to_string()),
            ("height", package.height.to_string()),
        ]);

        self.send(request).await
    }

    async fn get_delhivery_rates(
        &self,
        order_id: &str,
        warehouse_id: &str,
        tier: ServiceTier,
        weight: f64,
    ) -> ClientResult<Vec<ServiceRate>> {
        let url = self.config.endpoint("shipments/delhivery/rates");
        debug!(order_id, warehouse_id, tier = %tier, "请求直连快递报价");

        let request = self.client.get(&url).query(&[
            ("orderId", order_id.to_string()),
            ("warehouseId", warehouse_id.to_string()),
            ("mode", tier.as_str().to_string()),
            ("weight", weight.to_string()),
        ]);

        self.send(request).await
    }

    async fn create_shipment(
        &self,
        order_id: &str,
        request: &ShipmentRequest,
    ) -> ClientResult<ShipmentCreated> {
        let url = self.config.endpoint(&format!("orders/{}/shipments", order_id));
        let builder = self.client.post(&url).json(request);

        let result = self.send(builder).await;
        if let Err(e) = &result {
            warn!(order_id, provider = %request.provider, error = %e, "创建发货单请求失败");
        }
        result
    }
}
