// ==========================================
// 内存版后台网关 - 用于集成测试
// ==========================================
// 行为: 按预设返回报价/创建结果，并记录所有调用
// 可选: courier_gate / create_gate 阻塞对应调用，直到测试放行
//       （不放行即模拟永不返回的后台）
// ==========================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ecom_admin_shipping::client::{ClientError, ClientResult, ShippingGateway};
use ecom_admin_shipping::domain::{
    CourierRate, PackageDimensions, ServiceRate, ServiceTier, ShipmentCreated, ShipmentRequest,
};
use tokio::sync::Notify;

#[derive(Default)]
pub struct FakeGateway {
    courier_rates: Mutex<Option<Result<Vec<CourierRate>, String>>>,
    tier_rates: Mutex<HashMap<ServiceTier, Result<Vec<ServiceRate>, String>>>,
    create_result: Mutex<Option<Result<ShipmentCreated, String>>>,
    courier_gate: Mutex<Option<Arc<Notify>>>,
    create_gate: Mutex<Option<Arc<Notify>>>,

    /// 调用记录（"couriers:W1" / "delhivery:W1:express" / "create:ORD-1"）
    pub calls: Mutex<Vec<String>>,
    /// 已提交的创建请求
    pub created: Mutex<Vec<(String, ShipmentRequest)>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courier_rates(self, rates: Vec<CourierRate>) -> Self {
        *self.courier_rates.lock().unwrap() = Some(Ok(rates));
        self
    }

    pub fn failing_couriers(self, message: &str) -> Self {
        *self.courier_rates.lock().unwrap() = Some(Err(message.to_string()));
        self
    }

    pub fn with_tier(self, tier: ServiceTier, rates: Vec<ServiceRate>) -> Self {
        self.tier_rates.lock().unwrap().insert(tier, Ok(rates));
        self
    }

    pub fn failing_tier(self, tier: ServiceTier, message: &str) -> Self {
        self.tier_rates
            .lock()
            .unwrap()
            .insert(tier, Err(message.to_string()));
        self
    }

    pub fn failing_create(self, message: &str) -> Self {
        self.set_create_result(Err(message.to_string()));
        self
    }

    pub fn set_create_result(&self, result: Result<ShipmentCreated, String>) {
        *self.create_result.lock().unwrap() = Some(result);
    }

    /// 聚合平台报价等待 notify 放行
    pub fn gate_couriers(&self, gate: Arc<Notify>) {
        *self.courier_gate.lock().unwrap() = Some(gate);
    }

    /// 取消聚合平台报价的阻塞
    pub fn ungate_couriers(&self) {
        *self.courier_gate.lock().unwrap() = None;
    }

    /// 创建发货单等待 notify 放行
    pub fn gate_create(&self, gate: Arc<Notify>) {
        *self.create_gate.lock().unwrap() = Some(gate);
    }

    pub fn ungate_create(&self) {
        *self.create_gate.lock().unwrap() = None;
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_requests(&self) -> Vec<(String, ShipmentRequest)> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ShippingGateway for FakeGateway {
    async fn get_courier_rates(
        &self,
        _order_id: &str,
        warehouse_id: &str,
        _package: &PackageDimensions,
    ) -> ClientResult<Vec<CourierRate>> {
        self.record(format!("couriers:{}", warehouse_id));

        let gate = self.courier_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let preset = self.courier_rates.lock().unwrap().clone();
        match preset {
            Some(Ok(rates)) => Ok(rates),
            Some(Err(msg)) => Err(ClientError::Rejected(msg)),
            None => Ok(Vec::new()),
        }
    }

    async fn get_delhivery_rates(
        &self,
        _order_id: &str,
        warehouse_id: &str,
        tier: ServiceTier,
        _weight: f64,
    ) -> ClientResult<Vec<ServiceRate>> {
        self.record(format!("delhivery:{}:{}", warehouse_id, tier));

        let preset = self.tier_rates.lock().unwrap().get(&tier).cloned();
        match preset {
            Some(Ok(rates)) => Ok(rates),
            Some(Err(msg)) => Err(ClientError::Rejected(msg)),
            None => Ok(Vec::new()),
        }
    }

    async fn create_shipment(
        &self,
        order_id: &str,
        request: &ShipmentRequest,
    ) -> ClientResult<ShipmentCreated> {
        self.record(format!("create:{}", order_id));

        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let preset = self.create_result.lock().unwrap().clone();
        match preset {
            Some(Err(msg)) => Err(ClientError::Rejected(msg)),
            Some(Ok(created)) => {
                self.created
                    .lock()
                    .unwrap()
                    .push((order_id.to_string(), request.clone()));
                Ok(created)
            }
            None => {
                self.created
                    .lock()
                    .unwrap()
                    .push((order_id.to_string(), request.clone()));
                Ok(ShipmentCreated {
                    shipment_id: Some(format!("SHP-{}", order_id)),
                    awb_code: Some("AWB0001".to_string()),
                    ..Default::default()
                })
            }
        }
    }
}
