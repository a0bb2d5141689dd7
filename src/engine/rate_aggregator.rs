// ==========================================
// 电商后台发货核心 - 报价聚合编排器
// ==========================================
// 用途: 对仓库已开通的报价渠道并发拉取报价，合并为候选集
// 规则:
// - 各渠道/各档位相互独立，单个失败只记为“无报价”，不影响其他渠道
// - 等待所有请求结束（任意结果）后才算完成，不做 fail-fast
// - Shiprocket: 只保留 rate > 0 且名称非空，按价格升序
// - Delhivery: Express/Surface 分别请求，成功且 rate > 0 才保留，顺序固定 Express → Surface
// ==========================================

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::ShippingGateway;
use crate::domain::{CourierRate, PackageDimensions, ServiceRate, ServiceTier, ShippingProvider};
use crate::engine::package_validator::PackageFieldError;

// ==========================================
// RateFetchError - 拉取报价前置条件不满足
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateFetchError {
    #[error("Please select a warehouse")]
    NoWarehouse,

    #[error("Warehouse {0} is not available")]
    UnknownWarehouse(String),

    #[error("{0}")]
    InvalidPackage(#[from] PackageFieldError),

    #[error("No shipping providers are enabled for this warehouse")]
    NoProvidersEnabled,
}

// ==========================================
// RateFetchTicket - 一次报价请求的快照
// ==========================================
// generation/fetch_seq 用于丢弃过期响应
#[derive(Debug, Clone, PartialEq)]
pub struct RateFetchTicket {
    pub generation: u64,
    pub fetch_seq: u64,
    pub order_id: String,
    pub warehouse_id: String,
    pub package: PackageDimensions,
    pub providers: Vec<ShippingProvider>,
}

// ==========================================
// ProviderFailure - 单渠道/单档位失败记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderFailure {
    pub provider: ShippingProvider,
    pub tier: Option<ServiceTier>,
    pub reason: String,
}

// ==========================================
// RateFetchOutcome - 报价结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RateFetchOutcome {
    pub generation: u64,
    pub fetch_seq: u64,
    pub providers: Vec<ShippingProvider>,
    pub courier_rates: Vec<CourierRate>,
    pub service_rates: Vec<ServiceRate>,
    pub failures: Vec<ProviderFailure>,
}

impl RateFetchOutcome {
    fn empty(ticket: &RateFetchTicket) -> Self {
        Self {
            generation: ticket.generation,
            fetch_seq: ticket.fetch_seq,
            providers: ticket.providers.clone(),
            courier_rates: Vec::new(),
            service_rates: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// 没有任何可用报价
    pub fn is_empty(&self) -> bool {
        self.courier_rates.is_empty() && self.service_rates.is_empty()
    }
}

/// 单渠道结果（合并前）
#[derive(Debug, Default)]
struct ProviderRates {
    courier_rates: Vec<CourierRate>,
    service_rates: Vec<ServiceRate>,
    failures: Vec<ProviderFailure>,
}

// ==========================================
// 纯函数: 结果过滤
// ==========================================

/// Shiprocket 报价过滤 + 升序排序（同价保持接口顺序）
pub fn filter_courier_rates(rates: Vec<CourierRate>) -> Vec<CourierRate> {
    let mut usable: Vec<CourierRate> = rates.into_iter().filter(|r| r.is_usable()).collect();
    usable.sort_by(|a, b| a.rate.total_cmp(&b.rate));
    usable
}

/// Delhivery 单档位结果: 取第一条 rate > 0 的报价，档位以请求为准
pub fn pick_service_rate(tier: ServiceTier, rates: Vec<ServiceRate>) -> Option<ServiceRate> {
    rates
        .into_iter()
        .find(|r| r.rate > 0.0)
        .map(|r| ServiceRate { tier, ..r })
}

// ==========================================
// RateAggregator - 报价聚合器
// ==========================================
pub struct RateAggregator {
    gateway: Arc<dyn ShippingGateway>,
}

impl RateAggregator {
    pub fn new(gateway: Arc<dyn ShippingGateway>) -> Self {
        Self { gateway }
    }

    /// 并发拉取 ticket 中所有渠道的报价
    ///
    /// 该方法不会失败: 渠道错误记录在 outcome.failures 中
    pub async fn fetch_all(&self, ticket: &RateFetchTicket) -> RateFetchOutcome {
        info!(
            order_id = %ticket.order_id,
            warehouse_id = %ticket.warehouse_id,
            providers = ?ticket.providers,
            weight = ticket.package.weight,
            "开始拉取报价"
        );

        let results = join_all(
            ticket
                .providers
                .iter()
                .map(|provider| self.fetch_provider(*provider, ticket)),
        )
        .await;

        let mut outcome = RateFetchOutcome::empty(ticket);
        for rates in results {
            outcome.courier_rates.extend(rates.courier_rates);
            outcome.service_rates.extend(rates.service_rates);
            outcome.failures.extend(rates.failures);
        }

        info!(
            order_id = %ticket.order_id,
            courier_count = outcome.courier_rates.len(),
            tier_count = outcome.service_rates.len(),
            failure_count = outcome.failures.len(),
            "报价拉取完成"
        );

        outcome
    }

    async fn fetch_provider(
        &self,
        provider: ShippingProvider,
        ticket: &RateFetchTicket,
    ) -> ProviderRates {
        match provider {
            ShippingProvider::Shiprocket => self.fetch_shiprocket(ticket).await,
            ShippingProvider::Delhivery => self.fetch_delhivery(ticket).await,
            ShippingProvider::Manual => ProviderRates::default(),
        }
    }

    async fn fetch_shiprocket(&self, ticket: &RateFetchTicket) -> ProviderRates {
        let mut result = ProviderRates::default();

        match self
            .gateway
            .get_courier_rates(&ticket.order_id, &ticket.warehouse_id, &ticket.package)
            .await
        {
            Ok(rates) => {
                let raw_count = rates.len();
                result.courier_rates = filter_courier_rates(rates);
                debug!(
                    raw_count,
                    kept_count = result.courier_rates.len(),
                    "Shiprocket 报价过滤完成"
                );
                if result.courier_rates.is_empty() {
                    result.failures.push(ProviderFailure {
                        provider: ShippingProvider::Shiprocket,
                        tier: None,
                        reason: "no courier rates available".to_string(),
                    });
                }
            }
            Err(e) => {
                warn!(
                    order_id = %ticket.order_id,
                    warehouse_id = %ticket.warehouse_id,
                    error = %e,
                    "Shiprocket 报价失败，按无报价处理"
                );
                result.failures.push(ProviderFailure {
                    provider: ShippingProvider::Shiprocket,
                    tier: None,
                    reason: e.user_message(),
                });
            }
        }

        result
    }

    async fn fetch_delhivery(&self, ticket: &RateFetchTicket) -> ProviderRates {
        let tiers = ServiceTier::FETCH_ORDER;
        let responses = join_all(tiers.iter().map(|tier| {
            self.gateway.get_delhivery_rates(
                &ticket.order_id,
                &ticket.warehouse_id,
                *tier,
                ticket.package.weight,
            )
        }))
        .await;

        let mut result = ProviderRates::default();
        for (tier, response) in tiers.iter().copied().zip(responses) {
            match response {
                Ok(rates) => match pick_service_rate(tier, rates) {
                    Some(rate) => result.service_rates.push(rate),
                    None => {
                        debug!(tier = %tier, "Delhivery 档位无有效报价");
                        result.failures.push(ProviderFailure {
                            provider: ShippingProvider::Delhivery,
                            tier: Some(tier),
                            reason: "no rate available".to_string(),
                        });
                    }
                },
                Err(e) => {
                    warn!(
                        order_id = %ticket.order_id,
                        tier = %tier,
                        error = %e,
                        "Delhivery 档位报价失败，按无报价处理"
                    );
                    result.failures.push(ProviderFailure {
                        provider: ShippingProvider::Delhivery,
                        tier: Some(tier),
                        reason: e.user_message(),
                    });
                }
            }
        }

        result
    }
}
