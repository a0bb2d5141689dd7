// ==========================================
// 电商后台发货核心 - 发货选择状态机
// ==========================================
// 状态: NoWarehouse → WarehouseSelected → RatesFetching → RatesAvailable
//       → ProviderSelected → CourierOrTierSelected → Ready
// 规则:
// - 切换仓库: 清空两份报价与两种选择（快递/档位），generation + 1
// - 切换渠道: 清空快递/档位选择，保留报价缓存
// - 只有用户显式操作才会回退进度
// 并发: 报价拆为 begin_rate_fetch / apply_rates 两步，
//       过期的 generation 或 fetch_seq 响应直接丢弃
// ==========================================

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::config::ShippingDefaults;
use crate::domain::{
    CourierRate, DimensionField, ManualShipmentFields, Order, PackageForm, ServiceRate,
    ServiceTier, ShipmentStage, ShippingProvider, Warehouse,
};
use crate::engine::item_selection::ItemSelection;
use crate::engine::package_validator::validate_package;
use crate::engine::rate_aggregator::{RateFetchError, RateFetchOutcome, RateFetchTicket};
use crate::engine::submission_gate::can_submit;

// ==========================================
// SelectionError - 选择操作错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Item #{index} does not exist (order has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },

    #[error("Please select {expected} as the shipping provider first")]
    ProviderMismatch { expected: ShippingProvider },

    #[error("No {0} rates are available yet")]
    RatesUnavailable(ShippingProvider),

    #[error("Courier {0} is not in the current rate list")]
    UnknownCourier(i64),

    #[error("Service type {0} is not available")]
    UnknownTier(ServiceTier),
}

// ==========================================
// ShipmentSelectionState - 发货弹窗状态
// ==========================================
#[derive(Debug, Clone)]
pub struct ShipmentSelectionState {
    order: Order,
    warehouse_id: Option<String>,
    provider: Option<ShippingProvider>,
    courier_id: Option<i64>,
    service_tier: Option<ServiceTier>,
    package: PackageForm,
    items: ItemSelection,
    manual: ManualShipmentFields,

    // ===== 报价（临时数据） =====
    courier_rates: Vec<CourierRate>,
    service_rates: Vec<ServiceRate>,
    rates_fetched: bool,
    loading_rates: bool,

    // ===== 过期响应判定 =====
    generation: u64,
    fetch_seq: u64,
}

impl ShipmentSelectionState {
    /// 打开弹窗时创建
    ///
    /// # 参数
    /// - order: 待发货订单
    /// - defaults: 单件重量与默认长宽高
    /// - prefill: 已有包裹输入（非空字段保留）
    pub fn open(order: Order, defaults: &ShippingDefaults, prefill: Option<PackageForm>) -> Self {
        let items = ItemSelection::all_selected(&order.items, defaults.per_item_weight_kg);

        let mut package = prefill.unwrap_or_default();
        package.fill_blank(&defaults.package_form(items.suggested_weight_text()));

        debug!(
            order_id = %order.id,
            item_count = order.items.len(),
            weight = %package.weight,
            "发货弹窗状态初始化"
        );

        Self {
            order,
            warehouse_id: None,
            provider: None,
            courier_id: None,
            service_tier: None,
            package,
            items,
            manual: ManualShipmentFields::default(),
            courier_rates: Vec::new(),
            service_rates: Vec::new(),
            rates_fetched: false,
            loading_rates: false,
            generation: 0,
            fetch_seq: 0,
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn warehouse_id(&self) -> Option<&str> {
        self.warehouse_id.as_deref()
    }

    pub fn provider(&self) -> Option<ShippingProvider> {
        self.provider
    }

    pub fn courier_id(&self) -> Option<i64> {
        self.courier_id
    }

    pub fn service_tier(&self) -> Option<ServiceTier> {
        self.service_tier
    }

    pub fn package(&self) -> &PackageForm {
        &self.package
    }

    pub fn items(&self) -> &ItemSelection {
        &self.items
    }

    pub fn manual(&self) -> &ManualShipmentFields {
        &self.manual
    }

    pub fn courier_rates(&self) -> &[CourierRate] {
        &self.courier_rates
    }

    pub fn service_rates(&self) -> &[ServiceRate] {
        &self.service_rates
    }

    pub fn is_loading_rates(&self) -> bool {
        self.loading_rates
    }

    pub fn rates_fetched(&self) -> bool {
        self.rates_fetched
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 当前选中的 Shiprocket 报价
    pub fn selected_courier_rate(&self) -> Option<&CourierRate> {
        let id = self.courier_id?;
        self.courier_rates.iter().find(|r| r.courier_id == id)
    }

    /// 当前选中的 Delhivery 档位报价
    pub fn selected_service_rate(&self) -> Option<&ServiceRate> {
        let tier = self.service_tier?;
        self.service_rates.iter().find(|r| r.tier == tier)
    }

    /// 推导当前阶段
    pub fn stage(&self) -> ShipmentStage {
        if self.warehouse_id.is_none() {
            return ShipmentStage::NoWarehouse;
        }
        if self.loading_rates {
            return ShipmentStage::RatesFetching;
        }
        if can_submit(self).is_ok() {
            return ShipmentStage::Ready;
        }
        if self.courier_id.is_some() || self.service_tier.is_some() {
            return ShipmentStage::CourierOrTierSelected;
        }
        if self.provider.is_some() {
            return ShipmentStage::ProviderSelected;
        }
        if self.rates_fetched {
            return ShipmentStage::RatesAvailable;
        }
        ShipmentStage::WarehouseSelected
    }

    // ==========================================
    // 用户操作
    // ==========================================

    /// 选择仓库；与当前不同则清空报价和快递/档位选择
    pub fn select_warehouse(&mut self, warehouse_id: &str) {
        if self.warehouse_id.as_deref() == Some(warehouse_id) {
            return;
        }

        debug!(
            from = ?self.warehouse_id,
            to = warehouse_id,
            "切换仓库，清空报价与选择"
        );

        self.warehouse_id = Some(warehouse_id.to_string());
        self.courier_rates.clear();
        self.service_rates.clear();
        self.courier_id = None;
        self.service_tier = None;
        self.rates_fetched = false;
        self.loading_rates = false;
        self.generation += 1;
    }

    /// 选择渠道；与当前不同则清空快递/档位选择（保留报价）
    pub fn select_provider(&mut self, provider: ShippingProvider) {
        if self.provider == Some(provider) {
            return;
        }

        debug!(from = ?self.provider, to = %provider, "切换物流渠道");

        self.provider = Some(provider);
        self.courier_id = None;
        self.service_tier = None;
    }

    /// 选择 Shiprocket 快递
    pub fn select_courier(&mut self, courier_id: i64) -> Result<(), SelectionError> {
        if self.provider != Some(ShippingProvider::Shiprocket) {
            return Err(SelectionError::ProviderMismatch {
                expected: ShippingProvider::Shiprocket,
            });
        }
        if self.courier_rates.is_empty() {
            return Err(SelectionError::RatesUnavailable(ShippingProvider::Shiprocket));
        }
        if !self.courier_rates.iter().any(|r| r.courier_id == courier_id) {
            return Err(SelectionError::UnknownCourier(courier_id));
        }

        self.courier_id = Some(courier_id);
        Ok(())
    }

    /// 选择 Delhivery 档位
    pub fn select_tier(&mut self, tier: ServiceTier) -> Result<(), SelectionError> {
        if self.provider != Some(ShippingProvider::Delhivery) {
            return Err(SelectionError::ProviderMismatch {
                expected: ShippingProvider::Delhivery,
            });
        }
        if self.service_rates.is_empty() {
            return Err(SelectionError::RatesUnavailable(ShippingProvider::Delhivery));
        }
        if !self.service_rates.iter().any(|r| r.tier == tier) {
            return Err(SelectionError::UnknownTier(tier));
        }

        self.service_tier = Some(tier);
        Ok(())
    }

    /// 修改单个包裹字段（不触发报价，已有报价保留）
    pub fn set_dimension(&mut self, field: DimensionField, value: impl Into<String>) {
        self.package.set(field, value);
    }

    pub fn set_package(&mut self, package: PackageForm) {
        self.package = package;
    }

    /// 勾选/取消商品，并用建议值覆盖重量
    pub fn toggle_item(&mut self, index: usize) -> Result<BTreeSet<usize>, SelectionError> {
        let selected = self.items.toggle(index)?.clone();
        self.package.weight = self.items.suggested_weight_text();
        Ok(selected)
    }

    pub fn manual_mut(&mut self) -> &mut ManualShipmentFields {
        &mut self.manual
    }

    // ==========================================
    // 报价两步走
    // ==========================================

    /// 校验前置条件并生成报价快照
    ///
    /// # 参数
    /// - warehouse: 当前选中的仓库（需与 warehouse_id 一致）
    ///
    /// # 返回
    /// - Ok(ticket): 状态进入 RatesFetching
    /// - Err: 未选仓库 / 包裹无效 / 无开通渠道（状态不变，不发请求）
    pub fn begin_rate_fetch(
        &mut self,
        warehouse: &Warehouse,
    ) -> Result<RateFetchTicket, RateFetchError> {
        let warehouse_id = self.warehouse_id.clone().ok_or(RateFetchError::NoWarehouse)?;
        if warehouse.id != warehouse_id {
            return Err(RateFetchError::UnknownWarehouse(warehouse.id.clone()));
        }

        let package = validate_package(&self.package)?;

        let providers = warehouse.enabled_rate_providers();
        if providers.is_empty() {
            return Err(RateFetchError::NoProvidersEnabled);
        }

        self.fetch_seq += 1;
        self.loading_rates = true;

        Ok(RateFetchTicket {
            generation: self.generation,
            fetch_seq: self.fetch_seq,
            order_id: self.order.id.clone(),
            warehouse_id,
            package,
            providers,
        })
    }

    /// 合并报价结果
    ///
    /// # 返回
    /// - true: 已应用
    /// - false: 响应已过期（仓库已切换/弹窗已关闭/有更新的报价请求），被丢弃
    pub fn apply_rates(&mut self, outcome: RateFetchOutcome) -> bool {
        if outcome.generation != self.generation || outcome.fetch_seq != self.fetch_seq {
            debug!(
                outcome_generation = outcome.generation,
                current_generation = self.generation,
                outcome_seq = outcome.fetch_seq,
                current_seq = self.fetch_seq,
                "丢弃过期报价结果"
            );
            return false;
        }

        self.courier_rates = outcome.courier_rates;
        self.service_rates = outcome.service_rates;
        self.loading_rates = false;
        self.rates_fetched = true;

        match self.provider {
            Some(ShippingProvider::Shiprocket) => {
                // 自动选择最便宜的快递（列表已升序）
                self.courier_id = self.courier_rates.first().map(|r| r.courier_id);
            }
            Some(ShippingProvider::Delhivery) => {
                if let Some(tier) = self.service_tier {
                    if !self.service_rates.iter().any(|r| r.tier == tier) {
                        self.service_tier = None;
                    }
                }
                if self.service_tier.is_none() {
                    // 按拉取顺序取第一个有效档位（Express 优先），不比价
                    self.service_tier = self.service_rates.first().map(|r| r.tier);
                }
            }
            _ => {}
        }

        true
    }

    /// 放弃一次未完成的报价（调用方取消了等待）
    ///
    /// 只有 ticket 仍是当前这一次报价时才清除加载状态；
    /// 仓库已切换、弹窗已关闭或已有更新的报价请求时不做任何事
    pub fn cancel_rate_fetch(&mut self, ticket: &RateFetchTicket) -> bool {
        if !self.loading_rates
            || ticket.generation != self.generation
            || ticket.fetch_seq != self.fetch_seq
        {
            return false;
        }

        debug!(
            generation = ticket.generation,
            fetch_seq = ticket.fetch_seq,
            "报价请求已取消，清除加载状态"
        );
        self.loading_rates = false;
        true
    }

    /// 关闭弹窗: 之后到达的报价全部丢弃
    pub fn close(&mut self) {
        self.generation += 1;
        self.loading_rates = false;
    }
}
