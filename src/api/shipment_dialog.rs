// ==========================================
// 电商后台发货核心 - 发货弹窗 API
// ==========================================
// 职责: UI 事件入口（选仓库、改尺寸、勾商品、选渠道/快递/档位、拉报价、提交）
// 并发: 状态锁只在同步段持有，报价/提交的网络等待期间不持锁
// 审计: 报价完成、提交成功/失败写 action_log（尽力而为，失败只告警）
// ==========================================

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::client::ShippingGateway;
use crate::config::ShippingDefaults;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::{
    DimensionField, ManualShipmentFields, Order, PackageForm, ServiceTier, ShipmentCreated,
    ShipmentStage, ShippingProvider, Warehouse,
};
use crate::engine::{
    build_shipment_request, can_submit, ProviderFailure, RateAggregator, RateFetchError,
    RateFetchTicket, ShipmentSelectionState,
};
use crate::repository::action_log_repo::ActionLogRepository;

// ==========================================
// RateFetchSummary - 报价结果摘要
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFetchSummary {
    /// false 表示结果已过期被丢弃（仓库已切换/弹窗已关闭/有更新的请求）
    pub applied: bool,
    pub courier_count: usize,
    pub service_tiers: Vec<ServiceTier>,
    pub failures: Vec<ProviderFailure>,
}

// ==========================================
// ShipmentDialog - 发货弹窗
// ==========================================
pub struct ShipmentDialog {
    state: Mutex<ShipmentSelectionState>,
    warehouses: Vec<Warehouse>,
    gateway: Arc<dyn ShippingGateway>,
    aggregator: RateAggregator,
    action_log_repo: Option<Arc<ActionLogRepository>>,
    actor: String,
    submitting: AtomicBool,
    closed: AtomicBool,
}

impl ShipmentDialog {
    /// 打开弹窗
    ///
    /// # 参数
    /// - order: 待发货订单
    /// - warehouses: 宿主页面加载的仓库列表
    /// - defaults: 包裹默认值
    /// - prefill: 已有包裹输入
    /// - gateway: 后台 API
    /// - actor: 操作人（写审计日志）
    pub fn open(
        order: Order,
        warehouses: Vec<Warehouse>,
        defaults: &ShippingDefaults,
        prefill: Option<PackageForm>,
        gateway: Arc<dyn ShippingGateway>,
        actor: impl Into<String>,
    ) -> Self {
        let state = ShipmentSelectionState::open(order, defaults, prefill);

        Self {
            state: Mutex::new(state),
            warehouses,
            aggregator: RateAggregator::new(Arc::clone(&gateway)),
            gateway,
            action_log_repo: None,
            actor: actor.into(),
            submitting: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// 启用审计日志
    pub fn with_action_log(mut self, repo: Arc<ActionLogRepository>) -> Self {
        self.action_log_repo = Some(repo);
        self
    }

    /// 获取状态锁（弹窗已关闭则拒绝）
    fn lock_state(&self) -> ApiResult<MutexGuard<'_, ShipmentSelectionState>> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ApiError::BusinessRuleViolation(
                "发货弹窗已关闭".to_string(),
            ));
        }
        self.raw_lock()
    }

    fn raw_lock(&self) -> ApiResult<MutexGuard<'_, ShipmentSelectionState>> {
        self.state
            .lock()
            .map_err(|e| ApiError::InternalError(format!("状态锁获取失败: {}", e)))
    }

    /// 可选仓库（仅启用的）
    pub fn warehouses(&self) -> Vec<&Warehouse> {
        self.warehouses.iter().filter(|w| w.is_active).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 当前状态快照
    pub fn snapshot(&self) -> ApiResult<ShipmentSelectionState> {
        Ok(self.lock_state()?.clone())
    }

    pub fn stage(&self) -> ApiResult<ShipmentStage> {
        Ok(self.lock_state()?.stage())
    }

    /// 能否提交；不能时返回可展示的原因
    pub fn can_submit(&self) -> ApiResult<()> {
        let state = self.lock_state()?;
        can_submit(&state)?;
        Ok(())
    }

    // ==========================================
    // 用户操作
    // ==========================================

    /// 选择仓库（清空报价与快递/档位选择；不自动拉报价）
    pub fn select_warehouse(&self, warehouse_id: &str) -> ApiResult<()> {
        let warehouse = self.find_warehouse(warehouse_id)?;
        if !warehouse.is_active {
            return Err(ApiError::InvalidInput(format!(
                "仓库已停用: {}",
                warehouse_id
            )));
        }

        self.lock_state()?.select_warehouse(warehouse_id);
        Ok(())
    }

    pub fn set_dimension(&self, field: DimensionField, value: &str) -> ApiResult<()> {
        self.lock_state()?.set_dimension(field, value);
        Ok(())
    }

    pub fn set_package(&self, package: PackageForm) -> ApiResult<()> {
        self.lock_state()?.set_package(package);
        Ok(())
    }

    /// 勾选/取消商品（重量按建议值覆盖）
    pub fn toggle_item(&self, index: usize) -> ApiResult<BTreeSet<usize>> {
        Ok(self.lock_state()?.toggle_item(index)?)
    }

    pub fn select_provider(&self, provider: ShippingProvider) -> ApiResult<()> {
        self.lock_state()?.select_provider(provider);
        Ok(())
    }

    pub fn select_courier(&self, courier_id: i64) -> ApiResult<()> {
        Ok(self.lock_state()?.select_courier(courier_id)?)
    }

    pub fn select_tier(&self, tier: ServiceTier) -> ApiResult<()> {
        Ok(self.lock_state()?.select_tier(tier)?)
    }

    /// 填写人工运单信息
    pub fn set_manual_fields(&self, fields: ManualShipmentFields) -> ApiResult<()> {
        *self.lock_state()?.manual_mut() = fields;
        Ok(())
    }

    // ==========================================
    // 拉取报价
    // ==========================================

    /// 对当前仓库已开通的渠道并发拉取报价
    ///
    /// # 返回
    /// - Ok(summary): 拉取结束（单渠道失败记录在 failures 中）
    /// - Err(ApiError::RateFetch): 未选仓库 / 包裹无效 / 无开通渠道（不发请求）
    pub async fn fetch_rates(&self) -> ApiResult<RateFetchSummary> {
        let ticket = {
            let mut state = self.lock_state()?;
            let warehouse_id = state
                .warehouse_id()
                .map(|s| s.to_string())
                .ok_or(RateFetchError::NoWarehouse)?;
            let warehouse = self.find_warehouse(&warehouse_id)?;
            state.begin_rate_fetch(warehouse)?
        };

        // 调用方放弃等待时由 guard 清除加载状态
        let mut pending = PendingRateFetch {
            state: &self.state,
            ticket,
            settled: false,
        };

        let outcome = self.aggregator.fetch_all(&pending.ticket).await;

        let summary = RateFetchSummary {
            applied: false,
            courier_count: outcome.courier_rates.len(),
            service_tiers: outcome.service_rates.iter().map(|r| r.tier).collect(),
            failures: outcome.failures.clone(),
        };

        // 弹窗关闭后的结果也走 apply_rates（generation 已变，必然丢弃）
        let applied = self.raw_lock()?.apply_rates(outcome);
        pending.settled = true;
        if !applied {
            return Ok(summary);
        }

        let ticket = &pending.ticket;
        self.record(
            ActionLog::new(&ticket.order_id, ActionType::RatesFetched, &self.actor).with_payload(
                json!({
                    "warehouseId": ticket.warehouse_id,
                    "providers": ticket.providers,
                    "courierCount": summary.courier_count,
                    "serviceTiers": summary.service_tiers,
                    "failures": summary.failures,
                }),
            ),
        );

        Ok(RateFetchSummary {
            applied: true,
            ..summary
        })
    }

    // ==========================================
    // 提交
    // ==========================================

    /// 创建发货单
    ///
    /// # 返回
    /// - Ok(created): 成功，弹窗关闭
    /// - Err(ApiError::SubmitBlocked): 闸门未通过（不发请求）
    /// - Err(ApiError::SubmissionFailed): 后台失败，状态保留可重试
    pub async fn submit(&self) -> ApiResult<ShipmentCreated> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ApiError::SubmissionInProgress);
        }

        // 提交 future 被丢弃时同样复位
        let _guard = SubmittingGuard(&self.submitting);
        self.submit_inner().await
    }

    async fn submit_inner(&self) -> ApiResult<ShipmentCreated> {
        let (order_id, request, quoted_rate) = {
            let state = self.lock_state()?;
            let request = build_shipment_request(&state)?;
            let quoted_rate = match request.provider {
                ShippingProvider::Shiprocket => state.selected_courier_rate().map(|r| r.rate),
                ShippingProvider::Delhivery => state.selected_service_rate().map(|r| r.rate),
                ShippingProvider::Manual => None,
            };
            (state.order().id.clone(), request, quoted_rate)
        };

        info!(
            order_id = %order_id,
            provider = %request.provider,
            warehouse_id = %request.warehouse_id,
            item_count = request.item_indices.len(),
            quoted_rate = ?quoted_rate,
            "提交发货单"
        );

        // 审计载荷: 请求体 + 用户看到的报价
        let payload = serde_json::to_value(&request).ok().map(|mut value| {
            if let (Some(rate), Some(obj)) = (quoted_rate, value.as_object_mut()) {
                obj.insert("quotedRate".to_string(), json!(rate));
            }
            value
        });

        match self.gateway.create_shipment(&order_id, &request).await {
            Ok(created) => {
                info!(
                    order_id = %order_id,
                    shipment_id = ?created.shipment_id,
                    awb_code = ?created.awb_code,
                    "发货单创建成功"
                );

                let mut log = ActionLog::new(&order_id, ActionType::ShipmentCreated, &self.actor);
                if let Some(payload) = payload {
                    log = log.with_payload(payload);
                }
                if let Some(awb) = &created.awb_code {
                    log = log.with_detail(format!("AWB {}", awb));
                }
                self.record(log);

                self.close();
                Ok(created)
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "发货单创建失败");

                let mut log = ActionLog::new(&order_id, ActionType::ShipmentFailed, &self.actor)
                    .with_detail(e.to_string());
                if let Some(payload) = payload {
                    log = log.with_payload(payload);
                }
                self.record(log);

                Err(ApiError::SubmissionFailed(e.user_message()))
            }
        }
    }

    /// 关闭弹窗（进行中的报价结果将被丢弃）
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            state.close();
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn find_warehouse(&self, warehouse_id: &str) -> ApiResult<&Warehouse> {
        self.warehouses
            .iter()
            .find(|w| w.id == warehouse_id)
            .ok_or_else(|| ApiError::NotFound(format!("仓库(id={})不存在", warehouse_id)))
    }

    /// 写审计日志（失败只告警）
    fn record(&self, log: ActionLog) {
        let Some(repo) = &self.action_log_repo else {
            return;
        };
        if let Err(e) = repo.insert(&log) {
            warn!(
                action_type = %log.action_type,
                order_id = %log.order_id,
                error = %e,
                "写入操作日志失败"
            );
        }
    }
}

// ==========================================
// 取消保护
// ==========================================

/// 提交中标记: 离开作用域即复位
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 在途报价: 未结算就被丢弃时撤销本次加载状态
struct PendingRateFetch<'a> {
    state: &'a Mutex<ShipmentSelectionState>,
    ticket: RateFetchTicket,
    settled: bool,
}

impl Drop for PendingRateFetch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            if state.cancel_rate_fetch(&self.ticket) {
                warn!(
                    order_id = %self.ticket.order_id,
                    warehouse_id = %self.ticket.warehouse_id,
                    "报价等待被取消"
                );
            }
        }
    }
}
