// ==========================================
// 电商后台发货核心 - 提交闸门
// ==========================================
// 职责: 判定当前状态能否创建发货单；不能时给出可直接展示的原因
// 顺序: 仓库 → 商品 → 包裹尺寸 → 渠道 → 渠道专属条件（遇到第一个失败即返回）
// 红线: 这是发起创建请求前的唯一闸门
// ==========================================

use thiserror::Error;

use crate::domain::{ShipmentRequest, ShippingProvider};
use crate::engine::package_validator::{validate_package, PackageFieldError};
use crate::engine::selection::ShipmentSelectionState;

/// 不可提交原因（消息面向用户）
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocker {
    #[error("Please select a warehouse")]
    NoWarehouse,

    #[error("Please select at least one item to ship")]
    NoItemsSelected,

    #[error("{0}")]
    InvalidPackage(#[from] PackageFieldError),

    #[error("Please select a shipping provider")]
    NoProvider,

    // ===== 人工录入 =====
    #[error("Please enter the tracking ID")]
    MissingTrackingId,

    #[error("Please enter the carrier name")]
    MissingCarrierName,

    #[error("Please enter the tracking URL")]
    MissingTrackingUrl,

    // ===== 报价渠道 =====
    #[error("Shipping rates are still loading")]
    RatesLoading,

    #[error("Please select a courier partner")]
    NoCourierSelected,

    #[error("No courier partners are available for this package")]
    NoCourierRates,

    #[error("Please select a Delhivery service type")]
    NoTierSelected,

    #[error("No Delhivery service is available for this package")]
    NoTierRates,
}

/// 判定能否提交
pub fn can_submit(state: &ShipmentSelectionState) -> Result<(), SubmitBlocker> {
    if state.warehouse_id().is_none() {
        return Err(SubmitBlocker::NoWarehouse);
    }

    if state.items().is_empty() {
        return Err(SubmitBlocker::NoItemsSelected);
    }

    validate_package(state.package())?;

    let provider = state.provider().ok_or(SubmitBlocker::NoProvider)?;

    match provider {
        ShippingProvider::Manual => {
            let manual = state.manual();
            if manual.tracking_id.trim().is_empty() {
                return Err(SubmitBlocker::MissingTrackingId);
            }
            if manual.carrier_name.trim().is_empty() {
                return Err(SubmitBlocker::MissingCarrierName);
            }
            if manual.tracking_url.trim().is_empty() {
                return Err(SubmitBlocker::MissingTrackingUrl);
            }
        }
        ShippingProvider::Shiprocket => {
            if state.is_loading_rates() {
                return Err(SubmitBlocker::RatesLoading);
            }
            if state.courier_id().is_none() {
                return Err(SubmitBlocker::NoCourierSelected);
            }
            if state.courier_rates().is_empty() {
                return Err(SubmitBlocker::NoCourierRates);
            }
        }
        ShippingProvider::Delhivery => {
            if state.is_loading_rates() {
                return Err(SubmitBlocker::RatesLoading);
            }
            if state.service_tier().is_none() {
                return Err(SubmitBlocker::NoTierSelected);
            }
            if state.service_rates().is_empty() {
                return Err(SubmitBlocker::NoTierRates);
            }
        }
    }

    Ok(())
}

/// 通过闸门后组装创建请求
pub fn build_shipment_request(
    state: &ShipmentSelectionState,
) -> Result<ShipmentRequest, SubmitBlocker> {
    can_submit(state)?;

    // can_submit 已保证以下字段存在
    let warehouse_id = state.warehouse_id().ok_or(SubmitBlocker::NoWarehouse)?;
    let provider = state.provider().ok_or(SubmitBlocker::NoProvider)?;
    let package = validate_package(state.package())?;

    let (courier_id, service_tier, manual) = match provider {
        ShippingProvider::Manual => (None, None, Some(state.manual().clone())),
        ShippingProvider::Shiprocket => (state.courier_id(), None, None),
        ShippingProvider::Delhivery => (None, state.service_tier(), None),
    };

    Ok(ShipmentRequest {
        provider,
        warehouse_id: warehouse_id.to_string(),
        courier_id,
        service_tier,
        package,
        item_indices: state.items().indices(),
        manual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShippingDefaults;
    use crate::domain::{DimensionField, Order, OrderItem, PackageForm};

    fn open_state() -> ShipmentSelectionState {
        let order = Order::new(
            "ORD-1",
            vec![OrderItem::new("Tee", 2, 499.0), OrderItem::new("Cap", 1, 299.0)],
        );
        ShipmentSelectionState::open(order, &ShippingDefaults::default(), None)
    }

    #[test]
    fn test_gate_order_short_circuits() {
        let mut state = open_state();
        assert_eq!(can_submit(&state), Err(SubmitBlocker::NoWarehouse));

        state.select_warehouse("W1");
        state.set_dimension(DimensionField::Length, "0");
        // 商品校验在尺寸之前
        state.toggle_item(0).unwrap();
        state.toggle_item(1).unwrap();
        assert_eq!(can_submit(&state), Err(SubmitBlocker::NoItemsSelected));

        state.toggle_item(0).unwrap();
        assert_eq!(
            can_submit(&state),
            Err(SubmitBlocker::InvalidPackage(PackageFieldError::NotPositive(
                DimensionField::Length
            )))
        );

        state.set_dimension(DimensionField::Length, "20");
        assert_eq!(can_submit(&state), Err(SubmitBlocker::NoProvider));
    }

    #[test]
    fn test_invalid_dimension_message_names_field() {
        let mut state = open_state();
        state.select_warehouse("W1");
        state.set_package(PackageForm::new("1", "20", "x", "10"));

        let err = can_submit(&state).unwrap_err();
        assert_eq!(err.to_string(), "Package breadth (cm) must be a number");
    }

    #[test]
    fn test_manual_requires_all_three_fields() {
        let mut state = open_state();
        state.select_warehouse("W1");
        state.select_provider(ShippingProvider::Manual);

        assert_eq!(can_submit(&state), Err(SubmitBlocker::MissingTrackingId));
        state.manual_mut().tracking_id = "AWB-1".to_string();
        assert_eq!(can_submit(&state), Err(SubmitBlocker::MissingCarrierName));
        state.manual_mut().carrier_name = "BlueDart".to_string();
        assert_eq!(can_submit(&state), Err(SubmitBlocker::MissingTrackingUrl));
        state.manual_mut().tracking_url = "https://track.example/AWB-1".to_string();
        assert_eq!(can_submit(&state), Ok(()));

        // 空白也视为空
        state.manual_mut().carrier_name = "   ".to_string();
        assert_eq!(can_submit(&state), Err(SubmitBlocker::MissingCarrierName));
    }

    #[test]
    fn test_manual_ignores_rate_state() {
        let mut state = open_state();
        state.select_warehouse("W1");
        state.select_provider(ShippingProvider::Manual);
        state.manual_mut().tracking_id = "T".to_string();
        state.manual_mut().carrier_name = "C".to_string();
        state.manual_mut().tracking_url = "U".to_string();
        // 没有任何报价、也未拉取过
        assert!(state.courier_rates().is_empty());
        assert_eq!(can_submit(&state), Ok(()));

        let req = build_shipment_request(&state).unwrap();
        assert_eq!(req.provider, ShippingProvider::Manual);
        assert_eq!(req.manual.as_ref().map(|m| m.tracking_id.as_str()), Some("T"));
        assert_eq!(req.courier_id, None);
        assert_eq!(req.service_tier, None);
    }

    #[test]
    fn test_rate_providers_need_selection() {
        let mut state = open_state();
        state.select_warehouse("W1");

        state.select_provider(ShippingProvider::Shiprocket);
        assert_eq!(can_submit(&state), Err(SubmitBlocker::NoCourierSelected));

        state.select_provider(ShippingProvider::Delhivery);
        assert_eq!(can_submit(&state), Err(SubmitBlocker::NoTierSelected));
    }

    #[test]
    fn test_courier_message_text() {
        assert_eq!(
            SubmitBlocker::NoCourierSelected.to_string(),
            "Please select a courier partner"
        );
    }
}
