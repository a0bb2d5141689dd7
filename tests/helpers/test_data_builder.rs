// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use ecom_admin_shipping::domain::{
    CourierRate, Order, OrderItem, ServiceRate, ServiceTier, ShippingProvider, Warehouse,
};

/// 按数量构造订单（每行单价 100）
pub fn order_with_quantities(order_id: &str, quantities: &[u32]) -> Order {
    let items = quantities
        .iter()
        .enumerate()
        .map(|(i, q)| OrderItem::new(format!("Product {}", i + 1), *q, 100.0))
        .collect();
    Order::new(order_id, items)
}

/// 构造仓库并开通指定渠道
pub fn warehouse(id: &str, providers: &[ShippingProvider]) -> Warehouse {
    providers.iter().fold(
        Warehouse::new(id, format!("Warehouse {}", id), id.to_uppercase()),
        |wh, p| wh.with_provider(*p, None),
    )
}

pub fn courier(id: i64, name: &str, rate: f64) -> CourierRate {
    CourierRate {
        courier_id: id,
        courier_name: name.to_string(),
        rate,
        estimated_delivery_days: Some(4),
        cod_available: true,
        air_available: false,
        surface_available: true,
        min_quantity: None,
    }
}

pub fn service_rate(tier: ServiceTier, rate: f64, days: u32) -> ServiceRate {
    ServiceRate {
        tier,
        rate,
        estimated_delivery_days: Some(days),
        cod_available: true,
    }
}
