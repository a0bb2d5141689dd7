// ==========================================
// 电商后台发货核心 - 订单领域模型
// ==========================================
// 来源: 发货单所属订单，本模块只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// OrderItem - 订单行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_name: String,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
}

impl OrderItem {
    pub fn new(product_name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            size: None,
            quantity,
            unit_price,
            product_id: None,
            variant_id: None,
        }
    }
}

// ==========================================
// Order - 待发货订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            id: id.into(),
            order_number: None,
            items,
        }
    }
}
