// ==========================================
// 电商后台发货核心 - 报价模型
// ==========================================
// 生命周期: 每次报价请求重新拉取，任何失效操作后丢弃
// ==========================================

use crate::domain::types::ServiceTier;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// CourierRate - 聚合平台（Shiprocket）单个快递报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierRate {
    pub courier_id: i64,
    #[serde(default)]
    pub courier_name: String,
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub estimated_delivery_days: Option<u32>,
    #[serde(default)]
    pub cod_available: bool,
    #[serde(default)]
    pub air_available: bool,
    #[serde(default)]
    pub surface_available: bool,
    #[serde(default)]
    pub min_quantity: Option<u32>,
}

impl CourierRate {
    /// 有效报价: rate > 0 且快递名称非空
    pub fn is_usable(&self) -> bool {
        self.rate > 0.0 && !self.courier_name.trim().is_empty()
    }
}

// ==========================================
// ServiceRate - 直连快递（Delhivery）档位报价
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRate {
    pub tier: ServiceTier,
    pub rate: f64,
    #[serde(default, deserialize_with = "lenient_days")]
    pub estimated_delivery_days: Option<u32>,
    #[serde(default)]
    pub cod_available: bool,
}

/// 后台有时把天数返回为字符串（"3"），有时为数字
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_rate_lenient_days() {
        let a: CourierRate = serde_json::from_str(
            r#"{"courierId": 10, "courierName": "Xpress", "rate": 120.5, "estimatedDeliveryDays": "4"}"#,
        )
        .unwrap();
        assert_eq!(a.estimated_delivery_days, Some(4));

        let b: CourierRate = serde_json::from_str(
            r#"{"courierId": 11, "courierName": "Blue", "rate": 99, "estimatedDeliveryDays": 2}"#,
        )
        .unwrap();
        assert_eq!(b.estimated_delivery_days, Some(2));

        let c: CourierRate =
            serde_json::from_str(r#"{"courierId": 12, "rate": 50, "estimatedDeliveryDays": "n/a"}"#)
                .unwrap();
        assert_eq!(c.estimated_delivery_days, None);
        assert!(!c.is_usable()); // 名称为空
    }

    #[test]
    fn test_service_rate_deserialize() {
        let r: ServiceRate =
            serde_json::from_str(r#"{"tier": "surface", "rate": 80, "estimatedDeliveryDays": 3, "codAvailable": true}"#)
                .unwrap();
        assert_eq!(r.tier, ServiceTier::Surface);
        assert_eq!(r.estimated_delivery_days, Some(3));
        assert!(r.cod_available);
    }
}
