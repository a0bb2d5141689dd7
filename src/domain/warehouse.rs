// ==========================================
// 电商后台发货核心 - 仓库领域模型
// ==========================================
// 来源: 宿主页面加载后传入，本模块只读
// ==========================================

use crate::domain::types::ShippingProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ProviderCapability - 仓库对某渠道的开通情况
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCapability {
    pub enabled: bool,                 // 是否开通
    pub provider_code: Option<String>, // 渠道侧仓库编码（如 pickup location）
}

// ==========================================
// Warehouse - 发货仓库
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub is_active: bool,

    #[serde(default)]
    pub providers: BTreeMap<ShippingProvider, ProviderCapability>,
}

impl Warehouse {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            is_active: true,
            providers: BTreeMap::new(),
        }
    }

    /// 开通某渠道（构造辅助）
    pub fn with_provider(mut self, provider: ShippingProvider, provider_code: Option<&str>) -> Self {
        self.providers.insert(
            provider,
            ProviderCapability {
                enabled: true,
                provider_code: provider_code.map(|s| s.to_string()),
            },
        );
        self
    }

    pub fn is_enabled(&self, provider: ShippingProvider) -> bool {
        self.providers
            .get(&provider)
            .map(|c| c.enabled)
            .unwrap_or(false)
    }

    /// 已开通且需要报价的渠道（按 RATE_PROVIDERS 顺序）
    pub fn enabled_rate_providers(&self) -> Vec<ShippingProvider> {
        ShippingProvider::RATE_PROVIDERS
            .iter()
            .copied()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_rate_providers_skips_manual_and_disabled() {
        let mut wh = Warehouse::new("W1", "Main", "MAIN")
            .with_provider(ShippingProvider::Manual, None)
            .with_provider(ShippingProvider::Delhivery, Some("DL-MAIN"));
        wh.providers.insert(
            ShippingProvider::Shiprocket,
            ProviderCapability {
                enabled: false,
                provider_code: None,
            },
        );

        assert_eq!(wh.enabled_rate_providers(), vec![ShippingProvider::Delhivery]);
        assert!(!wh.is_enabled(ShippingProvider::Shiprocket));
    }

    #[test]
    fn test_deserialize_capability_map() {
        let json = r#"{
            "id": "W2", "name": "North", "code": "NTH", "isActive": true,
            "providers": {
                "shiprocket": {"enabled": true, "providerCode": "Primary"},
                "delhivery": {"enabled": false}
            }
        }"#;
        let wh: Warehouse = serde_json::from_str(json).unwrap();
        assert_eq!(wh.enabled_rate_providers(), vec![ShippingProvider::Shiprocket]);
        assert_eq!(
            wh.providers[&ShippingProvider::Shiprocket].provider_code.as_deref(),
            Some("Primary")
        );
    }
}
