// ==========================================
// 电商后台发货核心 - 配置层
// ==========================================
// 职责: 包裹默认值与后台 API 配置
// 存储: config_kv 表（环境变量可覆盖 API 配置）
// ==========================================

pub mod config_manager;
pub mod shipping_config_trait;
pub mod shipping_defaults;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use shipping_config_trait::ShippingConfigReader;
pub use shipping_defaults::ShippingDefaults;
