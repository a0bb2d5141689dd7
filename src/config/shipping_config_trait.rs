// ==========================================
// 电商后台发货核心 - 发货配置读取 Trait
// ==========================================
// 职责: 定义发货弹窗所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::shipping_defaults::ShippingDefaults;
use async_trait::async_trait;
use std::error::Error;
use std::time::Duration;

// ==========================================
// ShippingConfigReader Trait
// ==========================================
// 用途: 发货弹窗/HTTP 网关所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ShippingConfigReader: Send + Sync {
    // ===== 包裹默认值 =====

    /// 获取单件估算重量（kg）
    ///
    /// # 默认值
    /// - 0.5
    async fn get_per_item_weight_kg(&self) -> Result<f64, Box<dyn Error>>;

    /// 获取默认长宽高（cm）
    ///
    /// # 返回
    /// - (length, breadth, height)
    ///
    /// # 默认值
    /// - (20, 15, 10)
    async fn get_default_dimensions_cm(&self) -> Result<(f64, f64, f64), Box<dyn Error>>;

    // ===== 后台 API =====

    /// 获取后台 API 根地址（未配置返回 None）
    async fn get_api_base_url(&self) -> Result<Option<String>, Box<dyn Error>>;

    /// 获取请求超时
    ///
    /// # 默认值
    /// - 30 秒
    async fn get_api_timeout(&self) -> Result<Duration, Box<dyn Error>>;

    /// 一次性加载包裹默认值快照
    async fn load_shipping_defaults(&self) -> Result<ShippingDefaults, Box<dyn Error>> {
        let per_item_weight_kg = self.get_per_item_weight_kg().await?;
        let (length_cm, breadth_cm, height_cm) = self.get_default_dimensions_cm().await?;

        Ok(ShippingDefaults {
            per_item_weight_kg,
            length_cm,
            breadth_cm,
            height_cm,
        })
    }
}
