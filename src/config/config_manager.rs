// ==========================================
// 电商后台发货核心 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope，仅使用 global)
// 规则: 缺失或格式错误的值回退默认值并告警，不中断发货流程
// ==========================================

use crate::client::config::DEFAULT_TIMEOUT_SECS;
use crate::client::GatewayConfig;
use crate::config::shipping_config_trait::ShippingConfigReader;
use crate::db::open_sqlite_connection;
use crate::domain::package::{DEFAULT_BREADTH_CM, DEFAULT_HEIGHT_CM, DEFAULT_LENGTH_CM};
use crate::engine::item_selection::DEFAULT_PER_ITEM_WEIGHT_KG;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 读取正数配置；缺失返回默认值，非法值告警后返回默认值
    fn get_positive_f64(&self, key: &str, default: f64) -> Result<f64, Box<dyn Error>> {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
            _ => {
                warn!(config_key = key, value = %raw, default, "配置值非法，使用默认值");
                Ok(default)
            }
        }
    }

    /// 组装 HTTP 网关配置
    ///
    /// 优先级: 环境变量 > config_kv > 默认值
    pub async fn get_gateway_config(&self) -> Result<GatewayConfig, Box<dyn Error>> {
        let mut config = GatewayConfig::default().with_timeout(self.get_api_timeout().await?);
        if let Some(url) = self.get_api_base_url().await? {
            config = config.with_base_url(url);
        }
        Ok(config.apply_env_overrides())
    }
}

// ==========================================
// ShippingConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ShippingConfigReader for ConfigManager {
    // ===== 包裹默认值 =====

    async fn get_per_item_weight_kg(&self) -> Result<f64, Box<dyn Error>> {
        self.get_positive_f64(config_keys::PER_ITEM_WEIGHT_KG, DEFAULT_PER_ITEM_WEIGHT_KG)
    }

    async fn get_default_dimensions_cm(&self) -> Result<(f64, f64, f64), Box<dyn Error>> {
        let length = self.get_positive_f64(config_keys::DEFAULT_LENGTH_CM, DEFAULT_LENGTH_CM)?;
        let breadth = self.get_positive_f64(config_keys::DEFAULT_BREADTH_CM, DEFAULT_BREADTH_CM)?;
        let height = self.get_positive_f64(config_keys::DEFAULT_HEIGHT_CM, DEFAULT_HEIGHT_CM)?;
        Ok((length, breadth, height))
    }

    // ===== 后台 API =====

    async fn get_api_base_url(&self) -> Result<Option<String>, Box<dyn Error>> {
        Ok(self
            .get_config_value(config_keys::API_BASE_URL)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    async fn get_api_timeout(&self) -> Result<Duration, Box<dyn Error>> {
        let secs = match self.get_config_value(config_keys::API_TIMEOUT_SECS)? {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!(
                        config_key = config_keys::API_TIMEOUT_SECS,
                        value = %raw,
                        "配置值非法，使用默认值"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Duration::from_secs(secs))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 后台 API
    pub const API_BASE_URL: &str = "api_base_url";
    pub const API_TIMEOUT_SECS: &str = "api_timeout_secs";

    // 包裹默认值
    pub const PER_ITEM_WEIGHT_KG: &str = "shipping_per_item_weight_kg";
    pub const DEFAULT_LENGTH_CM: &str = "shipping_default_length_cm";
    pub const DEFAULT_BREADTH_CM: &str = "shipping_default_breadth_cm";
    pub const DEFAULT_HEIGHT_CM: &str = "shipping_default_height_cm";
}
