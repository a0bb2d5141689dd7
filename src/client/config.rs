// ==========================================
// 电商后台发货核心 - HTTP 网关配置
// ==========================================
// 来源优先级: 环境变量 > config_kv > 默认值
// ==========================================

use std::time::Duration;

use crate::client::error::{ClientError, ClientResult};

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 环境变量: 后台 API 地址
pub const ENV_BASE_URL: &str = "ECOM_ADMIN_API_BASE_URL";
/// 环境变量: 请求超时（秒）
pub const ENV_TIMEOUT_SECS: &str = "ECOM_ADMIN_API_TIMEOUT_SECS";

/// HTTP 网关配置
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// 后台 API 根地址（如 https://api.example.com/api）
    pub base_url: String,

    /// 请求超时
    pub timeout: Duration,

    /// 额外请求头
    pub headers: Vec<(String, String)>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// 从环境变量创建
    ///
    /// - `ECOM_ADMIN_API_BASE_URL`: 必填
    /// - `ECOM_ADMIN_API_TIMEOUT_SECS`: 可选（默认 30）
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var(ENV_BASE_URL)
            .map_err(|_| ClientError::Config(format!("{} not set", ENV_BASE_URL)))?;

        Ok(Self::default()
            .with_base_url(base_url)
            .apply_env_overrides())
    }

    /// 用环境变量覆盖已有配置（变量不存在则保持原值）
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Some(secs) = std::env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// 拼接接口地址（去掉多余的斜杠）
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
