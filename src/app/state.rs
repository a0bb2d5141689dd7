// ==========================================
// 电商后台发货核心 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享资源（数据库、配置、后台网关、审计仓储）
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, ShipmentDialog};
use crate::client::{HttpShippingGateway, Session, ShippingGateway};
use crate::config::{ConfigManager, ShippingConfigReader, ShippingDefaults};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::{Order, PackageForm, Warehouse};
use crate::repository::action_log_repo::ActionLogRepository;
use crate::repository::RepositoryError;

/// 环境变量: 数据库路径
pub const ENV_DB_PATH: &str = "ECOM_ADMIN_DB_PATH";

/// 应用状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,

    /// 后台 API 网关
    pub gateway: Arc<dyn ShippingGateway>,

    /// 当前登录会话
    pub session: Session,
}

impl AppState {
    /// 创建新的AppState实例（HTTP 网关）
    ///
    /// # 说明
    /// 1. 打开数据库并建表
    /// 2. 读取网关配置（环境变量 > config_kv）
    /// 3. 创建 HTTP 网关
    ///
    /// # 错误
    /// - DatabaseConnectionError / DatabaseError: 数据库无法打开或建表失败
    /// - ConfigError: 配置读取失败或未配置 API 地址
    /// - GatewayError: HTTP 客户端创建失败
    pub async fn new(db_path: String, session: Session) -> ApiResult<Self> {
        let (conn, config_manager) = Self::open_storage(&db_path)?;

        let gateway_config = config_manager
            .get_gateway_config()
            .await
            .map_err(|e| ApiError::ConfigError(format!("无法读取网关配置: {}", e)))?;
        let gateway = HttpShippingGateway::new(gateway_config, session.clone())?;

        Ok(Self::assemble(db_path, conn, config_manager, Arc::new(gateway), session))
    }

    /// 使用外部提供的网关创建（测试/离线场景）
    pub fn with_gateway(
        db_path: String,
        session: Session,
        gateway: Arc<dyn ShippingGateway>,
    ) -> ApiResult<Self> {
        let (conn, config_manager) = Self::open_storage(&db_path)?;
        Ok(Self::assemble(db_path, conn, config_manager, gateway, session))
    }

    fn open_storage(
        db_path: &str,
    ) -> ApiResult<(Arc<Mutex<rusqlite::Connection>>, Arc<ConfigManager>)> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("无法打开数据库 {}: {}", db_path, e))
        })?;
        ensure_schema(&conn).map_err(RepositoryError::from)?;
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| ApiError::ConfigError(format!("无法创建ConfigManager: {}", e)))?,
        );

        Ok((conn, config_manager))
    }

    fn assemble(
        db_path: String,
        conn: Arc<Mutex<rusqlite::Connection>>,
        config_manager: Arc<ConfigManager>,
        gateway: Arc<dyn ShippingGateway>,
        session: Session,
    ) -> Self {
        Self {
            db_path,
            config_manager,
            action_log_repo: Arc::new(ActionLogRepository::new(conn)),
            gateway,
            session,
        }
    }

    /// 打开发货弹窗
    ///
    /// 默认值读取失败时回退内置默认值（告警，不阻断）
    pub async fn open_shipment_dialog(
        &self,
        order: Order,
        warehouses: Vec<Warehouse>,
        prefill: Option<PackageForm>,
    ) -> ShipmentDialog {
        let defaults = match self.config_manager.load_shipping_defaults().await {
            Ok(defaults) => defaults,
            Err(e) => {
                tracing::warn!(error = %e, "读取发货默认值失败，使用内置默认值");
                ShippingDefaults::default()
            }
        };

        ShipmentDialog::open(
            order,
            warehouses,
            &defaults,
            prefill,
            Arc::clone(&self.gateway),
            self.session.actor(),
        )
        .with_action_log(Arc::clone(&self.action_log_repo))
    }
}

/// 获取默认数据库路径
///
/// 优先级: ECOM_ADMIN_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./ecom_admin_shipping.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        let dir = data_dir.join("ecom-admin-shipping-dev");

        #[cfg(not(debug_assertions))]
        let dir = data_dir.join("ecom-admin-shipping");

        // 目录创建失败时保持当前目录回退值
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("ecom_admin_shipping.db");
        }
    }

    path.to_string_lossy().to_string()
}
