// ==========================================
// 电商后台发货核心 - 后台 API 客户端层
// ==========================================
// 职责: 报价与创建发货单的外部接口（trait + HTTP 实现）
// ==========================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod http_gateway;
pub mod session;

// 重导出
pub use config::GatewayConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::{ApiEnvelope, ShippingGateway};
pub use http_gateway::HttpShippingGateway;
pub use session::Session;
