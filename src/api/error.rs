// ==========================================
// 电商后台发货核心 - API层错误类型
// ==========================================
// 职责: 汇总引擎/客户端/仓储错误，转换为可直接展示的消息
// 说明: 校验类错误原样透传（消息已面向用户）
// ==========================================

use crate::client::ClientError;
use crate::engine::{RateFetchError, SelectionError, SubmitBlocker};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 发货流程错误（消息面向用户）
    // ==========================================
    #[error("{0}")]
    SubmitBlocked(#[from] SubmitBlocker),

    #[error("{0}")]
    RateFetch(#[from] RateFetchError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    /// 创建发货单失败（状态保留，可重试）
    #[error("Failed to create shipment: {0}")]
    SubmissionFailed(String),

    /// 正在提交中（重复点击）
    #[error("A shipment is already being created for this order")]
    SubmissionInProgress,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    // ==========================================
    // 外部服务错误
    // ==========================================
    #[error("后台服务错误: {0}")]
    GatewayError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("外键约束违反: {}", msg))
            }
        }
    }
}

// ==========================================
// 从 ClientError 转换
// ==========================================
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Config(msg) => ApiError::ConfigError(msg),
            other => ApiError::GatewayError(other.user_message()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DimensionField;
    use crate::engine::PackageFieldError;

    #[test]
    fn test_blocker_message_passes_through() {
        let err: ApiError = SubmitBlocker::InvalidPackage(PackageFieldError::Missing(
            DimensionField::Height,
        ))
        .into();
        assert_eq!(err.to_string(), "Please enter the package height (cm)");
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseConnectionError(_)));

        let err: ApiError = RepositoryError::NotFound {
            entity: "ActionLog".to_string(),
            id: "x".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_client_error_conversion() {
        let err: ApiError = ClientError::Rejected("Order already shipped".to_string()).into();
        assert_eq!(err.to_string(), "后台服务错误: Order already shipped");

        let err: ApiError = ClientError::Config("missing url".to_string()).into();
        assert!(matches!(err, ApiError::ConfigError(_)));
    }
}
