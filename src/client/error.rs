// ==========================================
// 电商后台发货核心 - 后台 API 客户端错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 报价失败由编排器降级为“无报价”，提交失败上抛给调用方
// ==========================================

use thiserror::Error;

/// 后台 REST API 调用错误
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP 状态异常: status={status}, body={body}")]
    Status { status: u16, body: String },

    #[error("后台返回失败: {0}")]
    Rejected(String),

    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("客户端配置错误: {0}")]
    Config(String),
}

impl ClientError {
    /// 面向用户的简短说明（不含技术细节）
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            ClientError::Status { status, .. } => format!("Server responded with status {}", status),
            ClientError::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            _ => "Unable to reach the server".to_string(),
        }
    }
}

/// Result 类型别名
pub type ClientResult<T> = Result<T, ClientError>;
