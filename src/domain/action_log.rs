// ==========================================
// 电商后台发货核心 - 操作日志领域模型
// ==========================================
// 用途: 发货操作审计追踪（报价、提交成功/失败）
// 对齐: db.rs 中 action_log 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,              // 日志ID (UUID)
    pub order_id: String,               // 关联订单
    pub action_type: String,            // 操作类型 (ActionType 字符串)
    pub action_ts: NaiveDateTime,       // 操作时间
    pub actor: String,                  // 操作人
    pub payload_json: Option<JsonValue>, // 操作参数/结果 (JSON)
    pub detail: Option<String>,         // 详细描述
}

impl ActionLog {
    /// 以当前时间创建日志
    pub fn new(order_id: &str, action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            order_id: order_id.to_string(),
            action_type: action_type.to_string(),
            action_ts: chrono::Utc::now().naive_utc(),
            actor: actor.to_string(),
            payload_json: None,
            detail: None,
        }
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    RatesFetched,    // 拉取报价完成
    ShipmentCreated, // 发货单创建成功
    ShipmentFailed,  // 发货单创建失败
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::RatesFetched => write!(f, "RatesFetched"),
            ActionType::ShipmentCreated => write!(f, "ShipmentCreated"),
            ActionType::ShipmentFailed => write!(f, "ShipmentFailed"),
        }
    }
}
