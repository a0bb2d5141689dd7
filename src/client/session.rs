// ==========================================
// 电商后台发货核心 - 登录会话
// ==========================================
// 登录时创建，显式传入 HTTP 网关；不使用全局存储
// ==========================================

use std::fmt;

/// 登录会话凭证
#[derive(Clone, Default)]
pub struct Session {
    token: String,
    actor: String,
}

impl Session {
    pub fn new(token: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            actor: actor.into(),
        }
    }

    /// 未登录会话（本地调试）
    pub fn anonymous() -> Self {
        Self::new("", "anonymous")
    }

    pub fn token(&self) -> Option<&str> {
        let t = self.token.trim();
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    }

    /// 操作人（用于审计日志）
    pub fn actor(&self) -> &str {
        &self.actor
    }
}

// token 不进日志
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("actor", &self.actor)
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let s = Session::new("secret-token", "admin@example.com");
        let dbg = format!("{:?}", s);
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("admin@example.com"));
    }

    #[test]
    fn test_blank_token_is_none() {
        assert_eq!(Session::new("  ", "a").token(), None);
        assert_eq!(Session::anonymous().actor(), "anonymous");
    }
}
