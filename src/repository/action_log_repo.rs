// ==========================================
// 电商后台发货核心 - 操作日志数据仓储
// ==========================================
// 对齐: db.rs action_log 表
// 红线: 只做数据映射；调用方写日志失败不得阻断发货
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::ActionLogRepository;
