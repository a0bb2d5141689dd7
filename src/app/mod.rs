// ==========================================
// 电商后台发货核心 - 应用层
// ==========================================
// 职责: 组装共享资源，为宿主页面打开发货弹窗
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
