// ==========================================
// 集成测试共享辅助
// ==========================================

#![allow(dead_code)]

pub mod fake_gateway;
pub mod mock_admin_server;
pub mod test_data_builder;
