use super::ActionLogRepository;
use crate::domain::action_log::{ActionLog, ActionType};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::ensure_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn make_test_log(action_id: &str, order_id: &str, action_type: ActionType, minute: u32) -> ActionLog {
    let mut log = ActionLog::new(order_id, action_type, "ops@example.com");
    log.action_id = action_id.to_string();
    log.action_ts = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_milli_opt(10, minute, 0, 250)
        .unwrap();
    log
}

#[test]
fn test_insert_and_find_by_id() {
    let repo = ActionLogRepository::new(setup_test_db());

    let log = make_test_log("log1", "ORD-1", ActionType::ShipmentCreated, 0)
        .with_payload(json!({"provider": "shiprocket", "courierId": 7}))
        .with_detail("AWB 1234");
    assert_eq!(repo.insert(&log).unwrap(), "log1");

    let found = repo.find_by_id("log1").unwrap().unwrap();
    assert_eq!(found.order_id, "ORD-1");
    assert_eq!(found.action_type, "ShipmentCreated");
    assert_eq!(found.action_ts, log.action_ts);
    assert_eq!(found.payload_json, Some(json!({"provider": "shiprocket", "courierId": 7})));
    assert_eq!(found.detail.as_deref(), Some("AWB 1234"));

    assert!(repo.find_by_id("missing").unwrap().is_none());
}

#[test]
fn test_duplicate_id_is_rejected() {
    let repo = ActionLogRepository::new(setup_test_db());
    let log = make_test_log("dup", "ORD-1", ActionType::RatesFetched, 0);
    repo.insert(&log).unwrap();
    assert!(repo.insert(&log).is_err());
}

#[test]
fn test_find_by_order_id_newest_first() {
    let repo = ActionLogRepository::new(setup_test_db());

    repo.insert(&make_test_log("a", "ORD-1", ActionType::RatesFetched, 0)).unwrap();
    repo.insert(&make_test_log("b", "ORD-1", ActionType::ShipmentFailed, 5)).unwrap();
    repo.insert(&make_test_log("c", "ORD-2", ActionType::RatesFetched, 7)).unwrap();

    let logs = repo.find_by_order_id("ORD-1").unwrap();
    let ids: Vec<_> = logs.iter().map(|l| l.action_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[test]
fn test_find_recent_limit() {
    let repo = ActionLogRepository::new(setup_test_db());
    for i in 0..5u32 {
        repo.insert(&make_test_log(&format!("log{}", i), "ORD-1", ActionType::RatesFetched, i))
            .unwrap();
    }

    let logs = repo.find_recent(3).unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].action_id, "log4");
    assert!(logs[0].action_ts - logs[2].action_ts == Duration::minutes(2));
}

#[test]
fn test_count_by_action_type() {
    let repo = ActionLogRepository::new(setup_test_db());
    repo.insert(&make_test_log("a", "ORD-1", ActionType::RatesFetched, 0)).unwrap();
    repo.insert(&make_test_log("b", "ORD-1", ActionType::RatesFetched, 1)).unwrap();
    repo.insert(&make_test_log("c", "ORD-1", ActionType::ShipmentCreated, 2)).unwrap();

    assert_eq!(repo.count_by_action_type(ActionType::RatesFetched).unwrap(), 2);
    assert_eq!(repo.count_by_action_type(ActionType::ShipmentCreated).unwrap(), 1);
    assert_eq!(repo.count_by_action_type(ActionType::ShipmentFailed).unwrap(), 0);
}
