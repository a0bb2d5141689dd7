use super::core::{ActionLogRepository, TS_FORMAT};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;
use rusqlite::{params, Result as SqliteResult, Row};

const SELECT_COLUMNS: &str = r#"
    SELECT action_id, order_id, action_type, action_ts, actor,
           payload_json, detail
    FROM action_log
"#;

impl ActionLogRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 action_id 查询单个日志
    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!("{} WHERE action_id = ?", SELECT_COLUMNS))?;

        match stmt.query_row(params![action_id], |row| self.map_row(row)) {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询指定订单的全部日志（新 → 旧）
    pub fn find_by_order_id(&self, order_id: &str) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE order_id = ? ORDER BY action_ts DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;

        let logs = stmt
            .query_map(params![order_id], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// 查询最近的 N 条日志
    pub fn find_recent(&self, limit: i32) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY action_ts DESC, rowid DESC LIMIT ?",
            SELECT_COLUMNS
        ))?;

        let logs = stmt
            .query_map(params![limit], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    // ==========================================
    // 统计
    // ==========================================

    /// 统计某类操作的条数
    pub fn count_by_action_type(&self, action_type: ActionType) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM action_log WHERE action_type = ?",
            params![action_type.to_string()],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(&self, row: &Row) -> SqliteResult<ActionLog> {
        let action_ts_str: String = row.get(3)?;
        let action_ts = NaiveDateTime::parse_from_str(&action_ts_str, TS_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        // JSON 损坏时视为无 payload
        let payload_json = row
            .get::<_, Option<String>>(5)?
            .and_then(|s| serde_json::from_str(&s).ok());

        Ok(ActionLog {
            action_id: row.get(0)?,
            order_id: row.get(1)?,
            action_type: row.get(2)?,
            action_ts,
            actor: row.get(4)?,
            payload_json,
            detail: row.get(6)?,
        })
    }
}
