//! Turso-backed store.
//!
//! Records are kept as JSON payloads next to the columns used for lookup
//! and ordering. Rowid columns give insertion order.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use turso::{Builder, Connection, Database, Row, Value};

use crate::application::ports::{SIGNAL_RETENTION, StoreError, StorePort};
use crate::domain::live_probability::{ProbabilityUpdate, Signal};
use crate::domain::risk_catalog::Risk;
use crate::domain::shared::{RiskId, Timestamp, UpdateId};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS risks (
        position INTEGER PRIMARY KEY,
        id TEXT NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS probability_updates (
        seq INTEGER PRIMARY KEY,
        id TEXT NOT NULL,
        risk_id TEXT NOT NULL,
        ts_ms INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS signals (
        seq INTEGER PRIMARY KEY,
        ts_ms INTEGER NOT NULL,
        data TEXT NOT NULL
    )",
];

impl From<turso::Error> for StoreError {
    fn from(err: turso::Error) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }
}

/// Durable implementation of `StorePort` on a local Turso database file.
///
/// One connection behind an async mutex serializes writers; the risk write
/// and its audit record share a transaction.
pub struct TursoStore {
    _db: Database,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for TursoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TursoStore").finish_non_exhaustive()
    }
}

impl TursoStore {
    /// Open (or create) the database at `path` and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the file cannot be opened.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        for statement in SCHEMA {
            conn.execute(statement, ()).await?;
        }
        tracing::info!(path, "Turso store opened");
        Ok(Self {
            _db: db,
            conn: Mutex::new(conn),
        })
    }

    async fn upsert_risk(conn: &Connection, risk: &Risk) -> Result<(), StoreError> {
        let data = encode(risk)?;
        let id = Value::Text(risk.id().to_string());

        let mut rows = conn
            .query("SELECT position FROM risks WHERE id = ?1", [id.clone()])
            .await?;
        let existing = rows.next().await?.map(|row| integer(&row, 0)).transpose()?;
        drop(rows);

        match existing {
            Some(position) => {
                conn.execute(
                    "UPDATE risks SET data = ?1 WHERE position = ?2",
                    [Value::Text(data), Value::Integer(position)],
                )
                .await?;
            }
            None => {
                conn.execute(
                    "INSERT INTO risks (id, data) VALUES (?1, ?2)",
                    [id, Value::Text(data)],
                )
                .await?;
            }
        }
        Ok(())
    }

    async fn write_update(
        conn: &Connection,
        risk: &Risk,
        update: &ProbabilityUpdate,
    ) -> Result<(), StoreError> {
        let mut rows = conn
            .query(
                "SELECT position FROM risks WHERE id = ?1",
                [Value::Text(risk.id().to_string())],
            )
            .await?;
        if rows.next().await?.is_none() {
            return Err(StoreError::RiskNotFound(risk.id().clone()));
        }
        drop(rows);

        Self::upsert_risk(conn, risk).await?;
        conn.execute(
            "INSERT INTO probability_updates (id, risk_id, ts_ms, data) VALUES (?1, ?2, ?3, ?4)",
            [
                Value::Text(update.id().to_string()),
                Value::Text(update.risk_id().to_string()),
                Value::Integer(update.timestamp().unix_millis()),
                Value::Text(encode(update)?),
            ],
        )
        .await?;
        Ok(())
    }

    async fn insert_signals(conn: &Connection, signals: &[Signal]) -> Result<(), StoreError> {
        for signal in signals {
            conn.execute(
                "INSERT INTO signals (ts_ms, data) VALUES (?1, ?2)",
                [
                    Value::Integer(signal.timestamp().unix_millis()),
                    Value::Text(encode(signal)?),
                ],
            )
            .await?;
        }

        let mut rows = conn.query("SELECT MAX(seq) FROM signals", ()).await?;
        let newest = match rows.next().await? {
            Some(row) => integer(&row, 0)?,
            None => 0,
        };
        drop(rows);

        let cutoff = newest - SIGNAL_RETENTION as i64;
        if cutoff > 0 {
            conn.execute("DELETE FROM signals WHERE seq <= ?1", [Value::Integer(cutoff)])
                .await?;
        }
        Ok(())
    }

    /// Commit after a successful body, otherwise roll back.
    ///
    /// A failed COMMIT is rolled back too, so the connection never stays
    /// inside an open transaction.
    async fn finish_transaction(
        conn: &Connection,
        outcome: Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let outcome = match outcome {
            Ok(()) => conn
                .execute("COMMIT", ())
                .await
                .map(|_| ())
                .map_err(StoreError::from),
            Err(e) => Err(e),
        };
        if outcome.is_err()
            && let Err(rollback) = conn.execute("ROLLBACK", ()).await
        {
            tracing::error!(error = %rollback, "Rollback failed");
        }
        outcome
    }

    async fn collect_payloads<T: DeserializeOwned>(
        conn: &Connection,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<Vec<T>, StoreError> {
        let mut rows = conn.query(sql, params).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(decode(&text(&row, 0)?)?);
        }
        Ok(items)
    }

    async fn count(conn: &Connection, sql: &str) -> Result<usize, StoreError> {
        let mut rows = conn.query(sql, ()).await?;
        match rows.next().await? {
            Some(row) => Ok(usize::try_from(integer(&row, 0)?).unwrap_or(0)),
            None => Ok(0),
        }
    }
}

fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

fn decode<T: DeserializeOwned>(data: &str) -> Result<T, StoreError> {
    Ok(serde_json::from_str(data)?)
}

fn text(row: &Row, index: usize) -> Result<String, StoreError> {
    match row.get_value(index)? {
        Value::Text(text) => Ok(text),
        other => Err(StoreError::Serialization {
            message: format!("expected text in column {index}, found {other:?}"),
        }),
    }
}

fn integer(row: &Row, index: usize) -> Result<i64, StoreError> {
    match row.get_value(index)? {
        Value::Integer(value) => Ok(value),
        Value::Null => Ok(0),
        other => Err(StoreError::Serialization {
            message: format!("expected integer in column {index}, found {other:?}"),
        }),
    }
}

#[async_trait]
impl StorePort for TursoStore {
    async fn get_risk(&self, id: &RiskId) -> Result<Risk, StoreError> {
        let conn = self.conn.lock().await;
        let mut risks: Vec<Risk> = Self::collect_payloads(
            &conn,
            "SELECT data FROM risks WHERE id = ?1",
            vec![Value::Text(id.to_string())],
        )
        .await?;
        risks.pop().ok_or_else(|| StoreError::RiskNotFound(id.clone()))
    }

    async fn list_risks(&self) -> Result<Vec<Risk>, StoreError> {
        let conn = self.conn.lock().await;
        Self::collect_payloads(&conn, "SELECT data FROM risks ORDER BY position", Vec::new()).await
    }

    async fn put_risk(&self, risk: &Risk) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        Self::upsert_risk(&conn, risk).await
    }

    async fn record_update(
        &self,
        risk: &Risk,
        update: &ProbabilityUpdate,
    ) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute("BEGIN IMMEDIATE", ()).await?;
        let outcome = Self::write_update(&conn, risk, update).await;
        Self::finish_transaction(&conn, outcome).await
    }

    async fn append_signals(&self, signals: &[Signal]) -> Result<(), StoreError> {
        if signals.is_empty() {
            return Ok(());
        }
        let conn = self.conn.lock().await;
        conn.execute("BEGIN IMMEDIATE", ()).await?;
        let outcome = Self::insert_signals(&conn, signals).await;
        Self::finish_transaction(&conn, outcome).await
    }

    async fn list_recent_signals(&self, since: Timestamp) -> Result<Vec<Signal>, StoreError> {
        let conn = self.conn.lock().await;
        Self::collect_payloads(
            &conn,
            "SELECT data FROM signals WHERE ts_ms >= ?1 ORDER BY seq",
            vec![Value::Integer(since.unix_millis())],
        )
        .await
    }

    async fn list_update_history(
        &self,
        risk_id: &RiskId,
        limit: usize,
    ) -> Result<Vec<ProbabilityUpdate>, StoreError> {
        let conn = self.conn.lock().await;
        Self::collect_payloads(
            &conn,
            "SELECT data FROM probability_updates WHERE risk_id = ?1 \
             ORDER BY ts_ms DESC, seq DESC LIMIT ?2",
            vec![
                Value::Text(risk_id.to_string()),
                Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)),
            ],
        )
        .await
    }

    async fn get_update(&self, id: &UpdateId) -> Result<ProbabilityUpdate, StoreError> {
        let conn = self.conn.lock().await;
        let mut updates: Vec<ProbabilityUpdate> = Self::collect_payloads(
            &conn,
            "SELECT data FROM probability_updates WHERE id = ?1",
            vec![Value::Text(id.to_string())],
        )
        .await?;
        updates.pop().ok_or_else(|| StoreError::UpdateNotFound(id.clone()))
    }

    async fn count_updates(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;
        Self::count(&conn, "SELECT COUNT(*) FROM probability_updates").await
    }

    async fn count_signals(&self) -> Result<usize, StoreError> {
        let conn = self.conn.lock().await;
        Self::count(&conn, "SELECT COUNT(*) FROM signals").await
    }
}
