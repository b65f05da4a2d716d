//! SQL-backed transaction log
//! 
//! Queries the `swtb_txn_log` table through a bounded sqlx connection pool.
//! The pool is built once at startup and handed to the resolver; each lookup
//! borrows one connection and gives it back when the guard drops.

use super::{LookupKey, StoreError, TransactionLog};
use crate::{config::DatabaseConfig, TransactionRecord};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::time::Duration;
use tracing::{debug, error, info};

const LOOKUP_QUERY: &str = "\
    SELECT rrn, stan, txn_amt, term_id, setl_date, msg_type, from_acc, to_acc, work_progress \
    FROM swtb_txn_log \
    WHERE rrn = ?1 AND stan = ?2 AND txn_amt = ?3 AND term_id = ?4 AND setl_date = ?5";

const CREATE_TABLE: &str = "\
    CREATE TABLE IF NOT EXISTS swtb_txn_log (\
        rrn TEXT NOT NULL, \
        stan TEXT NOT NULL, \
        txn_amt TEXT NOT NULL, \
        term_id TEXT NOT NULL, \
        setl_date TEXT NOT NULL, \
        msg_type TEXT NOT NULL, \
        from_acc TEXT, \
        to_acc TEXT, \
        work_progress TEXT NOT NULL\
    )";

const CREATE_INDEX: &str = "\
    CREATE INDEX IF NOT EXISTS swtb_txn_log_lookup \
    ON swtb_txn_log (rrn, stan, txn_amt, term_id, setl_date)";

/// Column layout of `swtb_txn_log`
#[derive(Debug, sqlx::FromRow)]
struct TxnLogRow {
    rrn: String,
    stan: String,
    txn_amt: String,
    term_id: String,
    setl_date: String,
    msg_type: String,
    from_acc: Option<String>,
    to_acc: Option<String>,
    work_progress: String,
}

impl From<TxnLogRow> for TransactionRecord {
    fn from(row: TxnLogRow) -> Self {
        Self {
            reference_number: row.rrn,
            sequence_number: row.stan,
            amount: row.txn_amt,
            terminal_id: row.term_id,
            settlement_date: row.setl_date,
            message_type: row.msg_type,
            from_account: row.from_acc,
            to_account: row.to_acc,
            work_progress: row.work_progress,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolTimedOut,
            sqlx::Error::Io(io) if io.kind() == std::io::ErrorKind::HostUnreachable => {
                StoreError::Unreachable(io.to_string())
            }
            other => StoreError::from_message(other.to_string()),
        }
    }
}

/// Transaction log backed by a pooled SQL connection
#[derive(Clone)]
pub struct SqlTransactionLog {
    pool: SqlitePool,
}

impl SqlTransactionLog {
    /// Build the connection pool described by `config`
    ///
    /// When all `max_connections` are in use, a lookup waits up to
    /// `acquire_timeout_ms` before failing with `StoreError::PoolTimedOut`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await?;

        info!(
            "Transaction log pool ready (max_connections={}, min_connections={})",
            config.max_connections, config.min_connections
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Provision the log table and its lookup index if they do not exist
    pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_INDEX).execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for borrowed connections to come back
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Transaction log pool closed");
    }
}

#[async_trait]
impl TransactionLog for SqlTransactionLog {
    async fn find(&self, key: &LookupKey) -> Result<Vec<TransactionRecord>, StoreError> {
        debug!("Querying transaction log with {:?}", key);

        let mut conn = self.pool.acquire().await.map_err(|e| {
            error!("Failed to acquire transaction log connection: {}", e);
            StoreError::from(e)
        })?;

        let rows: Vec<TxnLogRow> = sqlx::query_as(LOOKUP_QUERY)
            .bind(key.reference_number.as_str())
            .bind(key.sequence_number.as_str())
            .bind(key.amount.as_str())
            .bind(key.terminal_id.as_str())
            .bind(key.settlement_date.as_str())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("Transaction log query failed: {}", e);
                StoreError::from(e)
            })?;

        debug!("Transaction log returned {} row(s)", rows.len());
        Ok(rows.into_iter().map(TransactionRecord::from).collect())
    }
}
