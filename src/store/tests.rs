//! Tests for the transaction log store
//! 
//! Runs the SQL adapter against an in-memory SQLite pool

#[cfg(test)]
mod tests {
    use crate::{
        config::DatabaseConfig,
        store::{LookupKey, SqlTransactionLog, StoreError, TransactionLog},
    };
    use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
    use std::time::Duration;

    /// Helper creating a single-connection in-memory pool with the log table
    async fn memory_log() -> (SqlitePool, SqlTransactionLog) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(200))
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let log = SqlTransactionLog::from_pool(pool.clone());
        log.create_schema().await.unwrap();
        (pool, log)
    }

    /// Helper inserting one log row
    async fn insert_row(
        pool: &SqlitePool,
        msg_type: &str,
        from_acc: Option<&str>,
        to_acc: Option<&str>,
        work_progress: &str,
    ) {
        sqlx::query(
            "INSERT INTO swtb_txn_log \
             (rrn, stan, txn_amt, term_id, setl_date, msg_type, from_acc, to_acc, work_progress) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind("456107036921")
        .bind("543028")
        .bind("000020000000")
        .bind("888777")
        .bind("250319")
        .bind(msg_type)
        .bind(from_acc)
        .bind(to_acc)
        .bind(work_progress)
        .execute(pool)
        .await
        .unwrap();
    }

    fn key() -> LookupKey {
        LookupKey {
            reference_number: "456107036921".to_string(),
            sequence_number: "543028".to_string(),
            amount: "000020000000".to_string(),
            terminal_id: "888777".to_string(),
            settlement_date: "250319".to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_returns_all_matching_rows() {
        let (pool, log) = memory_log().await;
        insert_row(&pool, "1200", Some("0011223344"), None, "S").await;
        insert_row(&pool, "1400", None, None, "S").await;

        let rows = log.find(&key()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.message_type == "1200"));
        assert!(rows.iter().any(|r| r.message_type == "1400"));
        assert_eq!(rows[0].reference_number, "456107036921");
        assert_eq!(rows[0].settlement_date, "250319");
    }

    #[tokio::test]
    async fn test_find_requires_every_key_to_match() {
        let (pool, log) = memory_log().await;
        insert_row(&pool, "1200", None, Some("9988776655"), "F").await;

        let mut other_date = key();
        other_date.settlement_date = "250320".to_string();
        assert!(log.find(&other_date).await.unwrap().is_empty());

        let mut other_amount = key();
        other_amount.amount = "000000020000".to_string();
        assert!(log.find(&other_amount).await.unwrap().is_empty());

        let rows = log.find(&key()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].to_account.as_deref(), Some("9988776655"));
        assert_eq!(rows[0].from_account, None);
    }

    #[tokio::test]
    async fn test_connection_is_released_after_each_lookup() {
        // Only one connection exists; a leaked guard would starve the next lookup
        let (_pool, log) = memory_log().await;

        for _ in 0..3 {
            assert!(log.find(&key()).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_exhausted_pool_times_out() {
        let (pool, log) = memory_log().await;
        let _held = pool.acquire().await.unwrap();

        let err = log.find(&key()).await.unwrap_err();

        assert!(matches!(err, StoreError::PoolTimedOut));
    }

    #[tokio::test]
    async fn test_connect_builds_pool_from_config() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout_ms: 1_000,
            idle_timeout_secs: 60,
        };

        let log = SqlTransactionLog::connect(&config).await.unwrap();
        log.create_schema().await.unwrap();

        assert!(log.find(&key()).await.unwrap().is_empty());
        log.close().await;
    }

    #[test]
    fn test_unreachable_marker_is_recognized() {
        let err = StoreError::from_message("ORA-12543: TNS:destination host unreachable");
        assert!(matches!(err, StoreError::Unreachable(_)));

        let err = StoreError::from_message("ORA-00942: table or view does not exist");
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[test]
    fn test_driver_errors_are_translated() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::PoolTimedOut
        ));

        let io = std::io::Error::from(std::io::ErrorKind::HostUnreachable);
        assert!(matches!(
            StoreError::from(sqlx::Error::Io(io)),
            StoreError::Unreachable(_)
        ));

        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }
}
