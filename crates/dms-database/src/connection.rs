//! Shared PostgreSQL pool.
//!
//! One [`DatabasePool`] is built at startup and cloned into every
//! repository; clones share the same bounded set of connections.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use dms_core::config::DatabaseConfig;
use dms_core::error::{AppError, ErrorKind};
use dms_core::result::AppResult;

/// Bounded connection pool handed to repository constructors.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Opening database pool"
        );

        let min_connections = config.min_connections.min(config.max_connections);
        if min_connections != config.min_connections {
            warn!(
                min_connections = config.min_connections,
                max_connections = config.max_connections,
                "min_connections exceeds max_connections, clamping"
            );
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to open database pool: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// Borrow the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run `SELECT 1` on a pooled connection.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }

    /// Wait for in-flight statements and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replace the password of a connection URL with `****` for logging.
fn redact_url(url: &str) -> String {
    let Some(at) = url.rfind('@') else {
        return url.to_string();
    };
    let authority_start = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[authority_start..at].find(':') {
        Some(colon) => {
            let colon = authority_start + colon;
            format!("{}:****{}", &url[..colon], &url[at..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://dms:s3cret@db:5432/dms"),
            "postgres://dms:****@db:5432/dms"
        );
        assert_eq!(redact_url("postgres://db:5432/dms"), "postgres://db:5432/dms");
        assert_eq!(redact_url("postgres://dms@db/dms"), "postgres://dms@db/dms");
    }
}
