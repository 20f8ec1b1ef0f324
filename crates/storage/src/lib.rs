pub mod admins;
pub mod logs;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

use std::time::Duration;

use admins::AdminStore;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use env::Env;
use eyre::{Context as _, Result};
use logs::LogStore;
use model::{admin::Admin, log::LogEntry};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(15);

/// Read side the reports are built from.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Every admin, ordered by username.
    async fn admins(&self) -> Result<Vec<Admin>>;

    /// Log rows with `start <= log_date < end`, ordered by admin, user and date.
    async fn logs_between(&self, start: NaiveDateTime, end: NaiveDateTime)
        -> Result<Vec<LogEntry>>;
}

#[derive(Clone)]
pub struct Storage {
    pool: MySqlPool,
    pub admins: AdminStore,
    pub logs: LogStore,
}

impl Storage {
    pub async fn new(env: &Env) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(env.mysql_host())
            .port(env.mysql_port())
            .username(env.mysql_user())
            .password(env.mysql_password())
            .database(env.mysql_db())
            .charset("utf8mb4");
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to mysql {}:{}/{}",
                    env.mysql_host(),
                    env.mysql_port(),
                    env.mysql_db()
                )
            })?;

        Ok(Storage {
            admins: AdminStore::new(pool.clone()),
            logs: LogStore::new(pool.clone()),
            pool,
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ReportSource for Storage {
    async fn admins(&self) -> Result<Vec<Admin>> {
        self.admins.all().await
    }

    async fn logs_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<LogEntry>> {
        self.logs.between(start, end).await
    }
}
