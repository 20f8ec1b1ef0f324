use async_trait::async_trait;
use chrono::NaiveDateTime;
use eyre::Result;
use model::{admin::Admin, log::LogEntry};

use crate::ReportSource;

/// `ReportSource` over rows held in memory, with the same filtering and
/// ordering as the MySQL queries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    admins: Vec<Admin>,
    logs: Vec<LogEntry>,
}

impl MemoryStore {
    pub fn new(admins: Vec<Admin>, logs: Vec<LogEntry>) -> Self {
        MemoryStore { admins, logs }
    }
}

#[async_trait]
impl ReportSource for MemoryStore {
    async fn admins(&self) -> Result<Vec<Admin>> {
        let mut admins = self.admins.clone();
        admins.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(admins)
    }

    async fn logs_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<LogEntry>> {
        let mut logs: Vec<LogEntry> = self
            .logs
            .iter()
            .filter(|entry| entry.date_time >= start && entry.date_time < end)
            .cloned()
            .collect();
        logs.sort_by_key(|entry| (entry.admin_id, entry.user_id, entry.date_time));
        Ok(logs)
    }
}
