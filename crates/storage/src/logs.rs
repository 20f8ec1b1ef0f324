use chrono::NaiveDateTime;
use eyre::{Context as _, Result};
use model::log::{Action, LogEntry};
use sqlx::{
    mysql::{MySqlPool, MySqlRow},
    Row as _,
};

// Every action is fetched: a plain UPDATE may be the one that makes a user unlimited.
const LOGS_BETWEEN: &str = r#"
    SELECT
        CAST(a.id AS SIGNED)                AS admin_id,
        a.username                          AS admin_username,
        CAST(u.id AS SIGNED)                AS user_id,
        u.username                          AS user_username,
        CAST(ul.data_limit_old AS SIGNED)   AS data_limit_old,
        CAST(ul.data_limit_new AS SIGNED)   AS data_limit_new,
        CAST(ul.used_traffic_old AS SIGNED) AS used_traffic_old,
        CAST(ul.used_traffic_new AS SIGNED) AS used_traffic_new,
        CAST(ul.action AS CHAR)             AS action,
        ul.log_date                         AS log_date
    FROM users_logs ul
    JOIN users u ON u.id = ul.user_id
    JOIN admins a ON a.id = ul.admin_id
    WHERE ul.log_date >= ?
      AND ul.log_date < ?
    ORDER BY a.id, u.id, ul.log_date
"#;

#[derive(Clone)]
pub struct LogStore {
    pool: MySqlPool,
}

impl LogStore {
    pub(crate) fn new(pool: MySqlPool) -> Self {
        LogStore { pool }
    }

    pub async fn between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<LogEntry>> {
        let rows = sqlx::query(LOGS_BETWEEN)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch logs between {} and {}", start, end))?;
        log::info!("Fetched {} log rows for [{}, {})", rows.len(), start, end);

        rows.iter()
            .map(|row| map_entry(row).context("Malformed users_logs row"))
            .collect()
    }
}

fn map_entry(row: &MySqlRow) -> Result<LogEntry, sqlx::Error> {
    let action: Option<String> = row.try_get("action")?;
    Ok(LogEntry {
        admin_id: row.try_get("admin_id")?,
        admin_name: row
            .try_get::<Option<String>, _>("admin_username")?
            .unwrap_or_default(),
        user_id: row.try_get("user_id")?,
        user_name: row
            .try_get::<Option<String>, _>("user_username")?
            .unwrap_or_default(),
        action: Action::parse(action.as_deref()),
        old_limit: row.try_get("data_limit_old")?,
        new_limit: row.try_get("data_limit_new")?,
        used_traffic_old: row.try_get("used_traffic_old")?,
        used_traffic_new: row.try_get("used_traffic_new")?,
        date_time: row.try_get("log_date")?,
    })
}
