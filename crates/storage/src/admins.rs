use eyre::{Context as _, Result};
use model::admin::Admin;
use sqlx::{mysql::MySqlPool, Row as _};

const ALL_ADMINS: &str = "SELECT CAST(id AS SIGNED) AS id, username FROM admins ORDER BY username";

#[derive(Clone)]
pub struct AdminStore {
    pool: MySqlPool,
}

impl AdminStore {
    pub(crate) fn new(pool: MySqlPool) -> Self {
        AdminStore { pool }
    }

    pub async fn all(&self) -> Result<Vec<Admin>> {
        let rows = sqlx::query(ALL_ADMINS)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch admins")?;

        rows.iter()
            .map(|row| -> Result<Admin> {
                Ok(Admin {
                    id: row.try_get("id")?,
                    username: row
                        .try_get::<Option<String>, _>("username")?
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}
