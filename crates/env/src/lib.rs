use std::{env::var, str::FromStr, sync::Arc, time::Duration};

use chrono::FixedOffset;
use dotenv::dotenv;
use eyre::{eyre, Context, Error};

#[derive(Clone)]
pub struct Env(Arc<EnvInner>);

#[derive(Clone)]
pub struct EnvInner {
    mysql_host: String,
    mysql_port: u16,
    mysql_user: String,
    mysql_password: String,
    mysql_db: String,
    tg_token: Option<String>,
    tg_chat_id: Option<i64>,
    timezone: FixedOffset,
    tg_delay: Duration,
}

impl Env {
    pub fn mysql_host(&self) -> &str {
        &self.0.mysql_host
    }

    pub fn mysql_port(&self) -> u16 {
        self.0.mysql_port
    }

    pub fn mysql_user(&self) -> &str {
        &self.0.mysql_user
    }

    pub fn mysql_password(&self) -> &str {
        &self.0.mysql_password
    }

    pub fn mysql_db(&self) -> &str {
        &self.0.mysql_db
    }

    /// Bot token and chat, present only when both are configured.
    pub fn telegram(&self) -> Option<(&str, i64)> {
        Some((self.0.tg_token.as_deref()?, self.0.tg_chat_id?))
    }

    pub fn timezone(&self) -> FixedOffset {
        self.0.timezone
    }

    pub fn tg_delay(&self) -> Duration {
        self.0.tg_delay
    }

    pub fn load() -> Result<Env, Error> {
        // a missing .env is fine, the process environment is enough
        dotenv().ok();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Env, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let offset_hours: f64 = parse("TIMEZONE_OFFSET", or("TIMEZONE_OFFSET", "3.5"))?;
        let timezone = time::offset_from_hours(offset_hours)
            .ok_or_else(|| eyre!("TIMEZONE_OFFSET is out of range: {}", offset_hours))?;

        let tg_chat_id = get("TELEGRAM_CHAT_ID")
            .map(|id| parse("TELEGRAM_CHAT_ID", id))
            .transpose()?;

        let tg_delay = parse("TELEGRAM_DELAY_SEC", or("TELEGRAM_DELAY_SEC", "2"))?;

        Ok(Env(Arc::new(EnvInner {
            mysql_host: or("MYSQL_HOST", "127.0.0.1"),
            mysql_port: parse("MYSQL_PORT", or("MYSQL_PORT", "3306"))?,
            mysql_user: or("MYSQL_USER", "root"),
            mysql_password: get("MYSQL_PASSWORD").unwrap_or_default(),
            mysql_db: or("MYSQL_DB", "pasarguard"),
            tg_token: get("TELEGRAM_BOT_TOKEN"),
            tg_chat_id,
            timezone,
            tg_delay: Duration::from_secs(tg_delay),
        })))
    }
}

fn parse<T>(key: &str, value: String) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{} is not valid: {}", key, value))
}
