use chrono::NaiveDateTime;
use strum::EnumString;

/// One row of the `users_logs` audit table joined to its admin and user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub admin_id: Option<i64>,
    pub admin_name: String,
    pub user_id: Option<i64>,
    pub user_name: String,
    pub action: Action,
    pub old_limit: Option<i64>,
    /// `None` means the limit was removed, i.e. the user became unlimited.
    pub new_limit: Option<i64>,
    pub used_traffic_old: Option<i64>,
    pub used_traffic_new: Option<i64>,
    pub date_time: NaiveDateTime,
}

impl LogEntry {
    /// Entries without an admin or a user cannot be billed to anyone.
    pub fn owner(&self) -> Option<(i64, i64)> {
        Some((self.admin_id?, self.user_id?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Action {
    #[strum(serialize = "INSERT")]
    Insert,
    #[strum(serialize = "RESET_USAGE")]
    ResetUsage,
    #[strum(serialize = "CHANGE_LIMIT")]
    ChangeLimit,
    #[strum(serialize = "CHANGE_EXPIRE")]
    ChangeExpire,
    #[strum(default)]
    Other(String),
}

impl Action {
    pub fn parse(raw: Option<&str>) -> Action {
        let raw = raw.map(str::trim).unwrap_or_default();
        raw.parse()
            .unwrap_or_else(|_| Action::Other(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(Action::parse(Some("INSERT")), Action::Insert);
        assert_eq!(Action::parse(Some("reset_usage")), Action::ResetUsage);
        assert_eq!(Action::parse(Some(" Change_Limit ")), Action::ChangeLimit);
        assert_eq!(Action::parse(Some("CHANGE_EXPIRE")), Action::ChangeExpire);
        assert_eq!(
            Action::parse(Some("UPDATE")),
            Action::Other("UPDATE".to_string())
        );
        assert_eq!(Action::parse(None), Action::Other(String::new()));
    }
}
