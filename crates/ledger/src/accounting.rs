//! Replays `users_logs` rows into the quota each admin granted within a window.
//!
//! Billing rules:
//! - `INSERT` and `RESET_USAGE` grant the whole new limit.
//! - `CHANGE_LIMIT` grants only an increase (`new - old`).
//! - `CHANGE_EXPIRE` and unknown actions grant nothing.
//! - Any row may turn a user unlimited: the limit drops to `NULL` from a
//!   positive value, or is set to exactly `0`.

use std::collections::BTreeMap;

use model::{
    log::{Action, LogEntry},
    summary::{AdminSummary, UserAccount},
};

/// Running state of one user's replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Replay {
    pub net: u64,
    pub unlimited: bool,
}

impl Replay {
    pub fn apply(&mut self, entry: &LogEntry) {
        let old = entry.old_limit.unwrap_or(0);
        if (entry.new_limit.is_none() && old > 0) || entry.new_limit == Some(0) {
            self.unlimited = true;
        }

        let new = entry.new_limit.unwrap_or(old);
        let granted = match &entry.action {
            Action::Insert | Action::ResetUsage => new,
            Action::ChangeLimit => new.saturating_sub(old),
            Action::ChangeExpire | Action::Other(_) => 0,
        };
        if granted > 0 {
            self.net = self.net.saturating_add(granted as u64);
        }
    }
}

type UserLogs = BTreeMap<i64, Vec<LogEntry>>;

/// Groups rows by admin and user and replays each user's history in time order.
pub fn accumulate<I>(rows: I) -> BTreeMap<i64, AdminSummary>
where
    I: IntoIterator<Item = LogEntry>,
{
    let mut admins: BTreeMap<i64, (String, UserLogs)> = BTreeMap::new();
    for row in rows {
        let Some((admin_id, user_id)) = row.owner() else {
            log::debug!("Skipping unattributed log row: {:?}", row);
            continue;
        };
        let (_, users) = admins
            .entry(admin_id)
            .or_insert_with(|| (row.admin_name.clone(), BTreeMap::new()));
        users.entry(user_id).or_default().push(row);
    }

    admins
        .into_iter()
        .map(|(admin_id, (admin_name, users))| {
            let mut summary = AdminSummary::new(admin_id, admin_name);
            for (user_id, logs) in users {
                summary.add(replay_user(user_id, logs));
            }
            (admin_id, summary)
        })
        .collect()
}

fn replay_user(user_id: i64, mut logs: Vec<LogEntry>) -> UserAccount {
    // stable: same-second rows keep retrieval order
    logs.sort_by_key(|entry| entry.date_time);

    let mut replay = Replay::default();
    for entry in &logs {
        replay.apply(entry);
    }

    UserAccount {
        user_id,
        username: logs
            .last()
            .map(|entry| entry.user_name.clone())
            .unwrap_or_default(),
        net_bytes: replay.net,
        unlimited: replay.unlimited,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use model::BYTES_IN_GB;

    const GB: i64 = BYTES_IN_GB as i64;

    pub fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 15)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    pub fn row(
        admin: (i64, &str),
        user: (i64, &str),
        action: Action,
        old: Option<i64>,
        new: Option<i64>,
        date_time: NaiveDateTime,
    ) -> LogEntry {
        LogEntry {
            admin_id: Some(admin.0),
            admin_name: admin.1.to_string(),
            user_id: Some(user.0),
            user_name: user.1.to_string(),
            action,
            old_limit: old,
            new_limit: new,
            used_traffic_old: None,
            used_traffic_new: None,
            date_time,
        }
    }

    fn replay(rows: &[LogEntry]) -> Replay {
        let mut replay = Replay::default();
        for row in rows {
            replay.apply(row);
        }
        replay
    }

    const ADMIN: (i64, &str) = (1, "admin");
    const USER: (i64, &str) = (10, "user");

    #[test]
    fn test_insert_then_reset_bills_twice() {
        let rows = [
            row(ADMIN, USER, Action::Insert, Some(0), Some(10 * GB), at(9, 0)),
            row(ADMIN, USER, Action::ResetUsage, Some(10 * GB), Some(10 * GB), at(10, 0)),
        ];
        let replay = replay(&rows);
        assert_eq!(replay.net, 20 * BYTES_IN_GB);
        assert!(!replay.unlimited);
    }

    #[test]
    fn test_change_limit_to_null_is_unlimited() {
        let rows = [
            row(ADMIN, USER, Action::Insert, Some(0), Some(10 * GB), at(9, 0)),
            row(ADMIN, USER, Action::ChangeLimit, Some(10 * GB), None, at(10, 0)),
        ];
        let replay = replay(&rows);
        assert_eq!(replay.net, 10 * BYTES_IN_GB);
        assert!(replay.unlimited);
    }

    #[test]
    fn test_null_without_previous_limit_is_not_unlimited() {
        let rows = [row(ADMIN, USER, Action::ChangeLimit, None, None, at(9, 0))];
        assert_eq!(replay(&rows), Replay::default());
    }

    #[test]
    fn test_zero_limit_is_unlimited_for_any_action() {
        let actions = [
            Action::Insert,
            Action::ResetUsage,
            Action::ChangeLimit,
            Action::ChangeExpire,
            Action::Other("UPDATE".to_string()),
        ];
        for action in actions {
            let rows = [row(ADMIN, USER, action.clone(), Some(5 * GB), Some(0), at(9, 0))];
            let replay = replay(&rows);
            assert!(replay.unlimited, "{:?}", action);
            assert_eq!(replay.net, 0, "{:?}", action);
        }
    }

    #[test]
    fn test_shrinking_limit_bills_nothing() {
        let rows = [
            row(ADMIN, USER, Action::ChangeLimit, Some(10 * GB), Some(4 * GB), at(9, 0)),
            row(ADMIN, USER, Action::ChangeLimit, Some(4 * GB), Some(4 * GB), at(10, 0)),
        ];
        assert_eq!(replay(&rows).net, 0);
    }

    #[test]
    fn test_expire_and_unknown_actions_bill_nothing() {
        let rows = [
            row(ADMIN, USER, Action::ChangeExpire, Some(GB), Some(50 * GB), at(9, 0)),
            row(ADMIN, USER, Action::Other("UPDATE".to_string()), Some(GB), Some(50 * GB), at(10, 0)),
        ];
        assert_eq!(replay(&rows), Replay::default());
    }

    #[test]
    fn test_net_never_decreases() {
        let rows = [
            row(ADMIN, USER, Action::Insert, None, Some(3 * GB), at(1, 0)),
            row(ADMIN, USER, Action::ChangeLimit, Some(3 * GB), Some(GB), at(2, 0)),
            row(ADMIN, USER, Action::ResetUsage, Some(GB), Some(GB), at(3, 0)),
            row(ADMIN, USER, Action::ChangeLimit, Some(GB), None, at(4, 0)),
            row(ADMIN, USER, Action::ChangeLimit, None, Some(2 * GB), at(5, 0)),
            row(ADMIN, USER, Action::Insert, Some(-5), Some(-1), at(6, 0)),
            row(ADMIN, USER, Action::Other(String::new()), Some(2 * GB), Some(0), at(7, 0)),
        ];
        let mut state = Replay::default();
        let mut unlimited_seen = false;
        for row in &rows {
            let before = state;
            state.apply(row);
            assert!(state.net >= before.net);
            unlimited_seen |= state.unlimited;
            assert_eq!(state.unlimited, unlimited_seen);
            if before.unlimited {
                assert!(state.unlimited);
            }
        }
        assert_eq!(state.net, 3 * BYTES_IN_GB + BYTES_IN_GB + 2 * BYTES_IN_GB);
    }

    #[test]
    fn test_accumulate_sorts_by_time_and_groups() {
        let rows = vec![
            row(ADMIN, USER, Action::ChangeLimit, Some(10 * GB), Some(12 * GB), at(12, 0)),
            row(ADMIN, (11, "other"), Action::Insert, Some(0), Some(GB), at(8, 0)),
            // renamed later in the day, the latest name wins
            row(ADMIN, (10, "user-renamed"), Action::Insert, Some(0), Some(10 * GB), at(13, 0)),
            row((2, "second"), (20, "third"), Action::ChangeExpire, Some(GB), Some(GB), at(9, 0)),
        ];
        let summaries = accumulate(rows);
        assert_eq!(summaries.len(), 2);

        let first = &summaries[&1];
        assert_eq!(first.admin_username, "admin");
        assert_eq!(first.total_bytes, 13 * BYTES_IN_GB);
        assert_eq!(first.users.len(), 2);
        let user = first.users.iter().find(|u| u.user_id == 10).unwrap();
        assert_eq!(user.username, "user-renamed");
        assert_eq!(user.net_bytes, 12 * BYTES_IN_GB);
        assert!(first.unlimited_users.is_empty());

        let second = &summaries[&2];
        assert_eq!(second.total_bytes, 0);
        assert!(!second.has_activity());
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        // the last two rows share a timestamp, retrieval order decides
        let rows = vec![
            row(ADMIN, (10, "first"), Action::ChangeLimit, Some(0), Some(GB), at(9, 0)),
            row(ADMIN, (10, "second"), Action::ChangeLimit, Some(GB), None, at(9, 0)),
            row(ADMIN, (10, "early"), Action::Insert, Some(0), Some(GB), at(8, 0)),
        ];
        let summaries = accumulate(rows);
        let user = &summaries[&1].users[0];
        assert_eq!(user.username, "second");
        assert_eq!(user.net_bytes, 2 * BYTES_IN_GB);
        assert!(user.unlimited);

        let rows = vec![
            row(ADMIN, (10, "second"), Action::ChangeLimit, Some(GB), None, at(9, 0)),
            row(ADMIN, (10, "first"), Action::ChangeLimit, Some(0), Some(GB), at(9, 0)),
        ];
        assert_eq!(accumulate(rows)[&1].users[0].username, "first");
    }

    #[test]
    fn test_unattributed_rows_are_dropped() {
        let mut no_admin = row(ADMIN, USER, Action::Insert, Some(0), Some(GB), at(9, 0));
        no_admin.admin_id = None;
        let mut no_user = row(ADMIN, USER, Action::Insert, Some(0), Some(GB), at(9, 0));
        no_user.user_id = None;
        let kept = row(ADMIN, (11, "kept"), Action::Insert, Some(0), Some(2 * GB), at(9, 0));

        let summaries = accumulate(vec![no_admin, no_user, kept]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[&1].total_bytes, 2 * BYTES_IN_GB);
        assert_eq!(summaries[&1].users.len(), 1);
    }

    #[test]
    fn test_unlimited_users_are_collected() {
        let rows = vec![
            row(ADMIN, (12, "zed"), Action::Other("UPDATE".to_string()), Some(GB), Some(0), at(9, 0)),
            row(ADMIN, (11, "amy"), Action::ChangeLimit, Some(GB), None, at(9, 0)),
            row(ADMIN, (11, "amy"), Action::ChangeLimit, None, Some(GB), at(10, 0)),
        ];
        let summaries = accumulate(rows);
        let summary = &summaries[&1];
        assert_eq!(
            summary.unlimited_users.iter().collect::<Vec<_>>(),
            vec!["amy", "zed"]
        );
        assert_eq!(summary.unlimited_count(), 2);
        assert!(summary.has_activity());
    }

    #[test]
    fn test_accumulate_is_idempotent() {
        let rows = vec![
            row(ADMIN, USER, Action::Insert, Some(0), Some(5 * GB), at(9, 0)),
            row(ADMIN, USER, Action::ChangeLimit, Some(5 * GB), Some(8 * GB), at(10, 0)),
            row((2, "b"), (3, "c"), Action::ResetUsage, Some(GB), Some(0), at(11, 0)),
        ];
        assert_eq!(accumulate(rows.clone()), accumulate(rows));
    }
}
