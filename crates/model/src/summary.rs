use std::collections::BTreeSet;

/// What a single user was granted within a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user_id: i64,
    pub username: String,
    pub net_bytes: u64,
    pub unlimited: bool,
}

/// Per-admin roll-up of its users' accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSummary {
    pub admin_id: i64,
    pub admin_username: String,
    pub total_bytes: u64,
    pub users: Vec<UserAccount>,
    pub unlimited_users: BTreeSet<String>,
}

impl AdminSummary {
    pub fn new(admin_id: i64, admin_username: impl Into<String>) -> Self {
        AdminSummary {
            admin_id,
            admin_username: admin_username.into(),
            total_bytes: 0,
            users: Vec::new(),
            unlimited_users: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, account: UserAccount) {
        self.total_bytes = self.total_bytes.saturating_add(account.net_bytes);
        if account.unlimited {
            self.unlimited_users.insert(account.username.clone());
        }
        self.users.push(account);
    }

    pub fn unlimited_count(&self) -> usize {
        self.unlimited_users.len()
    }

    pub fn has_activity(&self) -> bool {
        self.total_bytes > 0 || !self.unlimited_users.is_empty()
    }
}
