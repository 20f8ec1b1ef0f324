use ledger::Report;
use model::summary::{AdminSummary, UserAccount};

use crate::{fmt_admin_line, fmt_gb, fmt_total};

/// Per-admin details followed by the roster summary.
pub fn render(report: &Report) -> Vec<String> {
    let mut blocks = details(report);
    blocks.push(summary(report));
    blocks
}

/// One block per admin that granted traffic or made someone unlimited.
pub fn details(report: &Report) -> Vec<String> {
    let mut active: Vec<&AdminSummary> = report
        .summaries
        .values()
        .filter(|summary| summary.has_activity())
        .collect();
    active.sort_by(|a, b| a.admin_username.cmp(&b.admin_username));
    active
        .into_iter()
        .map(|summary| admin_detail(&report.window.label, summary))
        .collect()
}

pub fn admin_detail(label: &str, summary: &AdminSummary) -> String {
    let mut lines = vec![
        format!("Daily report - {}", label),
        format!("Admin: {}", summary.admin_username),
        String::new(),
    ];

    let mut users: Vec<&UserAccount> = summary.users.iter().collect();
    users.sort_by(|a, b| a.username.cmp(&b.username));
    lines.extend(users.into_iter().filter_map(fmt_user));

    lines.push(String::new());
    lines.push(format!("Total: {} GB", fmt_gb(summary.total_bytes)));

    if !summary.unlimited_users.is_empty() {
        lines.push(String::new());
        lines.push("Unlimited users:".to_string());
        lines.push(join_names(summary));
    }
    lines.join("\n")
}

fn fmt_user(user: &UserAccount) -> Option<String> {
    let mut parts = Vec::with_capacity(2);
    if user.net_bytes > 0 {
        parts.push(format!("+{} GB", fmt_gb(user.net_bytes)));
    }
    if user.unlimited {
        parts.push("unlimited".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("- {}: {}", user.username, parts.join(" | ")))
    }
}

pub(crate) fn join_names(summary: &AdminSummary) -> String {
    summary
        .unlimited_users
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every roster admin, zero-activity ones included.
pub fn summary(report: &Report) -> String {
    let mut lines = vec![
        format!("Summary - {}", report.window.label),
        String::new(),
        "Admins:".to_string(),
    ];

    let mut total_bytes = 0u64;
    let mut total_unlimited = 0;
    for admin in &report.roster {
        let (bytes, unlimited) = report
            .summary(admin.id)
            .map(|s| (s.total_bytes, s.unlimited_count()))
            .unwrap_or_default();
        total_bytes = total_bytes.saturating_add(bytes);
        total_unlimited += unlimited;
        lines.push(fmt_admin_line(&admin.username, bytes, unlimited));
    }

    lines.push(String::new());
    lines.push(fmt_total(total_bytes, total_unlimited));
    lines.join("\n")
}
