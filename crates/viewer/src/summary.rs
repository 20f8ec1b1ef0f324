use ledger::Report;

use crate::{daily::join_names, fmt_admin_line, fmt_total};

pub fn weekly(report: &Report) -> String {
    let header = vec![
        "Weekly summary".to_string(),
        format!("Range: {}", report.window.label),
    ];
    with_roster(header, report)
}

pub fn monthly(report: &Report) -> String {
    let header = vec![format!("Monthly summary (Jalali {})", report.window.label)];
    with_roster(header, report)
}

fn with_roster(mut lines: Vec<String>, report: &Report) -> String {
    lines.push(String::new());
    lines.push("Admins:".to_string());

    let mut total_bytes = 0u64;
    let mut total_unlimited = 0;
    for admin in &report.roster {
        match report.summary(admin.id) {
            Some(summary) => {
                let unlimited = summary.unlimited_count();
                total_bytes = total_bytes.saturating_add(summary.total_bytes);
                total_unlimited += unlimited;
                lines.push(fmt_admin_line(&admin.username, summary.total_bytes, unlimited));
                if unlimited > 0 {
                    lines.push(format!("  Unlimited users: {}", join_names(summary)));
                }
            }
            None => lines.push(fmt_admin_line(&admin.username, 0, 0)),
        }
    }

    lines.push(String::new());
    lines.push(fmt_total(total_bytes, total_unlimited));
    lines.join("\n")
}
