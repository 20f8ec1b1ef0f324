pub mod daily;
pub mod summary;

use ledger::Report;
use model::{period::Period, BYTES_IN_GB};

/// Text blocks for a report, in delivery order.
pub fn render(report: &Report) -> Vec<String> {
    match report.window.period {
        Period::Daily => daily::render(report),
        Period::Weekly => vec![summary::weekly(report)],
        Period::Monthly => vec![summary::monthly(report)],
    }
}

pub fn fmt_gb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_IN_GB as f64)
}

/// `- name: X.XX GB[ | unlimited: N]`
pub(crate) fn fmt_admin_line(name: &str, bytes: u64, unlimited: usize) -> String {
    if unlimited > 0 {
        format!("- {}: {} GB | unlimited: {}", name, fmt_gb(bytes), unlimited)
    } else {
        format!("- {}: {} GB", name, fmt_gb(bytes))
    }
}

pub(crate) fn fmt_total(bytes: u64, unlimited: usize) -> String {
    format!(
        "Total all: {} GB | unlimited total: {}",
        fmt_gb(bytes),
        unlimited
    )
}
