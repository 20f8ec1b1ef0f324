pub mod accounting;

use std::collections::BTreeMap;

use eyre::{Context as _, Result};
use model::{admin::Admin, summary::AdminSummary};
use storage::ReportSource;
use time::Window;

/// Everything a report is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub window: Window,
    /// All admins, including those without activity, in display order.
    pub roster: Vec<Admin>,
    pub summaries: BTreeMap<i64, AdminSummary>,
}

impl Report {
    pub fn summary(&self, admin_id: i64) -> Option<&AdminSummary> {
        self.summaries.get(&admin_id)
    }
}

#[derive(Clone)]
pub struct Ledger<S> {
    source: S,
}

impl<S: ReportSource> Ledger<S> {
    pub fn new(source: S) -> Self {
        Ledger { source }
    }

    pub async fn collect(&self, window: Window) -> Result<Report> {
        let roster = self
            .source
            .admins()
            .await
            .context("Failed to load admin roster")?;
        let rows = self
            .source
            .logs_between(window.start, window.end)
            .await
            .with_context(|| format!("Failed to load logs for {}", window.label))?;
        log::info!(
            "Accounting {} rows for {} admins, {} window {}",
            rows.len(),
            roster.len(),
            window.period.as_ref(),
            window.label
        );

        let summaries = accounting::accumulate(rows);
        Ok(Report {
            window,
            roster,
            summaries,
        })
    }
}
