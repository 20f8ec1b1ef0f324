use std::time::Duration;

use chrono::NaiveDate;
use eyre::Result;
use ledger::Ledger;
use model::period::Period;
use notifier::{deliver_all, Notifier};
use storage::ReportSource;
use time::Window;

/// Outcome of one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub blocks: usize,
    pub delivered: usize,
}

pub struct Reporter<S> {
    ledger: Ledger<S>,
    notifier: Box<dyn Notifier>,
    delay: Duration,
}

impl<S: ReportSource> Reporter<S> {
    pub fn new(ledger: Ledger<S>, notifier: Box<dyn Notifier>, delay: Duration) -> Self {
        Reporter {
            ledger,
            notifier,
            delay,
        }
    }

    /// Builds and sends the `period` report as seen from `today`.
    ///
    /// Fails only if the data cannot be loaded. Delivery is best-effort.
    pub async fn run(&self, period: Period, today: NaiveDate) -> Result<Delivery> {
        let window = Window::resolve(period, today);
        log::info!(
            "Building {} report {} [{}, {})",
            period.as_ref(),
            window.label,
            window.start,
            window.end
        );

        let report = self.ledger.collect(window).await?;
        let blocks = viewer::render(&report);
        for block in &blocks {
            log::info!("Report block:\n{}", block);
        }

        let delivered = deliver_all(self.notifier.as_ref(), &blocks, self.delay).await;
        if delivered < blocks.len() {
            log::warn!("Delivered {} of {} report blocks", delivered, blocks.len());
        }
        Ok(Delivery {
            blocks: blocks.len(),
            delivered,
        })
    }
}
