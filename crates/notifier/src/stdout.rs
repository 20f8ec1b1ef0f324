use std::{
    io::{Stdout, Write},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{DeliveryError, Notifier};

const SEPARATOR_LEN: usize = 40;

/// Prints reports when no delivery channel is configured.
pub struct StdoutNotifier<W = Stdout> {
    out: Mutex<W>,
}

impl StdoutNotifier {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }
}

impl Default for StdoutNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> StdoutNotifier<W> {
    pub fn with_writer(out: W) -> Self {
        StdoutNotifier {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<W: Write + Send> Notifier for StdoutNotifier<W> {
    fn name(&self) -> &'static str {
        "stdout"
    }

    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{}\n{}\n", message, "=".repeat(SEPARATOR_LEN))?;
        out.flush()?;
        Ok(())
    }
}
