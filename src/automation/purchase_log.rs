//! Append-only record of confirmed purchases.
//!
//! The file is opened in append mode for every entry, so entries written
//! before a crash are kept.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PurchaseLog {
    path: PathBuf,
}

impl PurchaseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Appends one purchase line stamped with the current local time.
    pub fn append(&self, card: &str, ideal_price: f64, price: u64, premium_pct: f64) -> Result<()> {
        self.append_at(Local::now(), card, ideal_price, price, premium_pct)
    }

    fn append_at(
        &self,
        time: DateTime<Local>,
        card: &str,
        ideal_price: f64,
        price: u64,
        premium_pct: f64,
    ) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create purchase log directory")?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .context("Failed to open purchase log for append")?;

        writeln!(file, "{}", format_entry(time, card, ideal_price, price, premium_pct))
            .context("Failed to write purchase log entry")?;
        Ok(())
    }
}

fn format_entry(
    time: DateTime<Local>,
    card: &str,
    ideal_price: f64,
    price: u64,
    premium_pct: f64,
) -> String {
    format!(
        "time: {} | card: {} | ideal price: {} | purchase price: {} | premium: {:.2}%",
        time.format("%Y-%m-%d %H:%M:%S"),
        card,
        ideal_price,
        price,
        premium_pct
    )
}
