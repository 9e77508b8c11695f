// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Output file: <artifacts>/metrics.csv
//
//   epoch,train_loss,train_acc,val_loss,val_acc
//   1,5.812301,0.041000,,
//   2,5.204114,0.067000,,
//
// Validation columns stay empty when no validation split was
// requested.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,

    /// Mean cross-entropy over the training batches
    pub train_loss: f64,

    /// Fraction of training samples whose most likely word was the target
    pub train_acc: f64,

    pub val_loss: Option<f64>,
    pub val_acc:  Option<f64>,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   Option<f64>,
        val_acc:    Option<f64>,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }

    /// One-line human readable summary for the epoch progress output
    pub fn summary(&self) -> String {
        let mut s = format!(
            "loss={:.4} | acc={:.1}%",
            self.train_loss,
            self.train_acc * 100.0
        );
        if let (Some(loss), Some(acc)) = (self.val_loss, self.val_acc) {
            s.push_str(&format!(" | val_loss={:.4} | val_acc={:.1}%", loss, acc * 100.0));
        }
        s
    }

    fn csv_row(&self) -> String {
        let opt = |v: Option<f64>| v.map(|x| format!("{x:.6}")).unwrap_or_default();
        format!(
            "{},{:.6},{:.6},{},{}",
            self.epoch,
            self.train_loss,
            self.train_acc,
            opt(self.val_loss),
            opt(self.val_acc),
        )
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet, so
    /// repeated runs append to the same log.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "epoch,train_loss,train_acc,val_loss,val_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", m.csv_row())?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}",
            m.epoch,
            m.train_loss,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rows_are_appended() {
        let dir    = TempDir::new().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 2.5, 0.25, None, None)).unwrap();
        logger.log(&EpochMetrics::new(2, 2.0, 0.5, Some(2.2), Some(0.4))).unwrap();

        let csv = fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "epoch,train_loss,train_acc,val_loss,val_acc");
        assert_eq!(lines[1], "1,2.500000,0.250000,,");
        assert_eq!(lines[2], "2,2.000000,0.500000,2.200000,0.400000");
    }

    #[test]
    fn test_summary_includes_validation_when_present() {
        let m = EpochMetrics::new(1, 1.0, 0.5, None, None);
        assert!(!m.summary().contains("val_loss"));
        let m = EpochMetrics::new(1, 1.0, 0.5, Some(1.5), Some(0.25));
        assert!(m.summary().contains("val_acc=25.0%"));
    }
}
