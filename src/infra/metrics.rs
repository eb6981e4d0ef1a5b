// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one CSV row per training epoch to model_dir/metrics.csv:
//
//   epoch,train_loss,val_loss,perplexity
//   1,6.204511,5.981200,395.642100
//   2,4.871002,4.950317,141.195300
//
// val_loss and perplexity are left empty when the run has no
// validation split. Perplexity is exp(val_loss).

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const HEADER: &str = "epoch,train_loss,val_loss,perplexity";

#[derive(Debug, Clone, PartialEq)]
pub struct EpochMetrics {
    /// 1-based epoch number
    pub epoch: usize,

    /// Mean next-token cross-entropy over the training batches
    pub train_loss: f64,

    /// Mean loss on the validation split, if there is one
    pub val_loss: Option<f64>,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: Option<f64>) -> Self {
        Self { epoch, train_loss, val_loss }
    }

    pub fn perplexity(&self) -> Option<f64> {
        self.val_loss.map(f64::exp)
    }

    fn csv_row(&self) -> String {
        let opt = |v: Option<f64>| v.map(|x| format!("{x:.6}")).unwrap_or_default();
        format!(
            "{},{:.6},{},{}",
            self.epoch,
            self.train_loss,
            opt(self.val_loss),
            opt(self.perplexity()),
        )
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or create with a header) `dir/metrics.csv`.
    /// Existing rows are kept so repeated runs append.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;
        writeln!(f, "{}", m.csv_row())?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_perplexity_follows_val_loss() {
        let m = EpochMetrics::new(1, 3.0, Some(0.0));
        assert_eq!(m.perplexity(), Some(1.0));
        assert_eq!(EpochMetrics::new(1, 3.0, None).perplexity(), None);
    }

    #[test]
    fn test_appends_rows_after_header() {
        let dir    = TempDir::new().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 2.5, Some(0.0))).unwrap();
        logger.log(&EpochMetrics::new(2, 2.0, None)).unwrap();

        // Reopening must not rewrite the header
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(3, 1.5, None)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                HEADER,
                "1,2.500000,0.000000,1.000000",
                "2,2.000000,,",
                "3,1.500000,,",
            ]
        );
    }
}
