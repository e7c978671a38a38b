//! Metrics collection for sweep operations

use attestor_registry::SweepOutcome;

/// Metrics accumulated across sweep cycles
#[derive(Debug, Clone, Default)]
pub struct SweepMetrics {
    /// Claims renewed across all sweeps
    pub renewed: usize,

    /// Claims expired across all sweeps
    pub expired: usize,

    /// Total sweep cycles completed
    pub sweep_count: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl SweepMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one sweep's outcome into the totals
    pub fn record_outcome(&mut self, outcome: &SweepOutcome) {
        self.renewed += outcome.renewed;
        self.expired += outcome.expired;
        self.sweep_count += 1;
    }

    /// Total claims processed (renewed + expired)
    pub fn total_processed(&self) -> usize {
        self.renewed + self.expired
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        format!(
            "Sweep Metrics Summary\n\
             =====================\n\
             Sweep cycles: {}\n\
             Total runtime: {}s\n\
             Renewed: {}\n\
             Expired: {}\n\
             Total processed: {}",
            self.sweep_count,
            self.total_runtime_secs,
            self.renewed,
            self.expired,
            self.total_processed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = SweepMetrics::new();
        assert_eq!(metrics.total_processed(), 0);
        assert_eq!(metrics.sweep_count, 0);
    }

    #[test]
    fn test_record_outcome() {
        let mut metrics = SweepMetrics::new();
        metrics.record_outcome(&SweepOutcome {
            renewed: 3,
            expired: 2,
        });
        metrics.record_outcome(&SweepOutcome {
            renewed: 0,
            expired: 1,
        });

        assert_eq!(metrics.renewed, 3);
        assert_eq!(metrics.expired, 3);
        assert_eq!(metrics.sweep_count, 2);
        assert_eq!(metrics.total_processed(), 6);
    }

    #[test]
    fn test_reset() {
        let mut metrics = SweepMetrics::new();
        metrics.record_outcome(&SweepOutcome {
            renewed: 1,
            expired: 1,
        });
        metrics.total_runtime_secs = 42;

        metrics.reset();

        assert_eq!(metrics.total_processed(), 0);
        assert_eq!(metrics.sweep_count, 0);
        assert_eq!(metrics.total_runtime_secs, 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = SweepMetrics::new();
        metrics.record_outcome(&SweepOutcome {
            renewed: 5,
            expired: 2,
        });
        metrics.total_runtime_secs = 120;

        let summary = metrics.summary();
        assert!(summary.contains("Sweep cycles: 1"));
        assert!(summary.contains("Total runtime: 120s"));
        assert!(summary.contains("Renewed: 5"));
        assert!(summary.contains("Expired: 2"));
        assert!(summary.contains("Total processed: 7"));
    }
}
