//! Run report accumulated across all entries

use specwatch_domain::UpdateResult;

/// An entry that failed during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    /// `<vendor>/<api>`
    pub key: String,
    /// Rendered error
    pub error: String,
}

/// Outcome totals for one run
///
/// Updates are kept in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Successful updates
    pub updates: Vec<UpdateResult>,

    /// Entries whose upstream had not moved
    pub unchanged: usize,

    /// Entries skipped without error (draft releases, low confidence, no source)
    pub skipped: usize,

    /// Entries that failed
    pub failures: Vec<EntryFailure>,
}

impl RunReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful update
    pub fn record_update(&mut self, update: UpdateResult) {
        self.updates.push(update);
    }

    /// Record an entry that was already current
    pub fn record_unchanged(&mut self) {
        self.unchanged += 1;
    }

    /// Record a skipped entry
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Record a failed entry
    pub fn record_failure(&mut self, key: impl Into<String>, error: impl Into<String>) {
        self.failures.push(EntryFailure {
            key: key.into(),
            error: error.into(),
        });
    }

    /// Number of updates found
    pub fn update_count(&self) -> usize {
        self.updates.len()
    }

    /// Number of entries processed
    pub fn processed(&self) -> usize {
        self.updates.len() + self.unchanged + self.skipped + self.failures.len()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Processed {} entries: {} updated, {} unchanged, {} skipped, {} failed",
            self.processed(),
            self.update_count(),
            self.unchanged,
            self.skipped,
            self.failures.len()
        )];
        for failure in &self.failures {
            lines.push(format!("  {}: {}", failure.key, failure.error));
        }
        lines.join("\n")
    }
}
