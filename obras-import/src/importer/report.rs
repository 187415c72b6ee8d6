//! Import run statistics

use std::fmt;

/// Counters for one import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Data rows seen in the source sheet
    pub rows_read: usize,
    pub projects_created: usize,
    pub crews_created: usize,
    pub responsibles_created: usize,
    /// New works persisted by this run
    pub works_inserted: usize,
    /// Rows whose external key was already stored
    pub works_skipped: usize,
    /// Rows with a blank external key
    pub rows_rejected: usize,
    /// Rows rolled back after an error
    pub rows_failed: usize,
    pub evidence_inserted: usize,
    /// Works stored after the run, including earlier runs
    pub total_works: i64,
}

impl ImportReport {
    /// One-line catalog summary
    pub fn catalog_summary(&self) -> String {
        format!(
            "{} project(s), {} crew(s), {} responsible(s) created",
            self.projects_created, self.crews_created, self.responsibles_created
        )
    }

    /// Rows that did not produce a new work
    pub fn rows_not_inserted(&self) -> usize {
        self.works_skipped + self.rows_rejected + self.rows_failed
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row(s) read: {} work(s) inserted, {} skipped, {} rejected, {} failed; \
             {} evidence record(s) inserted; {} work(s) stored in total",
            self.rows_read,
            self.works_inserted,
            self.works_skipped,
            self.rows_rejected,
            self.rows_failed,
            self.evidence_inserted,
            self.total_works
        )
    }
}
