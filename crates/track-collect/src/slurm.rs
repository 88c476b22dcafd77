//! Scheduler queue collection
//!
//! Queries `squeue` for the current job queue and normalizes its rows into
//! [`JobRecord`]s.

use crate::command::CommandRunner;
use crate::table::{self, Header, Row};
use crate::Result;
use std::sync::Arc;
use track_core::JobRecord;
use tracing::{debug, warn};

/// Fixed squeue column layout requested by this collector.
///
/// `SQUEUE_FORMAT` and `SQUEUE_COLUMNS` describe the same eleven fields in
/// the same order; the numbers in the format string are column widths, not
/// field ids. Change them together or parsed columns silently mislabel.
const SQUEUE_FORMAT: &str = "%.18i,%.80j,%.8u,%.9T,%.6D,%.4C,%.10m,%.20V,%.20S,%.10l,%R";
const SQUEUE_COLUMNS: [&str; 11] = [
    "JOBID",
    "NAME",
    "USER",
    "STATE",
    "NODES",
    "CPUS",
    "MEMORY",
    "SUBMIT_TIME",
    "START_TIME",
    "TIME_LEFT",
    "NODELIST(REASON)",
];

/// Collector for the scheduler's job queue
pub struct SlurmCollector {
    runner: Arc<dyn CommandRunner>,
}

impl SlurmCollector {
    /// Create a new scheduler queue collector
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Produce the current job list.
    ///
    /// Degrades to an empty list when the scheduler tool fails or its
    /// output cannot be parsed; a transiently unreachable scheduler must
    /// not blank the whole dashboard.
    pub async fn collect(&self) -> Vec<JobRecord> {
        match self.try_collect().await {
            Ok(jobs) => {
                debug!("Collected {} scheduler jobs", jobs.len());
                jobs
            }
            Err(e) => {
                warn!("Scheduler queue collection failed, returning no jobs: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_collect(&self) -> Result<Vec<JobRecord>> {
        let command = format!("squeue --format=\"{SQUEUE_FORMAT}\" --noheader");
        let output = self.runner.run(&command).await?;

        // --noheader suppresses the native header, so the column order is
        // supplied here instead of read from the output.
        let rows = table::parse(&output, Header::Supplied(&SQUEUE_COLUMNS))?;
        rows.iter().map(job_from_row).collect()
    }
}

/// Fixed renaming from squeue column names to [`JobRecord`] fields.
///
/// Pure and order-preserving: the same row always yields the same record.
fn job_from_row(row: &Row) -> Result<JobRecord> {
    Ok(JobRecord {
        id: row.text("JOBID")?.to_string(),
        name: row.text("NAME")?.to_string(),
        user: row.text("USER")?.to_string(),
        state: row.text("STATE")?.to_string(),
        nodes: row.integer("NODES")?,
        cpus: row.integer("CPUS")?,
        memory: row.text("MEMORY")?.to_string(),
        submit_time: row.text("SUBMIT_TIME")?.to_string(),
        start_time: row.text("START_TIME")?.to_string(),
        walltime: row.text("TIME_LEFT")?.to_string(),
        nodelist: row.text("NODELIST(REASON)")?.to_string(),
    })
}
