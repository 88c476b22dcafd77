//! Snapshot aggregation
//!
//! One [`Aggregator`] call fans out to all three collectors and merges
//! their outputs into a single [`Snapshot`].

use crate::command::CommandRunner;
use crate::gpu::GpuCollector;
use crate::host::HostCollector;
use crate::slurm::SlurmCollector;
use std::sync::Arc;
use track_core::Snapshot;
use tracing::debug;

/// Aggregates all collectors into point-in-time snapshots.
///
/// Has no failure path: collector failures are absorbed at the collector
/// boundary as empty lists, and host stats are always obtainable, so
/// every call returns a complete [`Snapshot`]. Each call constructs a
/// fresh value; nothing is cached or mutated in place, so concurrent
/// calls share no state beyond the stateless command runner.
pub struct Aggregator {
    slurm: SlurmCollector,
    gpu: GpuCollector,
    host: HostCollector,
}

impl Aggregator {
    /// Create an aggregator whose tool-backed collectors share one runner
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            slurm: SlurmCollector::new(runner.clone()),
            gpu: GpuCollector::new(runner),
            host: HostCollector::new(),
        }
    }

    /// Collect from every source and assemble one snapshot.
    ///
    /// The three collectors have no data dependency on each other and run
    /// concurrently; all of them run to completion once started.
    pub async fn collect_all(&self) -> Snapshot {
        let (slurm_jobs, gpu_stats, system_stats) = tokio::join!(
            self.slurm.collect(),
            self.gpu.collect(),
            self.host.collect(),
        );

        debug!(
            "Assembled snapshot: {} jobs, {} GPUs",
            slurm_jobs.len(),
            gpu_stats.len()
        );

        Snapshot {
            slurm_jobs,
            gpu_stats,
            system_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{ScriptedRunner, MOCK_NVIDIA_SMI_ROWS, MOCK_SQUEUE_ROWS};

    #[tokio::test]
    async fn test_collects_full_snapshot() {
        let runner = ScriptedRunner::new()
            .on("squeue", Ok(MOCK_SQUEUE_ROWS))
            .on("nvidia-smi", Ok(MOCK_NVIDIA_SMI_ROWS));
        let snapshot = Aggregator::new(Arc::new(runner)).collect_all().await;

        assert_eq!(snapshot.slurm_jobs.len(), 4);
        assert_eq!(snapshot.slurm_jobs[0].id, "72892");
        assert_eq!(snapshot.gpu_stats.len(), 2);
        assert!(snapshot.gpu_stats[1].is_hot());
        assert!(snapshot.system_stats.memory_total_gb > 0.0);
    }

    #[tokio::test]
    async fn test_scheduler_failure_leaves_rest_intact() {
        let runner = ScriptedRunner::new()
            .on("squeue", Err("Unable to contact slurm controller"))
            .on("nvidia-smi", Ok(MOCK_NVIDIA_SMI_ROWS));
        let snapshot = Aggregator::new(Arc::new(runner)).collect_all().await;

        assert!(snapshot.slurm_jobs.is_empty());
        assert_eq!(snapshot.gpu_stats.len(), 2);
        assert!(snapshot.system_stats.memory_total_gb > 0.0);
    }

    #[tokio::test]
    async fn test_every_tool_missing_still_yields_snapshot() {
        // An empty script behaves like a host with neither tool installed.
        let snapshot = Aggregator::new(Arc::new(ScriptedRunner::new()))
            .collect_all()
            .await;

        assert!(snapshot.slurm_jobs.is_empty());
        assert!(snapshot.gpu_stats.is_empty());
        assert!(!snapshot.system_stats.cpu_usage_percent.is_nan());
        assert!(snapshot.system_stats.memory_total_gb > 0.0);
    }

    #[tokio::test]
    async fn test_snapshot_serializes_empty_lists_as_arrays() {
        let snapshot = Aggregator::new(Arc::new(ScriptedRunner::new()))
            .collect_all()
            .await;
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(value["slurm_jobs"], serde_json::json!([]));
        assert_eq!(value["gpu_stats"], serde_json::json!([]));
        assert!(value["system_stats"]["cpu_usage_percent"].is_number());
    }
}
