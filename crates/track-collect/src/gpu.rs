//! Accelerator telemetry collection
//!
//! Queries `nvidia-smi` for per-device metrics and normalizes its rows
//! into [`GpuRecord`]s.

use crate::command::CommandRunner;
use crate::table::{self, Header, Row};
use crate::Result;
use std::sync::Arc;
use track_core::GpuRecord;
use tracing::{debug, warn};

/// The eight metrics requested per device, in query order.
///
/// This single array is the source for BOTH the `--query-gpu` argument and
/// the header supplied to the parser. The tool is invoked with
/// `csv,noheader,nounits` and never prints its own header, so if the query
/// list and the header list could diverge, columns would silently
/// mislabel. Deriving both from one array makes that divergence
/// impossible.
const QUERY_FIELDS: [&str; 8] = [
    "uuid",
    "name",
    "temperature.gpu",
    "memory.total",
    "memory.used",
    "memory.free",
    "utilization.gpu",
    "utilization.memory",
];

/// Collector for accelerator device telemetry
pub struct GpuCollector {
    runner: Arc<dyn CommandRunner>,
}

impl GpuCollector {
    /// Create a new accelerator collector
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Produce the current device list.
    ///
    /// Degrades to an empty list on any failure, including the tool being
    /// absent entirely (a host with no GPUs or no driver installed).
    pub async fn collect(&self) -> Vec<GpuRecord> {
        match self.try_collect().await {
            Ok(gpus) => {
                debug!("Collected {} GPU devices", gpus.len());
                gpus
            }
            Err(e) => {
                warn!("GPU telemetry collection failed, returning no devices: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_collect(&self) -> Result<Vec<GpuRecord>> {
        let command = format!(
            "nvidia-smi --query-gpu={} --format=csv,noheader,nounits",
            QUERY_FIELDS.join(",")
        );
        let output = self.runner.run(&command).await?;

        let rows = table::parse(&output, Header::Supplied(&QUERY_FIELDS))?;
        rows.iter().map(gpu_from_row).collect()
    }
}

/// Fixed renaming from query field names to [`GpuRecord`] fields.
///
/// The constructor derives `is_hot` from the tool's verbatim Celsius and
/// percent values.
fn gpu_from_row(row: &Row) -> Result<GpuRecord> {
    Ok(GpuRecord::new(
        row.text("uuid")?.to_string(),
        row.text("name")?.to_string(),
        row.number("temperature.gpu")?,
        row.number("memory.total")?,
        row.number("memory.used")?,
        row.number("memory.free")?,
        row.number("utilization.gpu")?,
        row.number("utilization.memory")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{StaticRunner, MOCK_NVIDIA_SMI_ROWS};

    fn collector(response: std::result::Result<&'static str, &'static str>) -> GpuCollector {
        GpuCollector::new(Arc::new(StaticRunner(response)))
    }

    #[tokio::test]
    async fn test_collects_mock_devices() {
        let gpus = collector(Ok(MOCK_NVIDIA_SMI_ROWS)).collect().await;
        assert_eq!(gpus.len(), 2);

        let first = &gpus[0];
        assert_eq!(first.uuid, "GPU-d49e29a8-3f5f-4a6d-9be2-4a4a5b6c7d8e");
        assert_eq!(first.gpu_name, "NVIDIA GeForce RTX 3090");
        assert_eq!(first.temperature, 55.0);
        assert_eq!(first.memory_total, 24576.0);
        assert_eq!(first.memory_used, 10240.0);
        assert_eq!(first.memory_free, 14336.0);
        assert_eq!(first.gpu_utilization, 80.0);
        assert_eq!(first.memory_utilization, 42.0);
    }

    #[tokio::test]
    async fn test_derives_is_hot_per_device() {
        let gpus = collector(Ok(MOCK_NVIDIA_SMI_ROWS)).collect().await;
        // 55 C at 80% stays cool; 65 C at 95% crosses the utilization bar.
        assert!(!gpus[0].is_hot());
        assert!(gpus[1].is_hot());
    }

    #[tokio::test]
    async fn test_absent_tool_degrades_to_empty() {
        let gpus = collector(Err("sh: nvidia-smi: command not found"))
            .collect()
            .await;
        assert!(gpus.is_empty());
    }

    #[tokio::test]
    async fn test_empty_output_yields_empty_list() {
        let gpus = collector(Ok("")).collect().await;
        assert!(gpus.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_output_degrades_to_empty() {
        let gpus = collector(Ok("GPU-x, RTX 3090, 55\n")).collect().await;
        assert!(gpus.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_temperature_degrades_to_empty() {
        let gpus = collector(Ok(
            "GPU-x, RTX 3090, [N/A], 24576, 10240, 14336, 80, 42\n",
        ))
        .collect()
        .await;
        assert!(gpus.is_empty());
    }

    #[test]
    fn test_query_and_header_share_one_definition() {
        let command = format!(
            "nvidia-smi --query-gpu={} --format=csv,noheader,nounits",
            QUERY_FIELDS.join(",")
        );
        assert!(command.contains(
            "uuid,name,temperature.gpu,memory.total,memory.used,memory.free,\
             utilization.gpu,utilization.memory"
        ));
    }
}
