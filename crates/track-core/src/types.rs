//! Typed records for the metrics snapshot
//!
//! Every poll produces fresh values; no record carries identity across
//! polls. The JSON field names of these structs are the wire format of the
//! read API, so renaming a field here is a breaking API change.

use serde::Serialize;

/// GPU core temperature above which a device counts as hot (Celsius).
pub const HOT_TEMPERATURE_C: f64 = 80.0;

/// GPU utilization above which a device counts as hot (percent).
pub const HOT_UTILIZATION_PCT: f64 = 90.0;

const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// One scheduled or running job, as reported by the scheduler queue.
///
/// All fields are kept in the scheduler's own textual conventions:
/// `memory` stays in raw scheduler units ("500M"), `start_time` may be a
/// sentinel such as "N/A" for jobs that have not started, and `nodelist`
/// may hold a parenthesized pending reason like "(Resources)" instead of a
/// node name. `state` is an open set; the scheduler may emit values beyond
/// RUNNING and PENDING.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    /// Scheduler-assigned job id, unique within one snapshot
    pub id: String,

    /// Job name
    pub name: String,

    /// Submitting user
    pub user: String,

    /// Scheduler job state (opaque string, not a closed enum)
    pub state: String,

    /// Allocated node count
    pub nodes: u32,

    /// Allocated CPU count
    pub cpus: u32,

    /// Requested memory in raw scheduler units
    pub memory: String,

    /// Submission timestamp, scheduler-formatted
    pub submit_time: String,

    /// Start timestamp, scheduler-formatted ("N/A" when unstarted)
    pub start_time: String,

    /// Remaining walltime in scheduler format
    pub walltime: String,

    /// Node list, or a parenthesized pending reason
    pub nodelist: String,
}

/// One accelerator device, as reported by the GPU query tool.
///
/// Memory values share one unit (MB); utilization values are percentages
/// in 0-100. `is_hot` is derived once at construction and cannot be set
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpuRecord {
    /// Device-unique UUID
    pub uuid: String,

    /// Device model name
    pub gpu_name: String,

    /// Core temperature in Celsius
    pub temperature: f64,

    /// Total device memory in MB
    pub memory_total: f64,

    /// Used device memory in MB
    pub memory_used: f64,

    /// Free device memory in MB
    pub memory_free: f64,

    /// GPU utilization percentage (0-100)
    pub gpu_utilization: f64,

    /// Memory utilization percentage (0-100)
    pub memory_utilization: f64,

    is_hot: bool,
}

impl GpuRecord {
    /// Build a record from the tool's reported values, in query order.
    ///
    /// Derives `is_hot`: a device is hot when its temperature exceeds
    /// [`HOT_TEMPERATURE_C`] or its GPU utilization exceeds
    /// [`HOT_UTILIZATION_PCT`]. Values exactly at a threshold are not hot.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        uuid: String,
        gpu_name: String,
        temperature: f64,
        memory_total: f64,
        memory_used: f64,
        memory_free: f64,
        gpu_utilization: f64,
        memory_utilization: f64,
    ) -> Self {
        let is_hot = temperature > HOT_TEMPERATURE_C || gpu_utilization > HOT_UTILIZATION_PCT;
        Self {
            uuid,
            gpu_name,
            temperature,
            memory_total,
            memory_used,
            memory_free,
            gpu_utilization,
            memory_utilization,
            is_hot,
        }
    }

    /// Whether this device was running hot when sampled
    pub fn is_hot(&self) -> bool {
        self.is_hot
    }
}

/// Host-wide CPU and memory summary.
///
/// Invariant: no field ever holds NaN. The downstream serialization format
/// cannot represent NaN, so the constructor substitutes 0.0 for any
/// not-a-number input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStats {
    /// CPU utilization percentage (0-100, 1 decimal place)
    pub cpu_usage_percent: f64,

    /// Memory utilization percentage (0-100, 1 decimal place)
    pub memory_usage_percent: f64,

    /// Total physical memory in GB (2 decimal places)
    pub memory_total_gb: f64,

    /// Used physical memory in GB (2 decimal places)
    pub memory_used_gb: f64,
}

impl SystemStats {
    /// Build a summary from raw percentage and GB values.
    ///
    /// Normalizes NaN inputs to 0.0 and applies the display rounding:
    /// percentages to 1 decimal place, GB values to 2.
    pub fn new(
        cpu_usage_percent: f64,
        memory_usage_percent: f64,
        memory_total_gb: f64,
        memory_used_gb: f64,
    ) -> Self {
        Self {
            cpu_usage_percent: round_to(sanitize(cpu_usage_percent), 1),
            memory_usage_percent: round_to(sanitize(memory_usage_percent), 1),
            memory_total_gb: round_to(sanitize(memory_total_gb), 2),
            memory_used_gb: round_to(sanitize(memory_used_gb), 2),
        }
    }

    /// Build a summary from raw byte counts and a CPU sample.
    pub fn from_bytes(cpu_usage_percent: f64, memory_total: u64, memory_used: u64) -> Self {
        let percent = if memory_total > 0 {
            memory_used as f64 / memory_total as f64 * 100.0
        } else {
            0.0
        };
        Self::new(
            cpu_usage_percent,
            percent,
            memory_total as f64 / BYTES_PER_GB,
            memory_used as f64 / BYTES_PER_GB,
        )
    }
}

/// One complete, immutable point-in-time aggregation of all monitored
/// metrics.
///
/// `slurm_jobs` and `gpu_stats` keep their tools' native ordering and are
/// empty (never null, never omitted) when the corresponding source is
/// unavailable. `system_stats` is always populated.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Scheduler queue, in the scheduler's own order
    pub slurm_jobs: Vec<JobRecord>,

    /// Accelerator devices, in the tool's device order
    pub gpu_stats: Vec<GpuRecord>,

    /// Host-wide resource summary
    pub system_stats: SystemStats,
}

fn sanitize(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
