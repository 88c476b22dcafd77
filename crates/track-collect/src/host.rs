//! Host-wide resource collection
//!
//! Reads CPU and memory counters from the OS directly; no external
//! process is involved. Unlike the scheduler and GPU collectors this one
//! has no failure path: OS counters are assumed always available, and any
//! not-a-number sample is normalized instead of propagated.

use std::time::Duration;
use sysinfo::System;
use track_core::SystemStats;
use tracing::debug;

/// Target width of the instantaneous CPU sampling window.
///
/// Widened to `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` when the platform
/// needs more time between refreshes to observe a tick.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_millis(100);

/// Collector for host CPU and memory statistics
#[derive(Debug, Clone, Default)]
pub struct HostCollector;

impl HostCollector {
    /// Create a new host resource collector
    pub fn new() -> Self {
        Self
    }

    /// Produce the current host summary.
    ///
    /// CPU sampling policy: measure usage over a short window. A reading
    /// of exactly zero is ambiguous (truly idle, or the window was too
    /// short to observe any tick), so in that case one more non-blocking
    /// refresh is taken, which reports usage accumulated since the
    /// previous read, and that value is used instead.
    pub async fn collect(&self) -> SystemStats {
        let mut sys = System::new();

        sys.refresh_cpu_usage();
        tokio::time::sleep(CPU_SAMPLE_WINDOW.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        sys.refresh_cpu_usage();
        let mut cpu_usage = sys.global_cpu_usage() as f64;

        if cpu_usage == 0.0 {
            sys.refresh_cpu_usage();
            cpu_usage = sys.global_cpu_usage() as f64;
            debug!("Instantaneous CPU sample was zero, using cumulative re-read");
        }

        sys.refresh_memory();
        let stats = SystemStats::from_bytes(cpu_usage, sys.total_memory(), sys.used_memory());
        debug!(
            "Host stats: cpu {}%, memory {}%",
            stats.cpu_usage_percent, stats.memory_usage_percent
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_is_infallible_and_sane() {
        let stats = HostCollector::new().collect().await;

        assert!(!stats.cpu_usage_percent.is_nan());
        assert!(!stats.memory_usage_percent.is_nan());
        assert!(stats.cpu_usage_percent >= 0.0);
        assert!(stats.memory_usage_percent >= 0.0);
        assert!(stats.memory_usage_percent <= 100.0);
        assert!(stats.memory_total_gb > 0.0);
        assert!(stats.memory_used_gb >= 0.0);
        assert!(stats.memory_used_gb <= stats.memory_total_gb);
    }

    #[tokio::test]
    async fn test_collect_applies_display_rounding() {
        let stats = HostCollector::new().collect().await;

        let tenths = stats.cpu_usage_percent * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);

        let hundredths = stats.memory_total_gb * 100.0;
        assert!((hundredths - hundredths.round()).abs() < 1e-9);
    }
}
