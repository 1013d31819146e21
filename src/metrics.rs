//! Prometheus-compatible metrics endpoint

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Server start time
    start_time: Instant,
    /// Total requests processed
    request_count: RwLock<u64>,
    /// Requests by endpoint
    requests_by_endpoint: RwLock<HashMap<String, u64>>,
    /// Proxy rejections by reason
    rejections_by_reason: RwLock<HashMap<String, u64>>,
    /// Upstream fetch failures
    upstream_errors: RwLock<u64>,
    /// Probe runs ending in a failed state
    probe_failures: RwLock<u64>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            request_count: RwLock::new(0),
            requests_by_endpoint: RwLock::new(HashMap::new()),
            rejections_by_reason: RwLock::new(HashMap::new()),
            upstream_errors: RwLock::new(0),
            probe_failures: RwLock::new(0),
        }
    }

    /// Record a request
    pub fn record_request(&self, endpoint: &str) {
        *self.request_count.write() += 1;
        *self
            .requests_by_endpoint
            .write()
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    /// Record a rejected proxy or probe request
    pub fn record_rejection(&self, reason: &str) {
        *self
            .rejections_by_reason
            .write()
            .entry(reason.to_string())
            .or_insert(0) += 1;
    }

    /// Record an upstream fetch failure
    pub fn record_upstream_error(&self) {
        *self.upstream_errors.write() += 1;
    }

    /// Record a probe that exhausted its retry budget
    pub fn record_probe_failure(&self) {
        *self.probe_failures.write() += 1;
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        output.push_str("# HELP livetv_uptime_seconds Server uptime in seconds\n");
        output.push_str("# TYPE livetv_uptime_seconds counter\n");
        output.push_str(&format!("livetv_uptime_seconds {}\n", self.uptime_secs()));

        output.push_str("\n# HELP livetv_start_time_seconds Server start time as Unix timestamp\n");
        output.push_str("# TYPE livetv_start_time_seconds gauge\n");
        output.push_str(&format!(
            "livetv_start_time_seconds {}\n",
            std::time::SystemTime::UNIX_EPOCH
                .elapsed()
                .unwrap_or(Duration::ZERO)
                .as_secs()
                - self.uptime_secs()
        ));

        output.push_str("\n# HELP livetv_requests_total Total number of HTTP requests\n");
        output.push_str("# TYPE livetv_requests_total counter\n");
        output.push_str(&format!(
            "livetv_requests_total {}\n",
            *self.request_count.read()
        ));

        output.push_str("\n# HELP livetv_requests_by_endpoint Requests by endpoint\n");
        output.push_str("# TYPE livetv_requests_by_endpoint counter\n");
        for (endpoint, count) in self.requests_by_endpoint.read().iter() {
            output.push_str(&format!(
                "livetv_requests_by_endpoint{{endpoint=\"{}\"}} {}\n",
                endpoint, count
            ));
        }

        output.push_str("\n# HELP livetv_rejections_total Rejected requests by reason\n");
        output.push_str("# TYPE livetv_rejections_total counter\n");
        for (reason, count) in self.rejections_by_reason.read().iter() {
            output.push_str(&format!(
                "livetv_rejections_total{{reason=\"{}\"}} {}\n",
                reason, count
            ));
        }

        output.push_str("\n# HELP livetv_upstream_errors_total Upstream fetch failures\n");
        output.push_str("# TYPE livetv_upstream_errors_total counter\n");
        output.push_str(&format!(
            "livetv_upstream_errors_total {}\n",
            *self.upstream_errors.read()
        ));

        output.push_str("\n# HELP livetv_probe_failures_total Probes that exhausted retries\n");
        output.push_str("# TYPE livetv_probe_failures_total counter\n");
        output.push_str(&format!(
            "livetv_probe_failures_total {}\n",
            *self.probe_failures.read()
        ));

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_request() {
        let metrics = Metrics::new();
        metrics.record_request("live");
        metrics.record_request("live");
        metrics.record_request("live_proxy");

        let export = metrics.export_prometheus();
        assert!(export.contains("livetv_requests_total 3"));
        assert!(export.contains("livetv_requests_by_endpoint{endpoint=\"live\"} 2"));
        assert!(export.contains("livetv_requests_by_endpoint{endpoint=\"live_proxy\"} 1"));
    }

    #[test]
    fn test_record_rejection() {
        let metrics = Metrics::new();
        metrics.record_rejection("domain_not_allowed");
        metrics.record_rejection("domain_not_allowed");
        metrics.record_rejection("missing_url");

        let export = metrics.export_prometheus();
        assert!(export.contains("livetv_rejections_total{reason=\"domain_not_allowed\"} 2"));
        assert!(export.contains("livetv_rejections_total{reason=\"missing_url\"} 1"));
    }

    #[test]
    fn test_record_upstream_error() {
        let metrics = Metrics::new();
        metrics.record_upstream_error();
        assert!(metrics
            .export_prometheus()
            .contains("livetv_upstream_errors_total 1"));
    }

    #[test]
    fn test_empty_export_has_headers() {
        let metrics = Metrics::new();
        let export = metrics.export_prometheus();
        assert!(export.contains("# TYPE livetv_requests_total counter"));
        assert!(export.contains("livetv_requests_total 0"));
    }
}
