//! Timing of the expensive bits, enabled with the `metrics` feature.

#[cfg(feature = "metrics")]
use std::time::Instant;

#[cfg(feature = "metrics")]
pub struct Metric {
    name: &'static str,
    tt: Instant,
}

#[cfg(not(feature = "metrics"))]
pub struct Metric;

/// Starts measuring; the elapsed time gets logged once the returned guard is
/// dropped.
#[cfg(feature = "metrics")]
pub fn metric(name: &'static str) -> Metric {
    Metric {
        name,
        tt: Instant::now(),
    }
}

#[cfg(not(feature = "metrics"))]
pub fn metric(_name: &'static str) -> Metric {
    Metric
}

#[cfg(feature = "metrics")]
impl Drop for Metric {
    fn drop(&mut self) {
        log::info!(
            "metric: {} = {}",
            self.name,
            humantime::format_duration(self.tt.elapsed())
        );
    }
}
