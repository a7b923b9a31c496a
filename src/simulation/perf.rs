//! Optional per-step timing/activity snapshot. Disabled by default and adds
//! no overhead when off, mirroring the teacher's `enable_perf_metrics` gate
//! (`simulation/perf/perf_stats.rs`, `perf_timer.rs`).

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerfStats {
    pub dirty_collected: u32,
    pub swaps_performed: u32,
    pub grouping_swaps: u32,
    pub step_micros: u64,
}

/// Minimal wall-clock stopwatch. On wasm32 there's no `std::time::Instant`
/// support in all toolchains, so callers that need timing there should feed
/// timestamps in from `js_sys::Date::now()`; natively we use `Instant`.
#[cfg(not(target_arch = "wasm32"))]
pub struct PerfTimer(std::time::Instant);

#[cfg(not(target_arch = "wasm32"))]
impl PerfTimer {
    pub fn start() -> Self {
        PerfTimer(std::time::Instant::now())
    }

    pub fn elapsed_micros(&self) -> u64 {
        self.0.elapsed().as_micros() as u64
    }
}

#[cfg(target_arch = "wasm32")]
pub struct PerfTimer(f64);

#[cfg(target_arch = "wasm32")]
impl PerfTimer {
    pub fn start() -> Self {
        PerfTimer(js_sys::Date::now())
    }

    pub fn elapsed_micros(&self) -> u64 {
        ((js_sys::Date::now() - self.0) * 1000.0).max(0.0) as u64
    }
}
