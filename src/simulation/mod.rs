//! Engine facade, fixed-timestep scheduler, and optional perf instrumentation.

pub mod engine;
pub mod perf;
pub mod scheduler;

pub use engine::{Engine, PointerButton};
pub use perf::PerfStats;
