pub mod probe_result;

pub use probe_result::{BurstOutcome, ProbeResult};
