pub mod execution;
pub mod reporter;
pub mod summary;
pub use execution::ProbeExecution;
pub use reporter::StabilityReport;
pub use summary::{summarize, RankedEndpoint, Summary};
