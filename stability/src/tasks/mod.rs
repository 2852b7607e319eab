mod block_height;
mod error_handling;
mod rate_limit;

pub use block_height::*;
pub use error_handling::*;
pub use rate_limit::*;
