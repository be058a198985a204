//! Contact detection module

pub mod connectivity;
pub mod detection;
pub mod metrics;
pub mod pairwise;
pub mod partition;
pub mod types;

pub use connectivity::*;
pub use detection::*;
pub use metrics::*;
pub use pairwise::*;
pub use partition::{detect_partitioned, detect_region, Region};
pub use types::*;
