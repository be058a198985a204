//! Label volume data structures

pub mod types;

pub use types::*;
