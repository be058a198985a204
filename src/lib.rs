//! Contact Points Library
//!
//! Detection of contact points, the voxel adjacencies between distinct labeled
//! regions, in 3D (or 2D) label volumes.

pub mod config;
pub mod contact;
pub mod error;
pub mod io;
pub mod volume;

pub use contact::{detect, detect_with_options, find_contact_points, ContactTable};
pub use error::{ContactPointsError, Result};
pub use volume::LabelVolume;
