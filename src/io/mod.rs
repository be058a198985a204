//! I/O module for reading label volumes and writing contact results

pub mod json;
pub mod report;
pub mod vtu;

pub use json::{read_json_volume, write_json_volume};
pub use report::{ContactReport, PairEntry, PairReport};
pub use vtu::{write_contact_points_to_vtu, write_contacts_to_vtu};
