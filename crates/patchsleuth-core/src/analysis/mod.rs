/// Analysis modules — classification and post-scan statistics.

pub mod file_types;
pub mod statistics;

pub use file_types::{categorise_extension, FileType};
pub use statistics::{generate_statistics, Statistics};
