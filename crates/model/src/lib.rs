pub mod admin;
pub mod log;
pub mod period;
pub mod summary;

/// Binary gigabyte, the unit every report is rendered in.
pub const BYTES_IN_GB: u64 = 1 << 30;
