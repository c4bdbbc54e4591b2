//! Utility functions

pub mod machine;
pub mod time;

pub use machine::MachineProfile;
pub use time::{format_micros, parse_elapsed_micros};
