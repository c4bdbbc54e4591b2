//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod summary;
pub mod trial;
pub mod work_unit;

pub use summary::*;
pub use trial::*;
pub use work_unit::*;
