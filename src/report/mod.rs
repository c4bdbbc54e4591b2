//! Performance section rendering and report document patching

pub mod document;
pub mod render;

pub use document::{patch_section, ReportDocument};
pub use render::render_section;
