//! CLI command implementations

pub mod catalog;
pub mod generate;
pub mod generate_all;
pub mod inspect;

mod render;
mod reporting;

pub use render::ClipReport;
