//! Rendering of assembled documents for inspection.
//!
//! Binary office formats are produced elsewhere; this module only offers the
//! JSON form of the model and a plain-text preview.

mod json;
mod options;
mod stats;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::TextOptions;
pub use stats::DocumentStats;
pub use text::to_text;
