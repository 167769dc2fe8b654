//! Terminal UI module using ratatui.
//!
//! - `render`: frame rendering for each screen plus overlays
//! - `input`: keyboard event handling
//! - `styles`: theme-derived styles

pub mod input;
pub mod render;
pub mod styles;
