//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw/` - Frame layout, per-tab views and popups
//! - `theme.rs` - Color themes, presets and the light/dark flag
//! - `layout.rs` - Board grid geometry and cursor movement
//! - `card.rs` - Memory card widget

mod draw;
pub mod card;
pub mod layout;
pub mod theme;

// Re-export main draw function
pub use draw::{draw, max_review_scroll};
