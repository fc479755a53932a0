//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: echoed source lines with keyword highlighting and the failing line marked
//! - [`symbols`]: every slot of the symbol table
//! - [`status`]: status bar with the parse outcome and keybindings
//!
//! Each pane module exports a primary `render_*` function. Scroll offsets are
//! owned by the app and clamped by the pane while rendering.

pub mod source;
pub mod status;
pub mod symbols;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceRenderData};
pub use status::render_status_bar;
pub use symbols::render_symbols_pane;
