//! Terminal report viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: viewer state, keyboard event loop, pane focus
//! - **[`panes`]**: render functions for each visible pane (source, symbols,
//!   status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from a finished
//! [`ParseOutcome`] and call [`App::run`] to start the event loop.
//!
//! [`ParseOutcome`]: crate::parser::ParseOutcome
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
