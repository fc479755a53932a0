//! # Introduction
//!
//! spsc checks programs written in SPS, a small Pascal-like language, and
//! reports the first lexical, syntax or declaration error it finds. Nothing
//! is executed or compiled; a run either accepts the program or stops at the
//! first failure, and in both cases shows the symbol table it built.
//!
//! ## Pipeline
//!
//! ```text
//! Source lines → Scanner → Parser → Diagnostics (+ symbol table)
//! ```
//!
//! 1. [`scanner`]: reads one bounded line at a time, skips comments, and
//!    hands out classified tokens with any lexical error attached.
//! 2. [`parser`]: recursive descent over the SPS grammar, declaring and
//!    resolving variables in a [`table::HashTable`].
//! 3. [`report`]: the [`report::Diagnostics`] sink for echoed lines and
//!    failures, with console and in-memory implementations.
//! 4. [`ui`]: ratatui report viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use spsc::parser::Parser;
//!
//! let outcome = Parser::from_source("PROGRAM P VAR A : INTEGER BEGIN READ(A) END.").run();
//! assert!(outcome.is_success());
//! assert!(outcome.symbols.contains("A"));
//! ```

pub mod config;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod table;
pub mod ui;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber, once per process.
///
/// Does nothing unless `RUST_LOG` is set, so the report on stdout is never
/// interleaved with log output by default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
