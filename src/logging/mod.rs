//! # Logging Module
//!
//! Two channels carry diagnostics in headerstamp:
//!
//! - The `verbose_log!` and `info_log!` macros, for short human-readable
//!   notes gated by the global output mode (`-v` / `-q`).
//! - A `tracing` subscriber installed by [`init_tracing`], for debug and trace
//!   events from the walk and the injector (`-vv`, `-vvv`, or `RUST_LOG`).
//!
//! Both write diagnostics to stderr. `info_log!` is the exception: it prints
//! to stdout, next to the per-file lines and the summary.
//!
//! ## Example
//!
//! ```rust
//! use headerstamp::logging::{ColorMode, set_verbose};
//! use headerstamp::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Loading config from: {}", ".headerstamp.toml");
//! info_log!("Generated JSON report at {}", "report.json");
//! ```

mod modes;

pub use modes::{ColorMode, default_level, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// `eprintln!` that only fires with `-v` or more.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Prints a highlighted note to stdout unless `-q` was given.
///
/// Used for results the user asked for explicitly, such as a written report.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

#[doc(hidden)]
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
