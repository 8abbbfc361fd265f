use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global atomic value holding the current [`OutputMode`].
///
/// This is initialized to `Normal`; verbose and quiet output stay disabled
/// until explicitly enabled via [`set_verbose`] or [`set_quiet`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to every `if_supports_color` call in the process.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Sets the global verbose logging flag.
///
/// When verbose logging is enabled, the [`verbose_log!`](crate::verbose_log)
/// macro will output messages to stderr. When disabled, verbose log messages
/// are suppressed.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
///
/// # Returns
///
/// `true` if verbose logging is enabled, `false` otherwise.
pub fn is_verbose() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
///
/// # Returns
///
/// `true` if quiet mode is enabled, `false` otherwise.
pub fn is_quiet() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Quiet)
}

/// Maps `-v` occurrences (or quiet mode) to a tracing level directive.
pub fn default_level(verbosity: u8, quiet: bool) -> &'static str {
  if quiet {
    return "error";
  }
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Sets the output mode and installs the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
/// Diagnostics are written to stderr so stdout stays scriptable.
///
/// # Parameters
///
/// * `verbosity` - Number of `-v` flags given
/// * `quiet` - Whether `-q` was given
pub fn init_tracing(verbosity: u8, quiet: bool) {
  if quiet {
    set_quiet();
  } else if verbosity > 0 {
    set_verbose();
  }

  let level = default_level(verbosity, quiet);
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
