//! # Interrupt Module
//!
//! A shared flag that a Ctrl+C handler raises and the processor polls between
//! files. A file whose write has started always finishes before the run stops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tracing::info;

/// Cancellation flag shared between the signal handler and the processor.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
  raised: Arc<AtomicBool>,
}

impl InterruptFlag {
  /// Creates a flag that nothing raises except [`trigger`](Self::trigger).
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a flag raised by Ctrl+C.
  ///
  /// The handler is process-wide, so this should be called once.
  pub fn install() -> Result<Self> {
    let flag = Self::new();
    let handler_flag = flag.clone();
    ctrlc::set_handler(move || {
      info!("Received Ctrl+C, stopping after the current file...");
      handler_flag.trigger();
    })
    .context("Failed to install Ctrl+C handler")?;
    Ok(flag)
  }

  pub fn trigger(&self) {
    self.raised.store(true, Ordering::SeqCst);
  }

  pub fn is_raised(&self) -> bool {
    self.raised.load(Ordering::SeqCst)
  }
}
