//! # Content Transformer Module
//!
//! This module composes the new content of a file from its original content
//! and the header to insert, following the category's
//! [`InjectionStrategy`].

use crate::templates::InjectionStrategy;

/// Interpreter directive marker.
pub const SHEBANG: &str = "#!";

/// Builds stamped file content.
pub struct ContentTransformer;

impl ContentTransformer {
  /// Returns `header` combined with `content` according to `strategy`.
  ///
  /// With [`InjectionStrategy::ShebangAware`] and content starting with `#!`,
  /// the original shebang line stays first, the header follows without its own
  /// first line, and then the rest of the original content. In every other
  /// case the header is simply placed in front of the content.
  pub fn compose(strategy: InjectionStrategy, header: &str, content: &str) -> String {
    match strategy {
      InjectionStrategy::ShebangAware if content.starts_with(SHEBANG) => {
        let (shebang, rest) = Self::split_shebang(content);
        let header_body = header.split_once('\n').map_or("", |(_, body)| body);

        let mut result = String::with_capacity(shebang.len() + 1 + header_body.len() + rest.len());
        result.push_str(shebang);
        if !shebang.ends_with('\n') {
          result.push('\n');
        }
        result.push_str(header_body);
        result.push_str(rest);
        result
      }
      _ => {
        let mut result = String::with_capacity(header.len() + content.len());
        result.push_str(header);
        result.push_str(content);
        result
      }
    }
  }

  /// Splits content into its first line (newline included when present) and
  /// the remainder.
  fn split_shebang(content: &str) -> (&str, &str) {
    match content.find('\n') {
      Some(idx) => content.split_at(idx + 1),
      None => (content, ""),
    }
  }
}
