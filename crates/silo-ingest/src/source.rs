//! Line-oriented access to the feed log.

use std::path::Path;

use tokio::{
  fs::File,
  io::{AsyncBufRead, AsyncBufReadExt as _, BufReader, Lines},
};

/// A lazy, finite, non-restartable sequence of text lines over a
/// byte-stream resource.
///
/// Splits on both bare `\n` and paired `\r\n` terminators without
/// losing or duplicating lines.
pub struct LineSource<R> {
  lines: Lines<R>,
}

impl LineSource<BufReader<File>> {
  /// Open a log file for reading. Failure here means the pipeline
  /// never starts.
  pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
    let file = File::open(path).await?;
    Ok(Self::from_reader(BufReader::new(file)))
  }
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
  /// Wrap an arbitrary buffered reader. Used by tests to drive the
  /// pipeline from in-memory input.
  pub fn from_reader(reader: R) -> Self {
    Self {
      lines: reader.lines(),
    }
  }

  /// The next line, or `None` once the resource is exhausted.
  pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
    self.lines.next_line().await
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  async fn collect(input: &'static [u8]) -> Vec<String> {
    let mut source = LineSource::from_reader(input);
    let mut lines = Vec::new();
    while let Some(line) = source.next_line().await.unwrap() {
      lines.push(line);
    }
    lines
  }

  #[tokio::test]
  async fn splits_on_lf_and_crlf() {
    let lines = collect(b"one\ntwo\r\nthree\n").await;
    assert_eq!(lines, ["one", "two", "three"]);
  }

  #[tokio::test]
  async fn last_line_without_terminator_is_kept() {
    let lines = collect(b"one\ntwo").await;
    assert_eq!(lines, ["one", "two"]);
  }

  #[tokio::test]
  async fn empty_input_yields_nothing() {
    assert!(collect(b"").await.is_empty());
  }
}
