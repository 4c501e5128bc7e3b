//! In-memory tracing capture for asserting on emitted log lines.
//!
//! Tests run on the current-thread tokio runtime, so a thread-scoped default
//! subscriber (`set_default`) sees everything the middleware emits.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

/// Captured log sink shared with the subscriber.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install a capturing subscriber as the thread default.
    ///
    /// Keep the returned guard alive for the duration of the scenario.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        // ANSI stays on: with it off the formatter escapes the color codes
        // embedded in messages into literal `\x1b` text, which [`strip_ansi`]
        // cannot remove.
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(true)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::level_filters::LevelFilter::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    /// Captured lines with embedded ANSI escapes stripped.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(strip_ansi).collect()
    }

    /// Captured lines at the given level (as rendered by the fmt subscriber).
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(level))
            .collect()
    }
}

/// Remove ANSI color escapes from a rendered line.
pub fn strip_ansi(line: &str) -> String {
    let re = regex::Regex::new(r"\u{1b}\[[0-9;]*m").unwrap();
    re.replace_all(line, "").into_owned()
}

pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(self.buf.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testimonia_core::style::{paint, BLUE, GRAY, WHITE};

    #[test]
    fn test_strip_ansi_removes_escape_sequences() {
        let painted = format!("{} {}", paint(BLUE, "GET"), paint(WHITE, "/x"));
        assert_eq!(strip_ansi(&painted), "GET /x");
    }

    #[test]
    fn test_captured_colored_message_strips_to_plain_text() {
        let (capture, _guard) = LogCapture::install();

        tracing::info!(
            "{} {} {}",
            paint(BLUE, "GET"),
            paint(WHITE, "/x"),
            paint(GRAY, "|")
        );

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("GET /x |"), "got: {}", lines[0]);
        assert!(!lines[0].contains('\u{1b}'));
        assert!(!lines[0].contains("\\x1b"));
    }
}
