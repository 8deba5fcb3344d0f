use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Receives the assembled payload once the final step validates.
///
/// Failure handling belongs to the sink; the controller only records that the
/// hand-off failed so the user can retry.
pub trait SubmissionSink<T> {
    fn submit(&mut self, payload: &T) -> Result<(), SinkError>;

    /// Line for the user about the last successful hand-off, if the sink has one.
    fn receipt(&self) -> Option<String> {
        None
    }
}

/// Prints a confirmation notice followed by the payload as pretty JSON.
pub struct ConsoleSink<W: Write> {
    out: W,
    notice: &'static str,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(notice: &'static str) -> Self {
        Self::new(io::stdout(), notice)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, notice: &'static str) -> Self {
        Self { out, notice }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<T: Serialize, W: Write> SubmissionSink<T> for ConsoleSink<W> {
    fn submit(&mut self, payload: &T) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(payload)?;
        writeln!(self.out, "{}", self.notice)?;
        writeln!(self.out, "{}", json)?;
        self.out.flush()?;
        tracing::info!(notice = self.notice, "submission written to console");
        Ok(())
    }
}

/// Collects submitted payloads in memory.
#[derive(Debug, Default)]
pub struct MemorySink<T> {
    pub received: Vec<T>,
    pub fail_with: Option<String>,
}

impl<T> MemorySink<T> {
    pub fn new() -> Self {
        Self {
            received: Vec::new(),
            fail_with: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            received: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl<T: Clone> SubmissionSink<T> for MemorySink<T> {
    fn submit(&mut self, payload: &T) -> Result<(), SinkError> {
        if let Some(message) = &self.fail_with {
            return Err(SinkError::Rejected(message.clone()));
        }
        self.received.push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn console_sink_writes_notice_and_json() {
        let mut payload = BTreeMap::new();
        payload.insert("full_name", "Asha Rao");
        let mut sink = ConsoleSink::new(Vec::new(), "Profile saved successfully!");
        sink.submit(&payload).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("Profile saved successfully!\n"));
        assert!(text.contains("\"full_name\": \"Asha Rao\""));
    }

    #[test]
    fn failing_memory_sink_rejects() {
        let mut sink = MemorySink::<u8>::failing("offline");
        let err = sink.submit(&1).unwrap_err();
        assert_eq!(err.to_string(), "Submission rejected: offline");
        assert!(sink.received.is_empty());
    }
}
