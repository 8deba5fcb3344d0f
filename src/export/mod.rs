//! CSV export for admin submissions.
//!
//! Every field is stripped of `<` and `>` before writing, every cell is
//! quoted and embedded quotes are doubled (RFC 4180).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::wizard::{SinkError, SubmissionSink};

const EXPORT_EXTENSION: &str = "csv";
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A payload that flattens into one header row and one value row.
pub trait CsvRecord {
    /// `(header, value)` pairs in output order.
    fn csv_columns(&self) -> Vec<(String, String)>;

    /// Optional label mixed into the export file name.
    fn csv_label(&self) -> Option<String> {
        None
    }
}

pub fn sanitize(value: &str) -> String {
    value.chars().filter(|ch| !matches!(ch, '<' | '>')).collect()
}

pub fn to_csv_string<R: CsvRecord + ?Sized>(record: &R) -> Result<String, SinkError> {
    let columns = record.csv_columns();
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(columns.iter().map(|(header, _)| sanitize(header)))?;
    writer.write_record(columns.iter().map(|(_, value)| sanitize(value)))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| SinkError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| SinkError::Rejected(err.to_string()))
}

/// Lowercase ASCII slug for file names; `None` when nothing usable remains.
fn slug(raw: &str) -> Option<String> {
    let mut slug = String::new();
    let mut last_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !slug.is_empty() && !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let trimmed = slug.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn export_path(dir: &Path, label: Option<&str>) -> PathBuf {
    let mut stem = format!("college_{}", Local::now().format(EXPORT_TIMESTAMP_FORMAT));
    if let Some(label) = label.and_then(slug) {
        stem.push('_');
        stem.push_str(&label);
    }
    let mut path = dir.join(format!("{}.{}", stem, EXPORT_EXTENSION));
    let mut counter = 2;
    while path.exists() {
        path = dir.join(format!("{}_{}.{}", stem, counter, EXPORT_EXTENSION));
        counter += 1;
    }
    path
}

/// Writes each submission to a fresh timestamped file under `dir`.
#[derive(Debug, Clone)]
pub struct CsvExportSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn last_export(&self) -> Option<&Path> {
        self.written.last().map(PathBuf::as_path)
    }
}

impl<T: CsvRecord> SubmissionSink<T> for CsvExportSink {
    fn submit(&mut self, payload: &T) -> Result<(), SinkError> {
        let contents = to_csv_string(payload)?;
        fs::create_dir_all(&self.dir)?;
        let path = export_path(&self.dir, payload.csv_label().as_deref());
        fs::write(&path, contents)?;
        tracing::info!(path = %path.display(), "csv export written");
        self.written.push(path);
        Ok(())
    }

    fn receipt(&self) -> Option<String> {
        self.last_export()
            .map(|path| format!("Exported to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pairs(Vec<(&'static str, &'static str)>);

    impl CsvRecord for Pairs {
        fn csv_columns(&self) -> Vec<(String, String)> {
            self.0
                .iter()
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect()
        }

        fn csv_label(&self) -> Option<String> {
            self.0.first().map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn every_cell_is_quoted_and_quotes_doubled() {
        let record = Pairs(vec![
            ("college_name", "Test College"),
            ("description", r#"He said "hi""#),
        ]);
        let csv = to_csv_string(&record).unwrap();
        assert_eq!(
            csv,
            "\"college_name\",\"description\"\r\n\"Test College\",\"He said \"\"hi\"\"\"\r\n"
        );
    }

    #[test]
    fn angle_brackets_are_stripped() {
        assert_eq!(sanitize("<b>Top</b> college"), "bTop/b college");
        let record = Pairs(vec![("name", "<script>x</script>")]);
        assert!(!to_csv_string(&record).unwrap().contains('<'));
    }

    #[test]
    fn slug_keeps_ascii_words() {
        assert_eq!(slug("  Test College, Pune ").as_deref(), Some("test-college-pune"));
        assert_eq!(slug("!!!"), None);
    }

    #[test]
    fn sink_writes_a_new_file_per_submission() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvExportSink::new(dir.path().join("exports"));
        let record = Pairs(vec![("college_name", "Test College")]);

        sink.submit(&record).unwrap();
        let first = sink.last_export().unwrap().to_path_buf();
        sink.submit(&record).unwrap();
        let second = sink.last_export().unwrap().to_path_buf();

        assert_ne!(first, second);
        assert!(first
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with("_test-college.csv")));
        let text = fs::read_to_string(second).unwrap();
        assert!(text.starts_with("\"college_name\"\r\n"));
    }

    #[test]
    fn receipt_names_the_latest_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvExportSink::new(dir.path().to_path_buf());
        let record = Pairs(vec![("college_name", "Test College")]);
        assert_eq!(SubmissionSink::<Pairs>::receipt(&sink), None);

        sink.submit(&record).unwrap();
        let receipt = SubmissionSink::<Pairs>::receipt(&sink).unwrap();
        let path = sink.last_export().unwrap();
        assert_eq!(receipt, format!("Exported to {}", path.display()));
    }
}
