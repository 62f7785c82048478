//! Latency log parsing
//!
//! Logs are plain text, one record per line: `elapsed_time,latency[,write_type]`.
//! Records keep file order; `sequence_id` counts retained records only.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Operation class carried by the optional `write_type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationClass {
    Read,
    Write,
}

impl OperationClass {
    /// `0` marks a read, anything else a write
    pub fn from_write_type(write_type: i64) -> Self {
        if write_type == 0 {
            OperationClass::Read
        } else {
            OperationClass::Write
        }
    }
}

/// A single parsed log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRecord {
    /// Dense 0-based index in arrival order
    pub sequence_id: usize,
    /// Elapsed time at which the operation was issued
    pub timestamp: i64,
    /// Operation duration
    pub latency: i64,
    /// Present only when the log carries a `write_type` column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_class: Option<OperationClass>,
}

/// Which records a load keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFilter {
    /// Keep every record; the third column is optional
    #[default]
    All,
    /// Single-stream logs: require the third column, keep `write_type == 0`
    ReadsOnly,
}

/// All records of one log file, indexed by `sequence_id`
#[derive(Debug, Clone)]
pub struct LatencyLog {
    path: PathBuf,
    records: Vec<LatencyRecord>,
    time_ordered: bool,
}

impl LatencyLog {
    /// Build a log from already-parsed `(timestamp, latency)` pairs
    ///
    /// Sequence ids are assigned in slice order. Mostly useful for tests and
    /// benchmarks that synthesize traces.
    pub fn from_pairs(path: impl Into<PathBuf>, pairs: &[(i64, i64)]) -> Self {
        let mut log = Self::empty(path.into());
        for &(timestamp, latency) in pairs {
            log.push(timestamp, latency, None);
        }
        log
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            records: Vec::new(),
            time_ordered: true,
        }
    }

    fn push(&mut self, timestamp: i64, latency: i64, operation_class: Option<OperationClass>) {
        if let Some(last) = self.records.last() {
            if timestamp < last.timestamp {
                self.time_ordered = false;
            }
        }
        self.records.push(LatencyRecord {
            sequence_id: self.records.len(),
            timestamp,
            latency,
            operation_class,
        });
    }

    /// Source file of this log
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by `sequence_id`
    pub fn get(&self, sequence_id: usize) -> Option<&LatencyRecord> {
        self.records.get(sequence_id)
    }

    /// Records in `sequence_id` order
    pub fn records(&self) -> &[LatencyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LatencyRecord> {
        self.records.iter()
    }

    /// True when timestamps never decrease along `sequence_id`
    pub fn is_time_ordered(&self) -> bool {
        self.time_ordered
    }

    /// Largest latency in the log, if any
    pub fn max_latency(&self) -> Option<i64> {
        self.records.iter().map(|r| r.latency).max()
    }
}

impl<'a> IntoIterator for &'a LatencyLog {
    type Item = &'a LatencyRecord;
    type IntoIter = std::slice::Iter<'a, LatencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Fields of one line before filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: i64,
    pub latency: i64,
    pub write_type: Option<i64>,
}

/// Parse one non-blank log line
///
/// Returns the reason string on failure; `load` wraps it with file and line.
pub fn parse_line(text: &str, filter: RecordFilter) -> std::result::Result<ParsedLine, String> {
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();

    let expected_ok = match filter {
        RecordFilter::All => fields.len() == 2 || fields.len() == 3,
        RecordFilter::ReadsOnly => fields.len() == 3,
    };
    if !expected_ok {
        let expected = match filter {
            RecordFilter::All => "2 or 3",
            RecordFilter::ReadsOnly => "3",
        };
        return Err(format!(
            "expected {} fields, found {}",
            expected,
            fields.len()
        ));
    }

    let field = |idx: usize, name: &str| -> std::result::Result<i64, String> {
        fields[idx]
            .parse::<i64>()
            .map_err(|e| format!("field {} ({}) is not an integer: {}", idx, name, e))
    };

    Ok(ParsedLine {
        timestamp: field(0, "elapsed_time")?,
        latency: field(1, "latency")?,
        write_type: if fields.len() == 3 {
            Some(field(2, "write_type")?)
        } else {
            None
        },
    })
}

/// Load a latency log from `path`
///
/// The file is read in one pass and closed before this returns. The first
/// malformed line aborts the whole load.
pub fn load<P: AsRef<Path>>(path: P, filter: RecordFilter) -> Result<LatencyLog> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);

    let mut log = LatencyLog::empty(path.to_path_buf());
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AnalysisError::NotReadable {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = parse_line(&line, filter).map_err(|reason| AnalysisError::MalformedLine {
            path: path.to_path_buf(),
            line: idx + 1,
            content: line.clone(),
            reason,
        })?;

        let class = parsed.write_type.map(OperationClass::from_write_type);
        if filter == RecordFilter::ReadsOnly && class != Some(OperationClass::Read) {
            skipped += 1;
            continue;
        }

        log.push(parsed.timestamp, parsed.latency, class);
    }

    tracing::debug!(
        path = %path.display(),
        records = log.len(),
        skipped,
        time_ordered = log.is_time_ordered(),
        "loaded latency log"
    );

    Ok(log)
}

/// Check that an input path names a readable regular file
///
/// Runs before any parsing so that a bad second path fails the run without
/// touching the first.
pub fn check_input<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalysisError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(AnalysisError::NotReadable {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

fn open_error(path: &Path, source: std::io::Error) -> AnalysisError {
    if source.kind() == std::io::ErrorKind::NotFound {
        AnalysisError::FileNotFound(path.to_path_buf())
    } else {
        AnalysisError::NotReadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_log(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_parse_line_two_fields() {
        let parsed = parse_line("100,250", RecordFilter::All).unwrap();
        assert_eq!(parsed.timestamp, 100);
        assert_eq!(parsed.latency, 250);
        assert_eq!(parsed.write_type, None);
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let parsed = parse_line(" 7 , 8 , 0 ", RecordFilter::All).unwrap();
        assert_eq!(parsed.timestamp, 7);
        assert_eq!(parsed.latency, 8);
        assert_eq!(parsed.write_type, Some(0));
    }

    #[test]
    fn test_parse_line_rejects_wrong_field_count() {
        assert!(parse_line("1", RecordFilter::All).is_err());
        assert!(parse_line("1,2,3,4", RecordFilter::All).is_err());
        assert!(parse_line("1,2", RecordFilter::ReadsOnly).is_err());
    }

    #[test]
    fn test_parse_line_rejects_non_integer() {
        let err = parse_line("1,2.5", RecordFilter::All).unwrap_err();
        assert!(err.contains("field 1"));
        assert!(parse_line("x,2", RecordFilter::All).is_err());
    }

    #[test]
    fn test_load_assigns_dense_sequence_ids() {
        let file = write_log("0,10\n100,20\n200,30\n300,40\n");
        let log = load(file.path(), RecordFilter::All).unwrap();

        assert_eq!(log.len(), 4);
        for (idx, record) in log.iter().enumerate() {
            assert_eq!(record.sequence_id, idx);
        }
        assert_eq!(log.get(2).unwrap().timestamp, 200);
        assert!(log.is_time_ordered());
        assert_eq!(log.max_latency(), Some(40));
    }

    #[test]
    fn test_load_reads_only_skips_writes_without_gaps() {
        let file = write_log("0,10,0\n5,99,1\n10,20,0\n15,98,2\n20,30,0\n");
        let log = load(file.path(), RecordFilter::ReadsOnly).unwrap();

        assert_eq!(log.len(), 3);
        let latencies: Vec<i64> = log.iter().map(|r| r.latency).collect();
        assert_eq!(latencies, vec![10, 20, 30]);
        let ids: Vec<usize> = log.iter().map(|r| r.sequence_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(log
            .iter()
            .all(|r| r.operation_class == Some(OperationClass::Read)));
    }

    #[test]
    fn test_load_all_keeps_write_type_as_class() {
        let file = write_log("0,10,0\n5,99,1\n");
        let log = load(file.path(), RecordFilter::All).unwrap();
        assert_eq!(log.get(0).unwrap().operation_class, Some(OperationClass::Read));
        assert_eq!(log.get(1).unwrap().operation_class, Some(OperationClass::Write));
    }

    #[test]
    fn test_load_aborts_on_first_malformed_line() {
        let file = write_log("0,10\n1,oops\n2,30\n");
        let err = load(file.path(), RecordFilter::All).unwrap_err();
        match err {
            AnalysisError::MalformedLine { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "1,oops");
            }
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let file = write_log("0,10\n\n   \n1,20\n");
        let log = load(file.path(), RecordFilter::All).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(1).unwrap().sequence_id, 1);
    }

    #[test]
    fn test_load_handles_crlf() {
        let file = write_log("0,10\r\n1,20\r\n");
        let log = load(file.path(), RecordFilter::All).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(1).unwrap().latency, 20);
    }

    #[test]
    fn test_load_detects_unordered_timestamps() {
        let file = write_log("0,10\n50,20\n40,30\n");
        let log = load(file.path(), RecordFilter::All).unwrap();
        assert!(!log.is_time_ordered());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("/nonexistent/flushscope/read.log", RecordFilter::All).unwrap_err();
        assert!(matches!(err, AnalysisError::FileNotFound(_)));
    }

    #[test]
    fn test_check_input_rejects_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = check_input(dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::NotReadable { .. }));
    }

    #[test]
    fn test_from_pairs_matches_load() {
        let file = write_log("0,10\n100,20\n");
        let loaded = load(file.path(), RecordFilter::All).unwrap();
        let built = LatencyLog::from_pairs(file.path(), &[(0, 10), (100, 20)]);
        assert_eq!(loaded.records(), built.records());
    }
}
