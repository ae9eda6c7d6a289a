//! JSONL signal reader
//!
//! One `SignalRecord` per line. Blank lines are skipped; a malformed line
//! aborts the read with its 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::types::SignalRecord;
use crate::error::{EngineError, EngineResult};

/// Read every record from a buffered reader
pub fn read_signals<R: BufRead>(reader: R) -> EngineResult<Vec<SignalRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: SignalRecord = serde_json::from_str(trimmed)
            .map_err(|source| EngineError::Parse { line: idx + 1, source })?;
        records.push(record);
    }

    log::debug!("Read {} signal records", records.len());
    Ok(records)
}

/// Read every record from a JSONL file
pub fn read_signals_from_path(path: &Path) -> EngineResult<Vec<SignalRecord>> {
    let file = File::open(path)?;
    read_signals(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn line(epoch: u32) -> String {
        let record = SignalRecord {
            epoch,
            gradient_norm: 0.5,
            accuracy: 0.9,
            loss: 0.3,
            ..Default::default()
        };
        serde_json::to_string(&record).unwrap()
    }

    #[test]
    fn test_reads_lines_and_skips_blanks() {
        let input = format!("{}\n\n{}\n", line(1), line(2));
        let records = read_signals(Cursor::new(input)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].epoch, 2);
    }

    #[test]
    fn test_reports_bad_line_number() {
        let input = format!("{}\nnot json\n", line(1));
        let err = read_signals(Cursor::new(input)).unwrap_err();

        match err {
            EngineError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", line(7)).unwrap();

        let records = read_signals_from_path(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].epoch, 7);
    }
}
