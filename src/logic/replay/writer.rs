use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::EngineResult;

pub struct SnapshotWriter<W: Write> {
    out: W,
    written: u64,
}

impl SnapshotWriter<BufWriter<File>> {
    /// Append to `path`, creating parent directories and the file as needed
    pub fn append_to(path: &Path) -> EngineResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl SnapshotWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Write one value as a single line
    pub fn append<T: Serialize>(&mut self, value: &T) -> EngineResult<()> {
        let json = serde_json::to_string(value)?;
        writeln!(self.out, "{}", json)?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> EngineResult<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::logic::session::{DashboardSnapshot, ExperimentSession};
    use crate::logic::signals::SignalRecord;
    use tempfile::tempdir;

    fn snapshot() -> DashboardSnapshot {
        let mut session = ExperimentSession::new("writer-test", &EngineConfig::default());
        session.push(SignalRecord {
            epoch: 1,
            accuracy: 0.9,
            activation_entropy: 1.4,
            ..Default::default()
        });
        session.snapshot(None).unwrap()
    }

    #[test]
    fn test_one_line_per_snapshot() {
        let mut writer = SnapshotWriter::new(Vec::new());
        writer.append(&snapshot()).unwrap();
        writer.append(&snapshot()).unwrap();
        assert_eq!(writer.written(), 2);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: DashboardSnapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.experiment_id, "writer-test");
        assert_eq!(parsed.epoch, 1);
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshots.jsonl");

        for _ in 0..2 {
            let mut writer = SnapshotWriter::append_to(&path).unwrap();
            writer.append(&snapshot()).unwrap();
            writer.flush().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
