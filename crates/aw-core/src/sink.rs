use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;

use crate::event::MatchEvent;

/// Trait for match output destinations.
pub trait MatchSink: Send + Sync {
    fn send(&self, event: &MatchEvent) -> Result<()>;
}

/// Appends match events as JSON Lines to a file.
pub struct FileMatchSink {
    writer: Mutex<BufWriter<File>>,
}

impl FileMatchSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(FileMatchSink {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl MatchSink for FileMatchSink {
    fn send(&self, event: &MatchEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        let mut w = self.writer.lock().expect("match sink lock poisoned");
        writeln!(w, "{json}")?;
        w.flush()?;
        Ok(())
    }
}

/// Prints match events as JSON Lines on stdout.
pub struct StdoutMatchSink;

impl MatchSink for StdoutMatchSink {
    fn send(&self, event: &MatchEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{json}")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_event() -> MatchEvent {
        MatchEvent {
            listing_id: "lst-001".to_string(),
            rule_name: "hd800-deal".to_string(),
            matched_at: "2024-01-01T00:00:00.000Z".to_string(),
            channels: vec!["discord".to_string()],
        }
    }

    fn scratch_file(dir_name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(dir_name);
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("matches.jsonl");
        let _ = std::fs::remove_file(&path);
        path
    }

    fn cleanup(path: &Path) {
        let _ = std::fs::remove_file(path);
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir(dir);
        }
    }

    #[test]
    fn event_serializes_all_fields() {
        let json = serde_json::to_string(&sample_event()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["listing_id"], "lst-001");
        assert_eq!(parsed["rule_name"], "hd800-deal");
        assert_eq!(parsed["matched_at"], "2024-01-01T00:00:00.000Z");
        assert_eq!(parsed["channels"][0], "discord");
    }

    #[test]
    fn file_sink_writes_jsonl() {
        let path = scratch_file("aw_test_match_sink");

        {
            let sink = FileMatchSink::open(&path).unwrap();
            sink.send(&sample_event()).unwrap();

            let mut second = sample_event();
            second.rule_name = "iem-watch".to_string();
            second.channels = vec!["email".to_string(), "discord".to_string()];
            sink.send(&second).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["rule_name"], "hd800-deal");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["rule_name"], "iem-watch");
        assert_eq!(second["channels"].as_array().unwrap().len(), 2);

        cleanup(&path);
    }

    #[test]
    fn file_sink_appends_across_reopens() {
        let path = scratch_file("aw_test_match_sink_append");

        {
            let sink = FileMatchSink::open(&path).unwrap();
            sink.send(&sample_event()).unwrap();
        }
        {
            let sink = FileMatchSink::open(&path).unwrap();
            sink.send(&sample_event()).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        cleanup(&path);
    }
}
