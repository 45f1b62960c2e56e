use crate::obs::sink::{DropReason, FileKind, LoadEvent, LoadSink};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// FileReport
///
/// Row counts for one input file.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FileReport {
    pub rows: u64,
    pub accepted: u64,
    pub dropped: BTreeMap<DropReason, u64>,
}

impl FileReport {
    #[must_use]
    pub fn dropped_total(&self) -> u64 {
        self.dropped.values().sum()
    }

    #[must_use]
    pub fn dropped(&self, reason: DropReason) -> u64 {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }
}

///
/// LoadReport
///
/// Aggregated outcome of every load step applied to one model.
/// Files that were never loaded have no entry.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LoadReport {
    files: BTreeMap<FileKind, FileReport>,
}

impl LoadReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for one file kind; empty if that file was never loaded.
    #[must_use]
    pub fn file(&self, kind: FileKind) -> FileReport {
        self.files.get(&kind).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn was_loaded(&self, kind: FileKind) -> bool {
        self.files.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileKind, &FileReport)> {
        self.files.iter().map(|(k, v)| (*k, v))
    }
}

impl LoadSink for LoadReport {
    fn record(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::RowAccepted { file } => {
                let entry = self.files.entry(file).or_default();
                entry.accepted = entry.accepted.saturating_add(1);
            }
            LoadEvent::RowDropped { file, reason, .. } => {
                let entry = self.files.entry(file).or_default();
                let count = entry.dropped.entry(reason).or_default();
                *count = count.saturating_add(1);
            }
            LoadEvent::FileLoaded { file, rows } => {
                let entry = self.files.entry(file).or_default();
                entry.rows = entry.rows.saturating_add(rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_accepts_drops_and_rows() {
        let mut report = LoadReport::new();
        report.record(LoadEvent::RowAccepted {
            file: FileKind::Lock,
        });
        report.record(LoadEvent::RowDropped {
            file: FileKind::Lock,
            line: 4,
            reason: DropReason::UnknownPu,
        });
        report.record(LoadEvent::RowDropped {
            file: FileKind::Lock,
            line: 5,
            reason: DropReason::UnknownPu,
        });
        report.record(LoadEvent::FileLoaded {
            file: FileKind::Lock,
            rows: 3,
        });

        let lock = report.file(FileKind::Lock);
        assert_eq!(lock.rows, 3);
        assert_eq!(lock.accepted, 1);
        assert_eq!(lock.dropped(DropReason::UnknownPu), 2);
        assert_eq!(lock.dropped(DropReason::NonPositiveAmount), 0);
        assert_eq!(lock.dropped_total(), 2);
        assert!(report.was_loaded(FileKind::Lock));
    }

    #[test]
    fn unloaded_file_reports_empty() {
        let report = LoadReport::new();

        assert!(!report.was_loaded(FileKind::Zone));
        assert_eq!(report.file(FileKind::Zone), FileReport::default());
    }

    #[test]
    fn report_serializes_with_snake_case_keys() {
        let mut report = LoadReport::new();
        report.record(LoadEvent::RowDropped {
            file: FileKind::Puvspr,
            line: 9,
            reason: DropReason::UnknownSpecies,
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"]["puvspr"]["dropped"]["unknown_species"], 1);
    }
}
