//! Load event sink boundary.
//!
//! Loaders emit [`LoadEvent`]s and do not know who consumes them.
//! [`TracingSink`] forwards to `tracing`; [`crate::obs::LoadReport`]
//! aggregates counts.
use serde::Serialize;
use std::fmt;

///
/// FileKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    PlanningUnit,
    Lock,
    Zone,
    Connection,
    Puvspr,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PlanningUnit => "pu",
            Self::Lock => "pulock",
            Self::Zone => "puzone",
            Self::Connection => "connection",
            Self::Puvspr => "puvspr",
        };
        write!(f, "{label}")
    }
}

///
/// DropReason
///
/// Why a row was left out of the model. Drops are never fatal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    UnknownPu,
    UnknownSpecies,
    DuplicateConnection,
    NonPositiveAmount,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::UnknownPu => "unknown planning unit id",
            Self::UnknownSpecies => "unknown species id",
            Self::DuplicateConnection => "duplicate connection",
            Self::NonPositiveAmount => "amount not above zero",
        };
        write!(f, "{label}")
    }
}

///
/// LoadEvent
///

#[derive(Clone, Copy, Debug)]
pub enum LoadEvent {
    RowAccepted {
        file: FileKind,
    },
    RowDropped {
        file: FileKind,
        line: usize,
        reason: DropReason,
    },
    FileLoaded {
        file: FileKind,
        rows: u64,
    },
}

///
/// LoadSink
///

pub trait LoadSink {
    fn record(&mut self, event: LoadEvent);
}

///
/// TracingSink
///
/// Forwards drops as warnings and file summaries as debug events.
/// Accepted rows are too frequent to log individually.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LoadSink for TracingSink {
    fn record(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::RowAccepted { .. } => {}
            LoadEvent::RowDropped { file, line, reason } => {
                tracing::warn!(%file, line, %reason, "dropping input row");
            }
            LoadEvent::FileLoaded { file, rows } => {
                tracing::debug!(%file, rows, "input file loaded");
            }
        }
    }
}
