//! Observability: load events, sinks, and the per-file load report.
//!
//! Loaders never log directly. Every row outcome flows through
//! [`LoadEvent`] and a [`LoadSink`]; the tracing sink and the report sink
//! are the two consumers.

pub(crate) mod report;
pub(crate) mod sink;

// re-exports
pub use report::{FileReport, LoadReport};
pub use sink::{DropReason, FileKind, LoadEvent, LoadSink, TracingSink};
