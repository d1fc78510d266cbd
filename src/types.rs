//! Shared types describing the outcome of a conversion run.
//!
//! These are produced by [`crate::convert`] and consumed by [`crate::output`]
//! for the CLI summary; both serialize so a run can be dumped as JSON.

use crate::redirect::Redirect;
use serde::Serialize;

/// Something that happened during a run, in the order it happened.
///
/// Paths are relative to the source or destination root and `/`-separated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConvertEvent {
    DocumentConverted {
        source: String,
        destination: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        redirect: Option<Redirect>,
    },
    /// A sub-tree with no documents anywhere below it.
    DirectorySkipped { source: String },
    ManifestWritten {
        directory: String,
        entries: Vec<String>,
    },
}

/// Everything a conversion run returns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversion {
    pub redirects: Vec<Redirect>,
    pub events: Vec<ConvertEvent>,
}

impl Conversion {
    pub fn documents_converted(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ConvertEvent::DocumentConverted { .. }))
            .count()
    }

    pub fn manifests_written(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ConvertEvent::ManifestWritten { .. }))
            .count()
    }

    pub fn directories_skipped(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ConvertEvent::DirectorySkipped { .. }))
            .count()
    }
}
