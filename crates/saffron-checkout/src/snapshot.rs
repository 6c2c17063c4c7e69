//! # Quotation Snapshot Export
//!
//! Filing a quotation produces a downloadable artifact: a text file named
//! `<documentId>.txt` holding the pretty-printed JSON of the created
//! document. The actual file-save is a platform concern, so the controller
//! only hands the rendered artifact to an attachable capability; headless
//! embedders and tests leave the no-op writer in place.

/// Receives the rendered snapshot artifact.
pub trait SnapshotWriter: Send + Sync {
    fn save(&self, file_name: &str, contents: &str);
}

/// Discards snapshots. The default writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotWriter;

impl SnapshotWriter for NoopSnapshotWriter {
    fn save(&self, _file_name: &str, _contents: &str) {}
}

/// `<documentId>.txt`
pub fn snapshot_file_name(document_id: &str) -> String {
    format!("{}.txt", document_id)
}

/// Pretty-prints the document body for the artifact.
pub fn render_snapshot(document: &serde_json::Value) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
}
