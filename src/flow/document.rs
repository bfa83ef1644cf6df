use super::model::Flow;
use crate::error::DocumentError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;

/// Snapshot codecs for flow documents.
///
/// The persistence collaborator owns the wire format; these are the two
/// codecs the reference store and the CLI use, and either round-trips the
/// full graph (nodes, connections, logic blocks, status) exactly.
impl Flow {
    /// Serializes the flow as pretty-printed JSON, the builder-facing
    /// interchange format.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Encode(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|e| DocumentError::Decode(e.to_string()))
    }

    /// Serializes the flow as a compact bincode snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        encode_to_vec(self, standard()).map_err(|e| DocumentError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        decode_from_slice(bytes, standard())
            // bincode 2 returns a tuple (data, bytes_read)
            .map(|(flow, _)| flow)
            .map_err(|e| DocumentError::Decode(e.to_string()))
    }

    /// Writes a bincode snapshot to `path`.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|e| DocumentError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads a bincode snapshot from `path`.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|e| DocumentError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }
}
