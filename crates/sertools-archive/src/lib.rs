//! JSON bridge for values that only speak a legacy byte-archiving format.
//!
//! Some host types cannot be decomposed into a structural field tree; the
//! host can only flatten them to an opaque archive blob and reconstruct them
//! from one. [`ArchiveBridge`] drives such an adapter through the JSON
//! codec: the archive bytes travel as a single-value JSON container,
//! rendered under whatever blob strategy the options select.

use sertools_core::Blob;
use sertools_json::{
    from_json_bytes, from_json_str, to_json_bytes, to_json_string, JsonCodecError, JsonOptions,
    TextEncoding,
};
use thiserror::Error;

/// Host-supplied adapter around a legacy archiving facility.
///
/// `archive` is assumed to be total for the adapter's value type;
/// `unarchive` returns `None` when the bytes do not reconstruct a value.
pub trait LegacyArchiver {
    type Value;

    fn archive(&self, value: &Self::Value) -> Vec<u8>;
    fn unarchive(&self, bytes: &[u8]) -> Option<Self::Value>;
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive bytes came out of the JSON container intact but the
    /// adapter could not reconstruct a value from them.
    #[error("legacy archive bytes did not reconstruct a value")]
    UnarchiveFailure,
    #[error(transparent)]
    Json(#[from] JsonCodecError),
}

/// Runs a [`LegacyArchiver`] through the JSON codec.
pub struct ArchiveBridge<A> {
    archiver: A,
}

impl<A: LegacyArchiver> ArchiveBridge<A> {
    pub fn new(archiver: A) -> Self {
        Self { archiver }
    }

    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    pub fn into_inner(self) -> A {
        self.archiver
    }

    /// Archives `value` and encodes the bytes as a single-value JSON
    /// container.
    pub fn encode(
        &self,
        value: &A::Value,
        options: &JsonOptions,
    ) -> Result<Vec<u8>, ArchiveError> {
        let blob = Blob(self.archiver.archive(value));
        Ok(to_json_bytes(&blob, options)?)
    }

    /// Like [`encode`](Self::encode), returning text under `encoding`.
    pub fn encode_string(
        &self,
        value: &A::Value,
        options: &JsonOptions,
        encoding: TextEncoding,
    ) -> Result<String, ArchiveError> {
        let blob = Blob(self.archiver.archive(value));
        Ok(to_json_string(&blob, options, encoding)?)
    }

    /// Reads the archive bytes back out of the JSON container and
    /// reconstructs the value through the adapter.
    pub fn decode(&self, json: &[u8], options: &JsonOptions) -> Result<A::Value, ArchiveError> {
        let Blob(bytes) = from_json_bytes(json, options)?;
        self.unarchive(&bytes)
    }

    /// Like [`decode`](Self::decode), reading text under `encoding`.
    pub fn decode_str(
        &self,
        json: &str,
        options: &JsonOptions,
        encoding: TextEncoding,
    ) -> Result<A::Value, ArchiveError> {
        let Blob(bytes) = from_json_str(json, options, encoding)?;
        self.unarchive(&bytes)
    }

    fn unarchive(&self, bytes: &[u8]) -> Result<A::Value, ArchiveError> {
        self.archiver
            .unarchive(bytes)
            .ok_or(ArchiveError::UnarchiveFailure)
    }
}
