//! IRI interning.
//!
//! Uses `lasso::ThreadedRodeo` so that synthesized classes can be interned
//! concurrently while worker threads resolve existing IRIs.

use lasso::ThreadedRodeo;

use super::identifiers::ObjectId;
use crate::constants::OBO_PREFIX;

/// Thread-safe IRI interner. Trims surrounding whitespace and angle brackets
/// so `<http://x>` and `http://x` intern to the same key.
pub struct IriInterner {
    inner: ThreadedRodeo,
}

impl IriInterner {
    /// Create a new IRI interner.
    pub fn new() -> Self {
        Self {
            inner: ThreadedRodeo::default(),
        }
    }

    /// Intern an IRI, normalizing it first.
    pub fn intern(&self, iri: &str) -> ObjectId {
        ObjectId(self.inner.get_or_intern(Self::normalize(iri)))
    }

    /// Look up a previously interned IRI without inserting.
    pub fn get(&self, iri: &str) -> Option<ObjectId> {
        self.inner.get(Self::normalize(iri)).map(ObjectId)
    }

    /// Resolve an `ObjectId` back to its IRI.
    pub fn resolve(&self, id: ObjectId) -> &str {
        self.inner.resolve(&id.0)
    }

    /// Resolve without panicking on keys from another interner.
    pub fn try_resolve(&self, id: ObjectId) -> Option<&str> {
        self.inner.try_resolve(&id.0)
    }

    /// Number of interned IRIs.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn normalize(iri: &str) -> &str {
        iri.trim().trim_start_matches('<').trim_end_matches('>')
    }
}

impl Default for IriInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive an OBO-style short identifier from an IRI.
///
/// `http://purl.obolibrary.org/obo/GO_0005634` becomes `GO:0005634`.
/// IRIs outside the OBO namespace are returned unchanged.
pub fn identifier_from_iri(iri: &str) -> String {
    match iri.strip_prefix(OBO_PREFIX) {
        Some(local) => match local.split_once('_') {
            Some((prefix, rest)) => format!("{prefix}:{rest}"),
            None => local.to_string(),
        },
        None => iri.to_string(),
    }
}

/// Inverse of [`identifier_from_iri`] for CURIE-shaped identifiers.
/// Anything containing `://` is treated as an IRI already.
pub fn iri_from_identifier(id: &str) -> String {
    if id.contains("://") {
        return id.to_string();
    }
    match id.split_once(':') {
        Some((prefix, local)) => format!("{OBO_PREFIX}{prefix}_{local}"),
        None => id.to_string(),
    }
}
