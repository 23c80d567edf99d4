//! Fixture ontologies and loaders shared by the owlsim test suites.

use std::path::PathBuf;
use std::sync::Arc;

use owlsim_graph::{OntologyDocument, OntologyStore};
use serde::de::DeserializeOwned;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load `ontologies/<name>.json` into a store.
///
/// # Panics
/// Panics if the document is missing or invalid.
pub fn load_ontology(name: &str) -> Arc<OntologyStore> {
    let doc: OntologyDocument = load_fixture(&format!("ontologies/{name}.json"));
    let store = OntologyStore::from_document(&doc)
        .unwrap_or_else(|e| panic!("Failed to build ontology {name}: {e}"));
    Arc::new(store)
}

/// OBO IRI for a CURIE, e.g. `HP:0001250`.
pub fn obo(curie: &str) -> String {
    owlsim_core::types::iri_from_identifier(curie)
}

/// Fixture names under `ontologies/`.
pub const ABC: &str = "abc";
pub const PHENOTYPES: &str = "phenotypes";
pub const TAXA: &str = "taxa";
pub const GO_SLIM: &str = "go_slim";
