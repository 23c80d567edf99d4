//! JSON ontology documents.
//!
//! A lightweight serialization of the parts of an OWL ontology the engine
//! consumes: declarations, labels, told subclass and existential axioms,
//! class and property assertions, genus-differentia definitions, and subsets.

use std::path::Path;

use owlsim_core::errors::GraphError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::OntologyBuilder;
use crate::store::OntologyStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyDocument {
    pub properties: Vec<PropertyDecl>,
    pub classes: Vec<ClassDecl>,
    pub individuals: Vec<IndividualDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDecl {
    pub iri: String,
    pub label: String,
    pub transitive: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDecl {
    pub iri: String,
    pub label: String,
    pub parents: Vec<String>,
    pub relations: Vec<RelationDecl>,
    pub definition: Option<DefinitionDecl>,
    pub subsets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationDecl {
    pub property: String,
    pub filler: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionDecl {
    pub genus: Vec<String>,
    pub differentia: Vec<RelationDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndividualDecl {
    pub iri: String,
    pub label: String,
    pub types: Vec<String>,
    pub facts: Vec<FactDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactDecl {
    pub property: String,
    pub target: String,
}

impl OntologyDocument {
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::InvalidDocument {
            message: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::InvalidDocument {
            message: e.to_string(),
        })
    }

    fn check(&self) -> Result<(), GraphError> {
        let empty_iri = self
            .properties
            .iter()
            .map(|p| p.iri.as_str())
            .chain(self.classes.iter().map(|c| c.iri.as_str()))
            .chain(self.individuals.iter().map(|i| i.iri.as_str()))
            .any(|iri| iri.trim().is_empty());
        if empty_iri {
            return Err(GraphError::InvalidDocument {
                message: "declaration with an empty IRI".to_string(),
            });
        }
        Ok(())
    }
}

impl OntologyStore {
    /// Build a store from a parsed document.
    pub fn from_document(doc: &OntologyDocument) -> Result<Self, GraphError> {
        doc.check()?;
        let mut b = OntologyBuilder::new();

        for p in &doc.properties {
            b.property(&p.iri, &p.label, p.transitive);
        }
        for c in &doc.classes {
            b.class(&c.iri, &c.label);
        }
        for i in &doc.individuals {
            b.individual(&i.iri, &i.label);
        }

        for c in &doc.classes {
            for parent in &c.parents {
                b.subclass(&c.iri, parent);
            }
            for r in &c.relations {
                b.some(&c.iri, &r.property, &r.filler);
            }
            if let Some(def) = &c.definition {
                let genus: Vec<&str> = def.genus.iter().map(String::as_str).collect();
                let differentia: Vec<(&str, &str)> = def
                    .differentia
                    .iter()
                    .map(|r| (r.property.as_str(), r.filler.as_str()))
                    .collect();
                b.definition(&c.iri, &genus, &differentia);
            }
            for s in &c.subsets {
                b.subset(&c.iri, s);
            }
        }
        for i in &doc.individuals {
            for t in &i.types {
                b.instance_of(&i.iri, t);
            }
            for f in &i.facts {
                b.fact(&i.iri, &f.property, &f.target);
            }
        }

        let store = b.try_build()?;
        info!(
            nodes = store.node_count(),
            edges = store.edge_count(),
            "ontology loaded"
        );
        Ok(store)
    }

    /// Read and build a store from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, GraphError> {
        Self::from_document(&OntologyDocument::from_path(path)?)
    }
}
