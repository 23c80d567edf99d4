use crate::errors::GraphError;
use crate::model::{Edge, LogicalDefinition, ObjectKind};
use crate::types::{FxHashSet, ObjectId};

/// Read access to an ontology viewed as a graph of typed edges.
///
/// Implementations are shared across worker threads and must tolerate
/// concurrent reads while an [`OntologyWriter`] adds synthesized classes.
pub trait OntologyGraph: Send + Sync {
    /// IRI of an object, `None` for ids from another store.
    fn iri(&self, id: ObjectId) -> Option<String>;

    /// Look up an object by IRI.
    fn object_by_iri(&self, iri: &str) -> Option<ObjectId>;

    fn kind(&self, id: ObjectId) -> Option<ObjectKind>;

    /// Human-readable label (`rdfs:label`).
    fn label(&self, id: ObjectId) -> Option<String>;

    /// Short identifier, e.g. `GO:0005634`.
    fn identifier(&self, id: ObjectId) -> Option<String>;

    /// Resolve a short identifier to a class.
    fn class_by_identifier(&self, identifier: &str) -> Option<ObjectId>;

    /// Asserted outgoing edges.
    fn outgoing_edges(&self, id: ObjectId) -> Vec<Edge>;

    /// All edges entailed by composing outgoing paths (see [`crate::model::Predicate::compose`]).
    fn outgoing_edges_closure(&self, id: ObjectId) -> Vec<Edge>;

    /// Named targets of the edge closure, optionally including `id` itself.
    fn ancestors(&self, id: ObjectId, reflexive: bool) -> FxHashSet<ObjectId>;

    /// All named classes, including synthesized ones.
    fn classes(&self) -> Vec<ObjectId>;

    /// All named individuals.
    fn individuals(&self) -> Vec<ObjectId>;

    /// Equivalence axiom for a defined or synthesized class.
    fn logical_definition(&self, id: ObjectId) -> Option<LogicalDefinition>;

    fn is_transitive(&self, property: ObjectId) -> bool;

    /// Members of a named subset (e.g. an exclusion list declared in the ontology).
    fn subset(&self, _name: &str) -> FxHashSet<ObjectId> {
        FxHashSet::default()
    }

    /// Reflexive subsumption test over the edge closure.
    fn is_subsumed_by(&self, sub: ObjectId, sup: ObjectId) -> bool {
        sub == sup || self.ancestors(sub, false).contains(&sup)
    }
}

/// Additive-only mutation used to declare synthesized intersection classes.
pub trait OntologyWriter: Send + Sync {
    /// Declare `iri` as a named class equivalent to the intersection of
    /// `operands`. Declaring an existing IRI returns the existing id unchanged.
    fn declare_intersection_class(
        &self,
        iri: &str,
        label: &str,
        operands: &[ObjectId],
    ) -> Result<ObjectId, GraphError>;
}
