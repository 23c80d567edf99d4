//! petgraph::StableGraph store of ontology objects and typed edges.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use owlsim_core::errors::GraphError;
use owlsim_core::model::{Edge, LogicalDefinition, ObjectKind, Predicate};
use owlsim_core::traits::{OntologyGraph, OntologyWriter};
use owlsim_core::types::{identifier_from_iri, FxHashMap, FxHashSet, IriInterner, ObjectId};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use tracing::debug;

use crate::closure;

/// A node in the ontology graph.
#[derive(Debug, Clone)]
pub struct OntologyNode {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// False for objects only seen as the target of an axiom so far.
    pub declared: bool,
}

/// The underlying directed graph type. Edge weights are predicates.
pub type OntologyStableGraph = StableGraph<OntologyNode, Predicate, Directed>;

/// Everything behind the store lock.
#[derive(Default)]
pub struct StoreData {
    pub graph: OntologyStableGraph,
    /// Map from object → NodeIndex for O(1) lookup.
    pub node_index: FxHashMap<ObjectId, NodeIndex>,
    pub labels: FxHashMap<ObjectId, String>,
    pub definitions: FxHashMap<ObjectId, LogicalDefinition>,
    pub subsets: FxHashMap<String, FxHashSet<ObjectId>>,
    pub transitive: FxHashSet<ObjectId>,
    /// Short identifier (`GO:0005634`) → object.
    pub identifiers: FxHashMap<String, ObjectId>,
}

impl StoreData {
    /// Get or create the node for `id`.
    ///
    /// An undeclared placeholder takes the kind of its first explicit
    /// declaration; a declared node keeps its kind.
    pub fn ensure_node(
        &mut self,
        interner: &IriInterner,
        id: ObjectId,
        kind: ObjectKind,
        declare: bool,
    ) -> Result<NodeIndex, GraphError> {
        if let Some(&idx) = self.node_index.get(&id) {
            let node = &mut self.graph[idx];
            if declare {
                if node.declared && node.kind != kind {
                    return Err(GraphError::KindConflict {
                        iri: interner.resolve(id).to_string(),
                        existing: node.kind.name(),
                        requested: kind.name(),
                    });
                }
                node.kind = kind;
                node.declared = true;
            }
            return Ok(idx);
        }
        let idx = self.graph.add_node(OntologyNode {
            id,
            kind,
            declared: declare,
        });
        self.node_index.insert(id, idx);
        self.identifiers
            .insert(identifier_from_iri(interner.resolve(id)), id);
        Ok(idx)
    }

    /// Add an edge unless the identical edge already exists.
    pub fn add_edge(&mut self, source: NodeIndex, predicate: Predicate, target: NodeIndex) {
        let exists = self
            .graph
            .edges_directed(source, Direction::Outgoing)
            .any(|e| e.target() == target && *e.weight() == predicate);
        if !exists {
            self.graph.add_edge(source, target, predicate);
        }
    }

    pub fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        self.node_index.get(&id).map(|&idx| self.graph[idx].kind)
    }

    pub fn direct_edges(&self, id: ObjectId) -> Vec<Edge> {
        let Some(&idx) = self.node_index.get(&id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| Edge::direct(id, *e.weight(), self.graph[e.target()].id))
            .collect()
    }

    pub fn objects_of_kind(&self, pred: impl Fn(ObjectKind) -> bool) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self
            .graph
            .node_weights()
            .filter(|n| pred(n.kind))
            .map(|n| n.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Thread-safe ontology store.
///
/// Reads take a shared lock; synthesized classes are added under the
/// exclusive lock. Lock poisoning is recovered from on reads since every
/// mutation is additive.
pub struct OntologyStore {
    interner: IriInterner,
    data: RwLock<StoreData>,
}

impl OntologyStore {
    pub(crate) fn from_parts(interner: IriInterner, data: StoreData) -> Self {
        Self {
            interner,
            data: RwLock::new(data),
        }
    }

    /// An empty store.
    pub fn empty() -> Self {
        Self::from_parts(IriInterner::new(), StoreData::default())
    }

    pub fn interner(&self) -> &IriInterner {
        &self.interner
    }

    /// Shared read access to the underlying data.
    pub fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreData>, GraphError> {
        self.data.write().map_err(|_| GraphError::LockPoisoned)
    }

    /// Resolve an IRI or CURIE to an object, or fail with `UnknownObject`.
    pub fn require(&self, iri_or_curie: &str) -> Result<ObjectId, GraphError> {
        self.lookup(iri_or_curie)
            .ok_or_else(|| GraphError::UnknownObject {
                iri: iri_or_curie.to_string(),
            })
    }

    /// Resolve an IRI, then a short identifier.
    pub fn lookup(&self, iri_or_curie: &str) -> Option<ObjectId> {
        self.object_by_iri(iri_or_curie)
            .or_else(|| self.class_by_identifier(iri_or_curie))
    }

    /// Sorted IRIs of a set of ids, for deterministic output.
    pub fn sorted_iris(&self, ids: impl IntoIterator<Item = ObjectId>) -> Vec<String> {
        let mut iris: Vec<String> = ids
            .into_iter()
            .filter_map(|id| self.interner.try_resolve(id).map(str::to_string))
            .collect();
        iris.sort();
        iris
    }

    /// Told subsumption closure (subclass and instance-of steps only).
    pub fn isa_ancestors(&self, id: ObjectId) -> FxHashSet<ObjectId> {
        closure::isa_closure(&self.read(), id, Direction::Outgoing)
    }

    /// Inverse of [`Self::isa_ancestors`].
    pub fn isa_descendants(&self, id: ObjectId) -> FxHashSet<ObjectId> {
        closure::isa_closure(&self.read(), id, Direction::Incoming)
    }

    /// Direct told superclasses.
    pub fn direct_isa_parents(&self, id: ObjectId) -> Vec<ObjectId> {
        self.read()
            .direct_edges(id)
            .into_iter()
            .filter(|e| e.predicate.is_subsumption())
            .map(|e| e.target)
            .collect()
    }

    /// Direct told subclasses and instances.
    pub fn direct_isa_children(&self, id: ObjectId) -> Vec<ObjectId> {
        let data = self.read();
        let Some(&idx) = data.node_index.get(&id) else {
            return Vec::new();
        };
        data.graph
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| e.weight().is_subsumption())
            .map(|e| data.graph[e.source()].id)
            .collect()
    }

    pub fn defined_classes(&self) -> Vec<(ObjectId, LogicalDefinition)> {
        let data = self.read();
        let mut defs: Vec<_> = data
            .definitions
            .iter()
            .map(|(id, def)| (*id, def.clone()))
            .collect();
        defs.sort_by_key(|(id, _)| *id);
        defs
    }

    pub fn node_count(&self) -> usize {
        self.read().graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.read().graph.edge_count()
    }
}

impl OntologyGraph for OntologyStore {
    fn iri(&self, id: ObjectId) -> Option<String> {
        self.interner.try_resolve(id).map(str::to_string)
    }

    fn object_by_iri(&self, iri: &str) -> Option<ObjectId> {
        let id = self.interner.get(iri)?;
        self.read().node_index.contains_key(&id).then_some(id)
    }

    fn kind(&self, id: ObjectId) -> Option<ObjectKind> {
        self.read().kind(id)
    }

    fn label(&self, id: ObjectId) -> Option<String> {
        self.read().labels.get(&id).cloned()
    }

    fn identifier(&self, id: ObjectId) -> Option<String> {
        self.interner.try_resolve(id).map(identifier_from_iri)
    }

    fn class_by_identifier(&self, identifier: &str) -> Option<ObjectId> {
        let data = self.read();
        let id = *data.identifiers.get(identifier)?;
        data.kind(id)
            .filter(|k| k.is_class_like())
            .map(|_| id)
    }

    fn outgoing_edges(&self, id: ObjectId) -> Vec<Edge> {
        self.read().direct_edges(id)
    }

    fn outgoing_edges_closure(&self, id: ObjectId) -> Vec<Edge> {
        closure::edge_closure(&self.read(), id)
    }

    fn ancestors(&self, id: ObjectId, reflexive: bool) -> FxHashSet<ObjectId> {
        let data = self.read();
        let mut out: FxHashSet<ObjectId> = closure::edge_closure(&data, id)
            .into_iter()
            .map(|e| e.target)
            .collect();
        if reflexive && data.node_index.contains_key(&id) {
            out.insert(id);
        }
        out
    }

    fn classes(&self) -> Vec<ObjectId> {
        self.read().objects_of_kind(|k| k.is_class_like())
    }

    fn individuals(&self) -> Vec<ObjectId> {
        self.read()
            .objects_of_kind(|k| k == ObjectKind::Individual)
    }

    fn logical_definition(&self, id: ObjectId) -> Option<LogicalDefinition> {
        self.read().definitions.get(&id).cloned()
    }

    fn is_transitive(&self, property: ObjectId) -> bool {
        self.read().transitive.contains(&property)
    }

    fn subset(&self, name: &str) -> FxHashSet<ObjectId> {
        self.read().subsets.get(name).cloned().unwrap_or_default()
    }
}

impl OntologyWriter for OntologyStore {
    fn declare_intersection_class(
        &self,
        iri: &str,
        label: &str,
        operands: &[ObjectId],
    ) -> Result<ObjectId, GraphError> {
        let id = self.interner.intern(iri);
        let mut data = self.write()?;
        if data.definitions.contains_key(&id) {
            return Ok(id);
        }
        for op in operands {
            if !data.node_index.contains_key(op) {
                return Err(GraphError::UnknownObject {
                    iri: self.interner.try_resolve(*op).unwrap_or("<foreign>").to_string(),
                });
            }
        }
        let idx = data.ensure_node(&self.interner, id, ObjectKind::Intersection, true)?;
        for op in operands {
            let target = data.node_index[op];
            data.add_edge(idx, Predicate::SubClassOf, target);
        }
        data.labels.insert(id, label.to_string());
        data.definitions
            .insert(id, LogicalDefinition::intersection_of(operands));
        debug!(iri, operands = operands.len(), "declared intersection class");
        Ok(id)
    }
}
