//! The similarity session: one long-lived owner of every memoization cache.
//!
//! Closures, IC values, LCS sets, per-pair scores and the synthesized-class
//! registry all live here and are shared by reference with the scoring
//! algorithms, search and batch runners. Cache population is idempotent, so
//! the moka caches are filled without coordination; only synthesis of new
//! intersection classes is serialized.

use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use moka::sync::Cache;
use owlsim_core::config::SimConfig;
use owlsim_core::errors::{BatchResult, SimError};
use owlsim_core::model::{ObjectKind, Predicate};
use owlsim_core::tracing::fields;
use owlsim_core::traits::{OntologyGraph, OntologyWriter};
use owlsim_core::types::{iri_from_identifier, FxHashMap, FxHashSet, ObjectId, PairKey, SmallVec4};
use tracing::{debug, info, warn};

use crate::similarity::ScoreKey;

/// Everything the session needs from the ontology.
pub trait SimOntology: OntologyGraph + OntologyWriter {}

impl<T: OntologyGraph + OntologyWriter> SimOntology for T {}

/// The annotated population used for frequencies.
pub(crate) struct Corpus {
    /// Eligible entities (at least one attribute), sorted.
    pub entities: Vec<ObjectId>,
    /// Attribute → number of entities whose closure contains it.
    pub frequencies: FxHashMap<ObjectId, usize>,
}

pub struct SimSession {
    graph: Arc<dyn SimOntology>,
    config: SimConfig,
    comparison_property: Option<ObjectId>,
    closures: Cache<ObjectId, Arc<FxHashSet<ObjectId>>>,
    pub(crate) ic_cache: Cache<ObjectId, Option<f64>>,
    pub(crate) lcs_cache: Cache<PairKey, Arc<Vec<ObjectId>>>,
    pub(crate) score_cache: Cache<ScoreKey, f64>,
    /// Sorted operand set → synthesized class.
    pub(crate) registry: Mutex<FxHashMap<SmallVec4<ObjectId>, ObjectId>>,
    corpus: OnceLock<Corpus>,
}

impl SimSession {
    /// Create a session over `graph`. Fails when the configured comparison
    /// property is not declared in the ontology.
    pub fn new<G: SimOntology + 'static>(graph: Arc<G>, config: &SimConfig) -> Result<Self, SimError> {
        let graph: Arc<dyn SimOntology> = graph;
        let comparison_property = match config.comparison_property.as_deref() {
            Some(p) => {
                let id = graph
                    .object_by_iri(&iri_from_identifier(p))
                    .filter(|id| graph.kind(*id) == Some(ObjectKind::Property))
                    .ok_or_else(|| SimError::UnknownProperty { iri: p.to_string() })?;
                Some(id)
            }
            None => None,
        };
        let capacity = config.effective_cache_capacity();
        Ok(Self {
            graph,
            config: config.clone(),
            comparison_property,
            closures: Cache::new(capacity),
            ic_cache: Cache::new(capacity),
            lcs_cache: Cache::new(capacity),
            score_cache: Cache::new(capacity),
            registry: Mutex::new(FxHashMap::default()),
            corpus: OnceLock::new(),
        })
    }

    pub fn graph(&self) -> &dyn SimOntology {
        self.graph.as_ref()
    }

    /// Shared handle to the ontology, for results that outlive the session.
    pub fn graph_handle(&self) -> Arc<dyn SimOntology> {
        Arc::clone(&self.graph)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn comparison_property(&self) -> Option<ObjectId> {
        self.comparison_property
    }

    /// IRI of an object, or an empty string for foreign ids.
    pub fn iri(&self, id: ObjectId) -> String {
        self.graph.iri(id).unwrap_or_default()
    }

    pub fn label(&self, id: ObjectId) -> Option<String> {
        self.graph.label(id)
    }

    /// Short identifier, falling back to the IRI.
    pub fn identifier(&self, id: ObjectId) -> String {
        self.graph
            .identifier(id)
            .unwrap_or_else(|| self.iri(id))
    }

    pub(crate) fn unknown(&self, id: ObjectId) -> SimError {
        SimError::UnknownAttribute {
            iri: self.graph.iri(id).unwrap_or_else(|| format!("{id:?}")),
        }
    }

    /// Resolve an IRI or CURIE.
    pub fn resolve(&self, iri_or_curie: &str) -> Result<ObjectId, SimError> {
        self.graph
            .object_by_iri(&iri_from_identifier(iri_or_curie))
            .or_else(|| self.graph.class_by_identifier(iri_or_curie))
            .ok_or_else(|| SimError::UnknownAttribute {
                iri: iri_or_curie.to_string(),
            })
    }

    /// Resolve many IRIs, skipping unknown ones into the manifest.
    pub fn resolve_all(&self, iris: &[&str]) -> BatchResult<Vec<ObjectId>> {
        let mut result = BatchResult::new(Vec::with_capacity(iris.len()));
        for iri in iris {
            match self.resolve(iri) {
                Ok(id) => result.data.push(id),
                Err(e) => {
                    warn!(iri, "skipping unknown attribute");
                    result.add_error(e);
                }
            }
        }
        result
    }

    /// Direct attributes of an entity: fillers of the comparison property
    /// when one is configured, otherwise its class assertions.
    pub fn direct_attributes(&self, entity: ObjectId) -> Vec<ObjectId> {
        let mut attrs: Vec<ObjectId> = self
            .graph
            .outgoing_edges(entity)
            .into_iter()
            .filter(|e| match self.comparison_property {
                Some(p) => e.predicate == Predicate::Some(p),
                None => e.predicate == Predicate::InstanceOf,
            })
            .map(|e| e.target)
            .filter(|t| self.is_class_like(*t))
            .collect();
        attrs.sort_unstable();
        attrs.dedup();
        attrs
    }

    /// The attribute set compared by best-match algorithms: the direct
    /// attributes of an individual, or the class itself.
    pub fn attributes_of(&self, id: ObjectId) -> Result<Vec<ObjectId>, SimError> {
        match self.graph.kind(id) {
            Some(ObjectKind::Individual) => Ok(self.direct_attributes(id)),
            Some(k) if k.is_class_like() => Ok(vec![id]),
            _ => Err(self.unknown(id)),
        }
    }

    fn is_class_like(&self, id: ObjectId) -> bool {
        self.graph.kind(id).is_some_and(|k| k.is_class_like())
    }

    /// Reflexive subsumers. For an individual this is the union of the
    /// reflexive ancestors of its direct attributes; for a class, its
    /// reflexive ancestors over the edge closure.
    pub fn subsumers(&self, id: ObjectId) -> Result<Arc<FxHashSet<ObjectId>>, SimError> {
        if let Some(hit) = self.closures.get(&id) {
            return Ok(hit);
        }
        let set: FxHashSet<ObjectId> = match self.graph.kind(id) {
            Some(ObjectKind::Individual) => self
                .direct_attributes(id)
                .into_iter()
                .flat_map(|attr| self.graph.ancestors(attr, true))
                .filter(|x| self.is_class_like(*x))
                .collect(),
            Some(k) if k.is_class_like() => self
                .graph
                .ancestors(id, true)
                .into_iter()
                .filter(|x| self.is_class_like(*x))
                .collect(),
            _ => return Err(self.unknown(id)),
        };
        let set = Arc::new(set);
        self.closures.insert(id, Arc::clone(&set));
        Ok(set)
    }

    pub(crate) fn corpus(&self) -> &Corpus {
        self.corpus.get_or_init(|| {
            let start = Instant::now();
            let mut entities = Vec::new();
            let mut frequencies: FxHashMap<ObjectId, usize> = FxHashMap::default();
            for entity in self.graph.individuals() {
                if self.direct_attributes(entity).is_empty() {
                    continue;
                }
                match self.subsumers(entity) {
                    Ok(closure) => {
                        for attr in closure.iter() {
                            *frequencies.entry(*attr).or_insert(0) += 1;
                        }
                        entities.push(entity);
                    }
                    Err(e) => debug!(error = %e, "entity left out of corpus"),
                }
            }
            entities.sort_unstable();
            info!(
                corpus_size = entities.len(),
                attributes = frequencies.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "corpus indexed"
            );
            Corpus {
                entities,
                frequencies,
            }
        })
    }

    /// Annotated entities of the corpus, sorted.
    pub fn entities(&self) -> &[ObjectId] {
        &self.corpus().entities
    }

    /// Every direct attribute used by some corpus entity, sorted.
    pub fn annotation_attributes(&self) -> Vec<ObjectId> {
        let mut attrs: FxHashSet<ObjectId> = FxHashSet::default();
        for e in self.entities() {
            attrs.extend(self.direct_attributes(*e));
        }
        let mut attrs: Vec<ObjectId> = attrs.into_iter().collect();
        attrs.sort_unstable();
        attrs
    }

    /// Cache and corpus counters keyed by the standard field names.
    pub fn metrics(&self) -> Vec<(&'static str, u64)> {
        self.closures.run_pending_tasks();
        vec![
            (fields::CLOSURE_CACHE_ENTRIES, self.closures.entry_count()),
            (fields::SYNTHESIZED_CLASSES, self.synthesized_count() as u64),
            (fields::CORPUS_SIZE, self.corpus_size() as u64),
        ]
    }

    /// Drop every memoized value except synthesized classes, which are
    /// part of the ontology once declared.
    pub fn clear_caches(&self) {
        self.closures.invalidate_all();
        self.ic_cache.invalidate_all();
        self.lcs_cache.invalidate_all();
        self.score_cache.invalidate_all();
    }
}
