//! Structural reasoner: told is_a hierarchy plus classification of
//! genus-differentia definitions.
//!
//! Not a DL reasoner. A class C is classified under a defined class D when
//! C is subsumed by every genus of D and C (or one of its superclasses) has
//! an existential edge `p some f'` with `f'` subsumed by `f` for every
//! differentia `p some f` of D. Classes with identical definitions, and
//! classes on a subsumption cycle, are equivalent.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use owlsim_core::errors::ReasonerError;
use owlsim_core::model::LogicalDefinition;
use owlsim_core::traits::{EquivalenceNode, OntologyGraph, Reasoner};
use owlsim_core::types::{FxHashMap, FxHashSet, ObjectId};
use tracing::{debug, info};

use crate::store::OntologyStore;

#[derive(Default)]
struct Inferred {
    parents: FxHashMap<ObjectId, FxHashSet<ObjectId>>,
    children: FxHashMap<ObjectId, FxHashSet<ObjectId>>,
}

impl Inferred {
    fn add(&mut self, sub: ObjectId, sup: ObjectId) -> bool {
        self.children.entry(sup).or_default().insert(sub);
        self.parents.entry(sub).or_default().insert(sup)
    }
}

pub struct StructuralReasoner {
    store: Arc<OntologyStore>,
    inferred: RwLock<Inferred>,
}

impl StructuralReasoner {
    pub fn new(store: Arc<OntologyStore>) -> Self {
        Self {
            store,
            inferred: RwLock::new(Inferred::default()),
        }
    }

    pub fn store(&self) -> &Arc<OntologyStore> {
        &self.store
    }

    /// Number of subsumptions added by classification.
    pub fn inferred_count(&self) -> usize {
        self.read_inferred().parents.values().map(|s| s.len()).sum()
    }

    fn read_inferred(&self) -> std::sync::RwLockReadGuard<'_, Inferred> {
        self.inferred.read().unwrap_or_else(|e| e.into_inner())
    }

    fn neighbours(&self, inferred: &Inferred, id: ObjectId, up: bool) -> Vec<ObjectId> {
        let (mut out, extra) = if up {
            (self.store.direct_isa_parents(id), inferred.parents.get(&id))
        } else {
            (self.store.direct_isa_children(id), inferred.children.get(&id))
        };
        if let Some(extra) = extra {
            out.extend(extra.iter().copied());
        }
        out
    }

    /// BFS over told and inferred is_a edges. Excludes `id` unless on a cycle.
    fn reach(&self, inferred: &Inferred, id: ObjectId, up: bool) -> FxHashSet<ObjectId> {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbours(inferred, current, up) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    fn equivalents_in(&self, inferred: &Inferred, id: ObjectId) -> FxHashSet<ObjectId> {
        let ups = self.reach(inferred, id, true);
        let mut eq: FxHashSet<ObjectId> = if ups.contains(&id) {
            let downs = self.reach(inferred, id, false);
            ups.intersection(&downs).copied().collect()
        } else {
            FxHashSet::default()
        };
        eq.insert(id);
        eq
    }

    fn subsumed(&self, inferred: &Inferred, sub: ObjectId, sup: ObjectId) -> bool {
        sub == sup || self.reach(inferred, sub, true).contains(&sup)
    }

    fn satisfies(&self, inferred: &Inferred, class: ObjectId, def: &LogicalDefinition) -> bool {
        if !def.genus.iter().all(|g| self.subsumed(inferred, class, *g)) {
            return false;
        }
        if def.differentia.is_empty() {
            return !def.genus.is_empty();
        }
        let mut carriers = self.reach(inferred, class, true);
        carriers.insert(class);
        def.differentia.iter().all(|r| {
            carriers.iter().any(|c| {
                self.store.outgoing_edges_closure(*c).iter().any(|e| {
                    e.predicate.property() == Some(r.property)
                        && self.subsumed(inferred, e.target, r.filler)
                })
            })
        })
    }

    /// Group a set of classes into equivalence nodes, ordered by representative.
    fn group(&self, inferred: &Inferred, ids: FxHashSet<ObjectId>) -> Vec<EquivalenceNode> {
        let mut sorted: Vec<ObjectId> = ids.iter().copied().collect();
        sorted.sort_unstable();
        let mut assigned = FxHashSet::default();
        let mut nodes = Vec::new();
        for id in sorted {
            if assigned.contains(&id) {
                continue;
            }
            let mut members: Vec<ObjectId> = self
                .equivalents_in(inferred, id)
                .into_iter()
                .filter(|m| ids.contains(m))
                .collect();
            members.sort_unstable();
            assigned.extend(members.iter().copied());
            nodes.push(EquivalenceNode {
                members: members.into_iter().collect(),
            });
        }
        nodes
    }

    fn related(&self, class: ObjectId, direct: bool, up: bool) -> Vec<EquivalenceNode> {
        let inferred = self.read_inferred();
        let eq = self.equivalents_in(&inferred, class);
        let mut all: FxHashSet<ObjectId> = self
            .reach(&inferred, class, up)
            .into_iter()
            .filter(|c| !eq.contains(c))
            .filter(|c| self.store.kind(*c).is_some_and(|k| k.is_class_like()))
            .collect();
        if direct {
            let snapshot = all.clone();
            all.retain(|candidate| {
                let candidate_eq = self.equivalents_in(&inferred, *candidate);
                !snapshot.iter().any(|other| {
                    !candidate_eq.contains(other)
                        && self.reach(&inferred, *other, up).contains(candidate)
                })
            });
        }
        self.group(&inferred, all)
    }
}

impl Reasoner for StructuralReasoner {
    fn precompute_inferences(&self) -> Result<(), ReasonerError> {
        let definitions = self.store.defined_classes();
        let classes = self.store.classes();
        let mut inferred = self
            .inferred
            .write()
            .map_err(|_| ReasonerError::ClassificationFailed {
                reason: "inference state lock poisoned".to_string(),
            })?;

        // Identical definitions make classes equivalent.
        let mut by_definition: FxHashMap<LogicalDefinition, Vec<ObjectId>> = FxHashMap::default();
        for (id, def) in &definitions {
            by_definition.entry(def.canonical()).or_default().push(*id);
        }
        for group in by_definition.values().filter(|g| g.len() > 1) {
            for a in group {
                for b in group {
                    if a != b {
                        inferred.add(*a, *b);
                    }
                }
            }
        }

        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let mut changed = false;
            for (defined, def) in &definitions {
                for class in &classes {
                    if class == defined || self.subsumed(&inferred, *class, *defined) {
                        continue;
                    }
                    if self.satisfies(&inferred, *class, def) {
                        debug!(?class, ?defined, "inferred subsumption");
                        changed |= inferred.add(*class, *defined);
                    }
                }
            }
            if !changed {
                break;
            }
        }

        info!(
            definitions = definitions.len(),
            inferred = inferred.parents.values().map(|s| s.len()).sum::<usize>(),
            rounds,
            "structural classification complete"
        );
        Ok(())
    }

    fn super_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode> {
        self.related(class, direct, true)
    }

    fn sub_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode> {
        self.related(class, direct, false)
    }

    fn equivalent_classes(&self, class: ObjectId) -> EquivalenceNode {
        let inferred = self.read_inferred();
        let mut members: Vec<ObjectId> = self.equivalents_in(&inferred, class).into_iter().collect();
        members.sort_unstable();
        EquivalenceNode {
            members: members.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::OntologyBuilder;

    fn nuclear_membrane_store() -> Arc<OntologyStore> {
        let mut b = OntologyBuilder::new();
        b.property("BFO:0000050", "part of", true)
            .class("GO:0016020", "membrane")
            .class("GO:0005634", "nucleus")
            .class("GO:0005635", "nuclear envelope")
            .class("GO:0031965", "nuclear membrane")
            .class("GO:0099999", "inner nuclear membrane")
            .subclass("GO:0005635", "GO:0016020")
            .some("GO:0005635", "BFO:0000050", "GO:0005634")
            .definition("GO:0031965", &["GO:0016020"], &[("BFO:0000050", "GO:0005634")])
            .subclass("GO:0099999", "GO:0016020")
            .some("GO:0099999", "BFO:0000050", "GO:0005635");
        Arc::new(b.build())
    }

    #[test]
    fn classifies_under_defined_class() {
        let store = nuclear_membrane_store();
        let reasoner = StructuralReasoner::new(store.clone());
        reasoner.precompute_inferences().unwrap();

        let envelope = store.class_by_identifier("GO:0005635").unwrap();
        let nm = store.class_by_identifier("GO:0031965").unwrap();
        let inner = store.class_by_identifier("GO:0099999").unwrap();
        assert!(reasoner.entails_subclass(envelope, nm));
        // part_of is transitive, so inner membrane is part of the nucleus too.
        assert!(reasoner.entails_subclass(inner, nm));
    }

    #[test]
    fn direct_super_classes_are_most_specific() {
        let store = nuclear_membrane_store();
        let reasoner = StructuralReasoner::new(store.clone());
        reasoner.precompute_inferences().unwrap();

        let envelope = store.class_by_identifier("GO:0005635").unwrap();
        let nm = store.class_by_identifier("GO:0031965").unwrap();
        let direct = reasoner.super_classes(envelope, true);
        assert_eq!(direct.len(), 1);
        assert!(direct[0].contains(nm));
        assert_eq!(reasoner.super_classes(envelope, false).len(), 2);
    }

    #[test]
    fn identical_definitions_are_equivalent() {
        let mut b = OntologyBuilder::new();
        b.property("BFO:0000050", "part of", true)
            .definition("X:1", &["X:0"], &[("BFO:0000050", "X:9")])
            .definition("X:2", &["X:0"], &[("BFO:0000050", "X:9")]);
        let store = Arc::new(b.build());
        let reasoner = StructuralReasoner::new(store.clone());
        reasoner.precompute_inferences().unwrap();

        let x1 = store.class_by_identifier("X:1").unwrap();
        let x2 = store.class_by_identifier("X:2").unwrap();
        let node = reasoner.equivalent_classes(x1);
        assert!(node.contains(x2));
        assert_eq!(node.members.len(), 2);
    }

    #[test]
    fn unclassified_reasoner_answers_told_hierarchy() {
        let store = nuclear_membrane_store();
        let reasoner = StructuralReasoner::new(store.clone());
        let envelope = store.class_by_identifier("GO:0005635").unwrap();
        let membrane = store.class_by_identifier("GO:0016020").unwrap();
        assert!(reasoner.entails_subclass(envelope, membrane));
        assert_eq!(reasoner.inferred_count(), 0);
    }
}
