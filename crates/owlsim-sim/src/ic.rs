//! Information content model.
//!
//! `IC(x) = -log2(freq(x) / N)` where `freq(x)` counts corpus entities whose
//! subsumer closure contains `x` and `N` is the corpus size. IC is absent
//! when the frequency is zero.

use owlsim_core::errors::SimError;
use owlsim_core::model::ObjectKind;
use owlsim_core::types::{FxHashSet, ObjectId};

use crate::session::SimSession;

/// IC for a frequency within a corpus of `corpus_size` entities.
pub fn ic_from_frequency(frequency: usize, corpus_size: usize) -> Option<f64> {
    if frequency == 0 || corpus_size == 0 {
        return None;
    }
    Some((corpus_size as f64 / frequency as f64).log2())
}

impl SimSession {
    /// Number of entities with at least one attribute.
    pub fn corpus_size(&self) -> usize {
        self.corpus().entities.len()
    }

    /// Number of corpus entities annotated to `attribute` directly or via closure.
    ///
    /// A synthesized intersection is counted by the entities whose closure
    /// contains every (flattened) operand.
    pub fn frequency(&self, attribute: ObjectId) -> Result<usize, SimError> {
        let corpus = self.corpus();
        if let Some(&f) = corpus.frequencies.get(&attribute) {
            return Ok(f);
        }
        match self.graph().kind(attribute) {
            None => Err(self.unknown(attribute)),
            Some(ObjectKind::Intersection) => {
                let operands = self.flatten_operands(attribute);
                if operands.is_empty() {
                    return Ok(0);
                }
                let mut count = 0;
                for entity in &corpus.entities {
                    let closure = self.subsumers(*entity)?;
                    if operands.iter().all(|op| closure.contains(op)) {
                        count += 1;
                    }
                }
                Ok(count)
            }
            Some(_) => Ok(0),
        }
    }

    /// Named operands of a synthesized class, expanding nested synthesized
    /// operands.
    fn flatten_operands(&self, class: ObjectId) -> FxHashSet<ObjectId> {
        let mut out = FxHashSet::default();
        let mut stack = vec![class];
        let mut seen = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            match self.graph().logical_definition(current) {
                Some(def)
                    if def.is_pure_intersection()
                        && self.graph().kind(current) == Some(ObjectKind::Intersection) =>
                {
                    stack.extend(def.genus.iter().copied());
                }
                _ => {
                    out.insert(current);
                }
            }
        }
        out
    }

    /// Memoized information content.
    pub fn information_content(&self, attribute: ObjectId) -> Result<Option<f64>, SimError> {
        if let Some(hit) = self.ic_cache.get(&attribute) {
            return Ok(hit);
        }
        let ic = ic_from_frequency(self.frequency(attribute)?, self.corpus_size());
        self.ic_cache.insert(attribute, ic);
        Ok(ic)
    }

    /// IC of an attribute seen on exactly one entity, the largest defined value.
    pub fn max_information_content(&self) -> Option<f64> {
        ic_from_frequency(1, self.corpus_size())
    }
}
