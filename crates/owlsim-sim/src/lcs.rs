//! Least common subsumers.

use std::sync::Arc;

use owlsim_core::constants::SYNTHESIZED_CLASS_PREFIX;
use owlsim_core::errors::{GraphError, SimError};
use owlsim_core::types::{FxHashSet, ObjectId, PairKey, SmallVec4};
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

use crate::session::SimSession;

impl SimSession {
    /// `ReflexiveSubsumers(a) ∩ ReflexiveSubsumers(b)`.
    pub fn common_subsumers(&self, a: ObjectId, b: ObjectId) -> Result<FxHashSet<ObjectId>, SimError> {
        let sa = self.subsumers(a)?;
        let sb = self.subsumers(b)?;
        let (small, large) = if sa.len() <= sb.len() { (&sa, &sb) } else { (&sb, &sa) };
        Ok(small.iter().filter(|x| large.contains(x)).copied().collect())
    }

    /// When one class reflexively subsumes the other, the subsuming side.
    fn subsuming_side(&self, a: ObjectId, b: ObjectId) -> Result<Option<ObjectId>, SimError> {
        let class_like = |x: ObjectId| self.graph().kind(x).is_some_and(|k| k.is_class_like());
        if !class_like(a) || !class_like(b) {
            return Ok(None);
        }
        if a == b || self.subsumers(a)?.contains(&b) {
            return Ok(Some(b));
        }
        if self.subsumers(b)?.contains(&a) {
            return Ok(Some(a));
        }
        Ok(None)
    }

    /// Non-redundant common subsumers, sorted. Memoized per unordered pair.
    ///
    /// No member subsumes another member unless the two subsume each other.
    pub fn least_common_subsumers(&self, a: ObjectId, b: ObjectId) -> Result<Arc<Vec<ObjectId>>, SimError> {
        let key = PairKey::new(a, b);
        if let Some(hit) = self.lcs_cache.get(&key) {
            return Ok(hit);
        }
        let lcs = match self.subsuming_side(a, b)? {
            Some(x) => vec![x],
            None => self.remove_redundant(self.common_subsumers(a, b)?)?,
        };
        let lcs = Arc::new(lcs);
        self.lcs_cache.insert(key, Arc::clone(&lcs));
        Ok(lcs)
    }

    /// Drop every member that subsumes another member, keeping mutually
    /// subsuming pairs.
    fn remove_redundant(&self, set: FxHashSet<ObjectId>) -> Result<Vec<ObjectId>, SimError> {
        let members: Vec<ObjectId> = set.iter().copied().collect();
        let mut closures = Vec::with_capacity(members.len());
        for m in &members {
            closures.push(self.subsumers(*m)?);
        }
        let mut kept = Vec::new();
        for (i, x) in members.iter().enumerate() {
            let redundant = members.iter().enumerate().any(|(j, y)| {
                j != i && closures[j].contains(x) && !closures[i].contains(y)
            });
            if !redundant {
                kept.push(*x);
            }
        }
        kept.sort_unstable();
        Ok(kept)
    }

    /// A single class standing for the LCS of `a` and `b`.
    ///
    /// A lone LCS is returned as is. Several LCS members are first reduced
    /// to those with at least `lcs_min_subsumers` reflexive subsumers (all
    /// of them when none qualify), then conjoined into a synthesized
    /// intersection class. `None` when there is no common subsumer.
    pub fn lowest_common_subsumer_class(&self, a: ObjectId, b: ObjectId) -> Result<Option<ObjectId>, SimError> {
        let lcs = self.least_common_subsumers(a, b)?;
        match lcs.len() {
            0 => Ok(None),
            1 => Ok(Some(lcs[0])),
            _ => {
                let min = self.config().effective_lcs_min_subsumers();
                let mut meaningful = Vec::with_capacity(lcs.len());
                for m in lcs.iter() {
                    if self.subsumers(*m)?.len() >= min {
                        meaningful.push(*m);
                    }
                }
                if meaningful.is_empty() {
                    debug!(members = lcs.len(), "no LCS member passed the grouping filter");
                    meaningful = lcs.to_vec();
                }
                if meaningful.len() == 1 {
                    return Ok(Some(meaningful[0]));
                }
                self.synthesize(&meaningful).map(Some)
            }
        }
    }

    /// Declare (or fetch) the named intersection of `operands`.
    pub fn synthesize(&self, operands: &[ObjectId]) -> Result<ObjectId, SimError> {
        let mut key: SmallVec4<ObjectId> = operands.iter().copied().collect();
        key.sort_unstable();
        key.dedup();

        let mut pairs: Vec<(String, ObjectId)> = key.iter().map(|id| (self.iri(*id), *id)).collect();
        pairs.sort();
        let iris: Vec<String> = pairs.iter().map(|(iri, _)| iri.clone()).collect();

        let mut registry = self.registry.lock().map_err(|_| SimError::Synthesis {
            operands: iris.clone(),
            source: GraphError::LockPoisoned,
        })?;
        if let Some(&id) = registry.get(&key) {
            return Ok(id);
        }

        let iri = format!("{SYNTHESIZED_CLASS_PREFIX}{:016x}", xxh3_64(iris.join("\n").as_bytes()));
        let label = pairs
            .iter()
            .map(|(iri, id)| self.label(*id).unwrap_or_else(|| iri.clone()))
            .collect::<Vec<_>>()
            .join(" and ");
        let id = self
            .graph()
            .declare_intersection_class(&iri, &label, &key)
            .map_err(|source| SimError::Synthesis {
                operands: iris,
                source,
            })?;
        debug!(%iri, %label, "synthesized LCS class");
        registry.insert(key, id);
        Ok(id)
    }

    /// Number of classes synthesized by this session.
    pub fn synthesized_count(&self) -> usize {
        self.registry.lock().map(|r| r.len()).unwrap_or(0)
    }
}
