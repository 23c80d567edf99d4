//! Ranking candidate entities by overlap with a query profile.

use owlsim_core::config::SearchConfig;
use owlsim_core::errors::SimError;
use owlsim_core::types::{FxHashSet, ObjectId};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::session::SimSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub entity: ObjectId,
    pub iri: String,
    /// Number of significant query attributes in the candidate's closure.
    pub score: usize,
}

/// Overlap search over the session corpus.
///
/// Scores are raw intersection sizes, so richly annotated candidates are
/// favoured. Ties are broken by IRI.
pub struct SearchEngine<'s> {
    session: &'s SimSession,
    config: SearchConfig,
    excluded: FxHashSet<ObjectId>,
}

impl<'s> SearchEngine<'s> {
    pub fn new(session: &'s SimSession, config: &SearchConfig) -> Self {
        let graph = session.graph();
        let mut excluded = match config.exclusion_subset.as_deref() {
            Some(name) => graph.subset(name),
            None => FxHashSet::default(),
        };
        if !config.excluded_labels.is_empty() {
            for class in graph.classes() {
                let blacklisted = graph
                    .label(class)
                    .is_some_and(|l| config.excluded_labels.iter().any(|x| x.eq_ignore_ascii_case(&l)));
                if blacklisted {
                    excluded.insert(class);
                }
            }
        }
        debug!(excluded = excluded.len(), "search exclusions resolved");
        Self {
            session,
            config: config.clone(),
            excluded,
        }
    }

    /// Attributes of a closure that are not excluded and have IC above the minimum.
    pub fn significant_attributes(&self, closure: &FxHashSet<ObjectId>) -> Result<FxHashSet<ObjectId>, SimError> {
        let min_ic = self.config.effective_min_ic();
        let mut out = FxHashSet::default();
        for attr in closure {
            if self.excluded.contains(attr) {
                continue;
            }
            if matches!(self.session.information_content(*attr)?, Some(ic) if ic > min_ic) {
                out.insert(*attr);
            }
        }
        Ok(out)
    }

    /// Rank corpus entities against an entity (excluded from its own hits).
    pub fn search(&self, query: ObjectId) -> Result<Vec<SearchHit>, SimError> {
        let closure = self.session.subsumers(query)?;
        self.rank(&closure, Some(query))
    }

    /// Rank corpus entities against an anonymous attribute profile.
    pub fn search_profile(&self, attributes: &[ObjectId]) -> Result<Vec<SearchHit>, SimError> {
        let mut closure = FxHashSet::default();
        for attr in attributes {
            closure.extend(self.session.subsumers(*attr)?.iter().copied());
        }
        self.rank(&closure, None)
    }

    fn rank(&self, closure: &FxHashSet<ObjectId>, query: Option<ObjectId>) -> Result<Vec<SearchHit>, SimError> {
        let significant = self.significant_attributes(closure)?;
        if significant.is_empty() {
            info!("query has no significant attributes");
            return Ok(Vec::new());
        }

        let scored: Result<Vec<Option<SearchHit>>, SimError> = self
            .session
            .entities()
            .par_iter()
            .filter(|e| Some(**e) != query)
            .map(|e| {
                let candidate = self.session.subsumers(*e)?;
                let score = significant.iter().filter(|x| candidate.contains(x)).count();
                Ok((score > 0).then(|| SearchHit {
                    entity: *e,
                    iri: self.session.iri(*e),
                    score,
                }))
            })
            .collect();

        let mut hits: Vec<SearchHit> = scored?.into_iter().flatten().collect();
        hits.sort_by(|x, y| y.score.cmp(&x.score).then_with(|| x.iri.cmp(&y.iri)));
        hits.truncate(self.config.effective_max_hits());
        info!(
            significant = significant.len(),
            hits = hits.len(),
            "search complete"
        );
        Ok(hits)
    }
}
