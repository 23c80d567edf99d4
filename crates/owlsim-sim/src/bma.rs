//! Best-match average over attribute sets.

use owlsim_core::errors::SimError;
use owlsim_core::types::ObjectId;

use crate::algorithm::{BmaMode, Metric};
use crate::session::SimSession;
use crate::similarity::{BestMatch, Witness};

impl SimSession {
    /// For each attribute in `from`, its highest-scoring match in `to`.
    pub fn best_matches(&self, from: &[ObjectId], to: &[ObjectId], metric: Metric) -> Result<Vec<BestMatch>, SimError> {
        let mut out = Vec::with_capacity(from.len());
        for x in from {
            let mut best: Option<(ObjectId, f64)> = None;
            for y in to {
                let score = self.metric_score(*x, *y, metric)?;
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((*y, score));
                }
            }
            out.push(BestMatch {
                attribute: *x,
                best: best.map(|(y, _)| y),
                score: best.map_or(0.0, |(_, s)| s),
            });
        }
        Ok(out)
    }

    /// Average best-match score between two attribute sets.
    ///
    /// Symmetric mode pools the best matches of both directions:
    /// `(Σ best(a→b) + Σ best(b→a)) / (|A| + |B|)`. Asymmetric mode averages
    /// `a → b` only. Empty sets score 0.
    pub fn best_match_average(
        &self,
        attrs_a: &[ObjectId],
        attrs_b: &[ObjectId],
        metric: Metric,
        mode: BmaMode,
    ) -> Result<(f64, Witness), SimError> {
        if attrs_a.is_empty() || attrs_b.is_empty() {
            return Ok((
                0.0,
                Witness::BestMatches {
                    forward: Vec::new(),
                    backward: Vec::new(),
                },
            ));
        }
        let forward = self.best_matches(attrs_a, attrs_b, metric)?;
        let forward_sum: f64 = forward.iter().map(|m| m.score).sum();
        let (score, backward) = match mode {
            BmaMode::Asymmetric => (forward_sum / forward.len() as f64, Vec::new()),
            BmaMode::Symmetric => {
                let backward = self.best_matches(attrs_b, attrs_a, metric)?;
                let backward_sum: f64 = backward.iter().map(|m| m.score).sum();
                (
                    (forward_sum + backward_sum) / (forward.len() + backward.len()) as f64,
                    backward,
                )
            }
        };
        Ok((score, Witness::BestMatches { forward, backward }))
    }
}
