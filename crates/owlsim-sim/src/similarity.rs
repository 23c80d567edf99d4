//! Pairwise scoring.
//!
//! Every metric is a function of the session (closures, IC model, LCS
//! engine) and two objects. Zero denominators and absent IC score 0.

use owlsim_core::errors::SimError;
use owlsim_core::types::ObjectId;
use serde::Serialize;
use tracing::debug;

use crate::algorithm::{Metric, SimAlgorithm};
use crate::session::SimSession;

/// Cache key for a metric score; symmetric metrics use the ordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreKey {
    metric: Metric,
    a: ObjectId,
    b: ObjectId,
}

impl ScoreKey {
    pub fn new(metric: Metric, a: ObjectId, b: ObjectId) -> Self {
        if metric.is_symmetric() && b < a {
            Self { metric, a: b, b: a }
        } else {
            Self { metric, a, b }
        }
    }
}

/// Best match of one attribute against the other side's attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMatch {
    pub attribute: ObjectId,
    /// `None` when the other side has no attributes.
    pub best: Option<ObjectId>,
    pub score: f64,
}

/// Algorithm-specific explanation of a score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Witness {
    /// Set sizes behind a Jaccard score. `union` is `|S(a)|` for the
    /// asymmetric variant.
    Overlap { common: usize, union: usize },
    /// Every common subsumer within epsilon of the maximum IC.
    MaxIc { ic: Option<f64>, subsumers: Vec<ObjectId> },
    /// The LCS members and the class that stands for them.
    Lcs {
        class: Option<ObjectId>,
        members: Vec<ObjectId>,
        ic: Option<f64>,
    },
    /// Jaccard stage and, when it ran, the conjunctive stage.
    Combined {
        jaccard: f64,
        conjunctive: Option<f64>,
        class: Option<ObjectId>,
    },
    BestMatches {
        forward: Vec<BestMatch>,
        backward: Vec<BestMatch>,
    },
}

/// A scored comparison of `a` relative to `b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity {
    pub a: ObjectId,
    pub b: ObjectId,
    pub algorithm: SimAlgorithm,
    pub score: f64,
    pub witness: Witness,
}

impl Similarity {
    /// The LCS class recorded in the witness, if any.
    pub fn lcs_class(&self) -> Option<ObjectId> {
        match &self.witness {
            Witness::Lcs { class, .. } | Witness::Combined { class, .. } => *class,
            Witness::MaxIc { subsumers, .. } => subsumers.first().copied(),
            _ => None,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl SimSession {
    /// Compare two objects with any algorithm.
    pub fn compare(&self, a: ObjectId, b: ObjectId, algorithm: SimAlgorithm) -> Result<Similarity, SimError> {
        let (score, witness) = match algorithm {
            SimAlgorithm::Pairwise(metric) => self.pairwise(a, b, metric)?,
            SimAlgorithm::BestMatchAverage { metric, mode } => {
                let attrs_a = self.attributes_of(a)?;
                let attrs_b = self.attributes_of(b)?;
                self.best_match_average(&attrs_a, &attrs_b, metric, mode)?
            }
        };
        debug!(algorithm = %algorithm, score, "compared");
        Ok(Similarity {
            a,
            b,
            algorithm,
            score,
            witness,
        })
    }

    /// Compare by IRI (or CURIE) with a registered algorithm name.
    pub fn compare_by_name(&self, a: &str, b: &str, algorithm: &str) -> Result<Similarity, SimError> {
        let algorithm: SimAlgorithm = algorithm.parse()?;
        self.compare(self.resolve(a)?, self.resolve(b)?, algorithm)
    }

    /// Compare with the configured default algorithm.
    pub fn compare_default(&self, a: ObjectId, b: ObjectId) -> Result<Similarity, SimError> {
        let algorithm: SimAlgorithm = self.config().effective_default_algorithm().parse()?;
        self.compare(a, b, algorithm)
    }

    /// Memoized score of a pairwise metric, without the witness.
    pub fn metric_score(&self, a: ObjectId, b: ObjectId, metric: Metric) -> Result<f64, SimError> {
        let key = ScoreKey::new(metric, a, b);
        if let Some(hit) = self.score_cache.get(&key) {
            return Ok(hit);
        }
        let (score, _) = self.pairwise(a, b, metric)?;
        self.score_cache.insert(key, score);
        Ok(score)
    }

    pub(crate) fn pairwise(&self, a: ObjectId, b: ObjectId, metric: Metric) -> Result<(f64, Witness), SimError> {
        match metric {
            Metric::Jaccard => self.jaccard(a, b),
            Metric::AsymmetricJaccard => self.asymmetric_jaccard(a, b),
            Metric::MaxIc => self.max_ic(a, b),
            Metric::ConjunctiveSet => self.conjunctive_set(a, b),
            Metric::DisjunctiveSet => self.disjunctive_set(a, b),
            Metric::ConjunctiveSetIcRatio => self.conjunctive_set_ic_ratio(a, b),
            Metric::CombinedJaccardConjunctive => self.combined_jaccard_conjunctive(a, b),
        }
    }

    fn jaccard(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let sa = self.subsumers(a)?;
        let sb = self.subsumers(b)?;
        let common = sa.iter().filter(|x| sb.contains(x)).count();
        let union = sa.len() + sb.len() - common;
        Ok((ratio(common, union), Witness::Overlap { common, union }))
    }

    fn asymmetric_jaccard(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let sa = self.subsumers(a)?;
        let sb = self.subsumers(b)?;
        let common = sa.iter().filter(|x| sb.contains(x)).count();
        Ok((
            ratio(common, sa.len()),
            Witness::Overlap {
                common,
                union: sa.len(),
            },
        ))
    }

    fn max_ic(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let epsilon = self.config().effective_ic_tie_epsilon();
        let mut scored: Vec<(ObjectId, f64)> = Vec::new();
        for x in self.common_subsumers(a, b)? {
            if let Some(ic) = self.information_content(x)? {
                scored.push((x, ic));
            }
        }
        let best = scored.iter().map(|(_, ic)| *ic).reduce(f64::max);
        let mut witnesses: Vec<ObjectId> = match best {
            Some(max) => scored
                .iter()
                .filter(|(_, ic)| (max - ic).abs() <= epsilon)
                .map(|(x, _)| *x)
                .collect(),
            None => Vec::new(),
        };
        witnesses.sort_unstable();
        Ok((
            best.unwrap_or(0.0),
            Witness::MaxIc {
                ic: best,
                subsumers: witnesses,
            },
        ))
    }

    fn lcs_witness(&self, a: ObjectId, b: ObjectId) -> Result<(Option<f64>, Witness), SimError> {
        let class = self.lowest_common_subsumer_class(a, b)?;
        let ic = match class {
            Some(c) => self.information_content(c)?,
            None => None,
        };
        let members = self.least_common_subsumers(a, b)?.to_vec();
        Ok((ic, Witness::Lcs { class, members, ic }))
    }

    fn conjunctive_set(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let (ic, witness) = self.lcs_witness(a, b)?;
        Ok((ic.unwrap_or(0.0), witness))
    }

    fn disjunctive_set(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let members = self.least_common_subsumers(a, b)?;
        let mut sum = 0.0;
        for m in members.iter() {
            sum += self.information_content(*m)?.unwrap_or(0.0);
        }
        Ok((
            sum,
            Witness::Lcs {
                class: None,
                members: members.to_vec(),
                ic: Some(sum),
            },
        ))
    }

    fn ic_ratio(&self, a: ObjectId, b: ObjectId, lcs_ic: Option<f64>) -> Result<f64, SimError> {
        let (Some(lcs_ic), Some(ia), Some(ib)) = (
            lcs_ic,
            self.information_content(a)?,
            self.information_content(b)?,
        ) else {
            return Ok(0.0);
        };
        let denominator = ia.min(ib);
        if denominator <= 0.0 {
            return Ok(0.0);
        }
        Ok(lcs_ic / denominator)
    }

    fn conjunctive_set_ic_ratio(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let (ic, witness) = self.lcs_witness(a, b)?;
        Ok((self.ic_ratio(a, b, ic)?, witness))
    }

    /// Jaccard at or above the threshold is final; below it the score is
    /// the IC of the LCS class.
    fn combined_jaccard_conjunctive(&self, a: ObjectId, b: ObjectId) -> Result<(f64, Witness), SimError> {
        let (jaccard, _) = self.jaccard(a, b)?;
        if jaccard >= self.config().effective_jaccard_threshold() {
            return Ok((
                jaccard,
                Witness::Combined {
                    jaccard,
                    conjunctive: None,
                    class: None,
                },
            ));
        }
        let class = self.lowest_common_subsumer_class(a, b)?;
        let score = match class {
            Some(c) => self.information_content(c)?.unwrap_or(0.0),
            None => 0.0,
        };
        Ok((
            score,
            Witness::Combined {
                jaccard,
                conjunctive: Some(score),
                class,
            },
        ))
    }
}
