//! Algorithm selection: a tagged enum plus a name registry.

use std::fmt;
use std::str::FromStr;

use owlsim_core::errors::SimError;
use serde::{Deserialize, Serialize};

/// A pairwise scoring metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// `|CS(a,b)| / |S(a) ∪ S(b)|`.
    Jaccard,
    /// `|CS(a,b)| / |S(a)|`, how much of a is explained by b.
    AsymmetricJaccard,
    /// Highest IC among the common subsumers.
    MaxIc,
    /// IC of the LCS class (synthesized when there are several LCS).
    ConjunctiveSet,
    /// Sum of the ICs of the LCS members.
    DisjunctiveSet,
    /// `IC(lcs) / min(IC(a), IC(b))`.
    ConjunctiveSetIcRatio,
    /// Jaccard, falling back to the IC ratio below a threshold.
    CombinedJaccardConjunctive,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::Jaccard,
        Metric::AsymmetricJaccard,
        Metric::MaxIc,
        Metric::ConjunctiveSet,
        Metric::DisjunctiveSet,
        Metric::ConjunctiveSetIcRatio,
        Metric::CombinedJaccardConjunctive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Jaccard => "jaccard",
            Self::AsymmetricJaccard => "asymmetric-jaccard",
            Self::MaxIc => "max-ic",
            Self::ConjunctiveSet => "conjunctive-set",
            Self::DisjunctiveSet => "disjunctive-set",
            Self::ConjunctiveSetIcRatio => "conjunctive-set-ic-ratio",
            Self::CombinedJaccardConjunctive => "combined-jaccard-conjunctive",
        }
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Self::AsymmetricJaccard)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize `JaccardSimilarity`, `max_ic`, `Max-IC` and the like.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.trim().chars() {
        match ch {
            '_' | ' ' | '-' => out.push('-'),
            c if c.is_ascii_uppercase() => {
                if prev_lower {
                    out.push('-');
                }
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c),
        }
        prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
    }
    out
}

impl FromStr for Metric {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        let name = name.strip_suffix("-similarity").unwrap_or(&name);
        let metric = match name {
            "jaccard" | "simj" => Self::Jaccard,
            "asymmetric-jaccard" | "asym-jaccard" => Self::AsymmetricJaccard,
            "max-ic" | "maximum-information-content" => Self::MaxIc,
            "conjunctive-set" => Self::ConjunctiveSet,
            "disjunctive-set" => Self::DisjunctiveSet,
            "conjunctive-set-ic-ratio" | "conjunctive-set-information-content-ratio" => {
                Self::ConjunctiveSetIcRatio
            }
            "combined-jaccard-conjunctive" | "combined-jaccard-conjunctive-set" => {
                Self::CombinedJaccardConjunctive
            }
            _ => {
                return Err(SimError::UnknownAlgorithm {
                    name: s.to_string(),
                })
            }
        };
        Ok(metric)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BmaMode {
    /// Pool best matches from both directions.
    Symmetric,
    /// Best matches of a's attributes against b only.
    Asymmetric,
}

/// A similarity algorithm: a metric applied to the objects themselves, or
/// averaged over best matches between attribute sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimAlgorithm {
    Pairwise(Metric),
    BestMatchAverage { metric: Metric, mode: BmaMode },
}

impl SimAlgorithm {
    pub fn metric(&self) -> Metric {
        match self {
            Self::Pairwise(m) | Self::BestMatchAverage { metric: m, .. } => *m,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        match self {
            Self::Pairwise(m) => m.is_symmetric(),
            Self::BestMatchAverage { mode, .. } => *mode == BmaMode::Symmetric,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Pairwise(m) => m.name().to_string(),
            Self::BestMatchAverage {
                metric,
                mode: BmaMode::Symmetric,
            } => format!("bma-{}", metric.name()),
            Self::BestMatchAverage {
                metric,
                mode: BmaMode::Asymmetric,
            } => format!("bma-asym-{}", metric.name()),
        }
    }

    /// Every name accepted by [`FromStr`] in canonical form.
    pub fn registered_names() -> Vec<String> {
        let mut names = Vec::with_capacity(Metric::ALL.len() * 3);
        for m in Metric::ALL {
            names.push(SimAlgorithm::Pairwise(m).name());
            for mode in [BmaMode::Symmetric, BmaMode::Asymmetric] {
                names.push(SimAlgorithm::BestMatchAverage { metric: m, mode }.name());
            }
        }
        names
    }
}

impl Default for SimAlgorithm {
    fn default() -> Self {
        Self::Pairwise(Metric::Jaccard)
    }
}

impl fmt::Display for SimAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SimAlgorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SimError::UnknownAlgorithm {
            name: s.to_string(),
        };
        let name = normalize(s);
        if let Some(rest) = name.strip_prefix("bma-asym-") {
            let metric = rest.parse::<Metric>().map_err(|_| unknown())?;
            return Ok(Self::BestMatchAverage {
                metric,
                mode: BmaMode::Asymmetric,
            });
        }
        if let Some(rest) = name
            .strip_prefix("bma-")
            .or_else(|| name.strip_prefix("average-best-match-"))
        {
            let metric = rest.parse::<Metric>().map_err(|_| unknown())?;
            return Ok(Self::BestMatchAverage {
                metric,
                mode: BmaMode::Symmetric,
            });
        }
        name.parse::<Metric>().map(Self::Pairwise).map_err(|_| unknown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_parses_back() {
        for name in SimAlgorithm::registered_names() {
            let alg: SimAlgorithm = name.parse().unwrap();
            assert_eq!(alg.name(), name);
        }
        assert_eq!(SimAlgorithm::registered_names().len(), 21);
    }

    #[test]
    fn class_style_names_are_accepted() {
        assert_eq!(
            "JaccardSimilarity".parse::<SimAlgorithm>().unwrap(),
            SimAlgorithm::Pairwise(Metric::Jaccard)
        );
        assert_eq!(
            "MaximumInformationContentSimilarity".parse::<Metric>().unwrap(),
            Metric::MaxIc
        );
        assert_eq!("Max-IC".parse::<Metric>().unwrap(), Metric::MaxIc);
        assert_eq!(
            "bma_asym_max_ic".parse::<SimAlgorithm>().unwrap(),
            SimAlgorithm::BestMatchAverage {
                metric: Metric::MaxIc,
                mode: BmaMode::Asymmetric
            }
        );
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "cosine".parse::<SimAlgorithm>().unwrap_err();
        assert!(matches!(err, SimError::UnknownAlgorithm { name } if name == "cosine"));
        assert!("bma-cosine".parse::<SimAlgorithm>().is_err());
    }

    #[test]
    fn symmetry_follows_metric_and_mode() {
        assert!(SimAlgorithm::Pairwise(Metric::Jaccard).is_symmetric());
        assert!(!SimAlgorithm::Pairwise(Metric::AsymmetricJaccard).is_symmetric());
        assert!(!SimAlgorithm::BestMatchAverage {
            metric: Metric::Jaccard,
            mode: BmaMode::Asymmetric
        }
        .is_symmetric());
        // Pooling both directions makes any metric symmetric.
        assert!(SimAlgorithm::BestMatchAverage {
            metric: Metric::AsymmetricJaccard,
            mode: BmaMode::Symmetric
        }
        .is_symmetric());
    }
}
