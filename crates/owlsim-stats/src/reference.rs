//! Precomputed IC statistics of a reference population.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use owlsim_core::config::StatsConfig;
use owlsim_core::errors::{BatchResult, SimError, StatsError};
use owlsim_core::tracing::fields;
use owlsim_core::types::{FxHashMap, ObjectId};
use owlsim_sim::{SimOntology, SimSession};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::histogram::Histogram;
use crate::significance;
use crate::summary::SummaryStats;

/// One reference entity: its attributes, their IC values, and summaries.
#[derive(Debug, Clone)]
pub struct EntityProfile {
    pub attributes: Vec<ObjectId>,
    /// IC of each attribute, aligned with `attributes`.
    pub ic_values: Vec<f64>,
    pub summary: SummaryStats,
    /// Summaries restricted to each top-level category the entity has
    /// attributes under.
    pub by_category: FxHashMap<ObjectId, SummaryStats>,
}

/// IC statistics of every corpus entity of a session.
#[derive(Default)]
pub struct ReferenceStats {
    /// Names entities and categories in lookup errors.
    graph: Option<Arc<dyn SimOntology>>,
    profiles: FxHashMap<ObjectId, EntityProfile>,
    aggregate: SummaryStats,
    aggregate_by_category: FxHashMap<ObjectId, SummaryStats>,
    categories: Vec<ObjectId>,
    /// Largest finite IC observed; absent or non-finite values clamp to it.
    max_ic: f64,
    bins: usize,
    build_time_ms: u64,
}

impl fmt::Debug for ReferenceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceStats")
            .field("entities", &self.profiles.len())
            .field("categories", &self.categories)
            .field("max_ic", &self.max_ic)
            .field("bins", &self.bins)
            .field("build_time_ms", &self.build_time_ms)
            .finish_non_exhaustive()
    }
}

impl ReferenceStats {
    /// Summarize every corpus entity. Top-level categories that do not
    /// resolve are logged and skipped into the manifest.
    pub fn build(session: &SimSession, config: &StatsConfig) -> Result<BatchResult<Self>, StatsError> {
        let start = Instant::now();
        let mut manifest: BatchResult<()> = BatchResult::new(());

        let mut categories = Vec::new();
        for iri in &config.top_level_categories {
            match session.resolve(iri) {
                Ok(id) => categories.push(id),
                Err(e) => {
                    warn!(category = %iri, "skipping unknown top-level category");
                    manifest.add_error(e);
                }
            }
        }

        let entities = session.entities();
        if entities.is_empty() {
            return Err(StatsError::EmptyPopulation);
        }

        // Raw IC per entity; absent values are clamped once the maximum is known.
        let raw: Vec<(ObjectId, Vec<ObjectId>, Vec<Option<f64>>)> = entities
            .par_iter()
            .map(|e| {
                let attributes = session.direct_attributes(*e);
                let ics = attributes
                    .iter()
                    .map(|a| session.information_content(*a).ok().flatten().filter(|v| v.is_finite()))
                    .collect();
                (*e, attributes, ics)
            })
            .collect();

        let max_ic = raw
            .iter()
            .flat_map(|(_, _, ics)| ics.iter().flatten())
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let max_ic = if max_ic.is_finite() {
            max_ic
        } else {
            session.max_information_content().unwrap_or(0.0)
        };

        let mut profiles = FxHashMap::default();
        let mut all_values = Vec::new();
        let mut all_by_category: FxHashMap<ObjectId, Vec<f64>> = FxHashMap::default();
        for (entity, attributes, ics) in raw {
            let ic_values: Vec<f64> = ics.into_iter().map(|v| v.unwrap_or(max_ic)).collect();
            let Some(summary) = SummaryStats::from_values(&ic_values) else {
                continue;
            };
            let mut by_category = FxHashMap::default();
            for category in &categories {
                let values = restrict(session, &attributes, &ic_values, *category);
                all_by_category.entry(*category).or_default().extend(&values);
                if let Some(s) = SummaryStats::from_values(&values) {
                    by_category.insert(*category, s);
                }
            }
            all_values.extend(&ic_values);
            profiles.insert(
                entity,
                EntityProfile {
                    attributes,
                    ic_values,
                    summary,
                    by_category,
                },
            );
        }

        let aggregate = SummaryStats::from_values(&all_values).ok_or(StatsError::EmptyPopulation)?;
        let aggregate_by_category = all_by_category
            .into_iter()
            .filter_map(|(c, values)| SummaryStats::from_values(&values).map(|s| (c, s)))
            .collect();

        let build_time_ms = start.elapsed().as_millis() as u64;
        info!(
            entities = profiles.len(),
            categories = categories.len(),
            max_ic,
            { fields::STATS_BUILD_TIME } = build_time_ms,
            "reference statistics built"
        );

        let mut result = BatchResult::new(Self {
            graph: Some(session.graph_handle()),
            profiles,
            aggregate,
            aggregate_by_category,
            categories,
            max_ic,
            bins: config.effective_histogram_bins(),
            build_time_ms,
        });
        result.absorb(manifest);
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn max_ic(&self) -> f64 {
        self.max_ic
    }

    /// Resolved top-level categories, in configuration order.
    pub fn categories(&self) -> &[ObjectId] {
        &self.categories
    }

    /// Statistics over every annotation of every reference entity.
    pub fn aggregate(&self) -> &SummaryStats {
        &self.aggregate
    }

    pub fn aggregate_for_category(&self, category: ObjectId) -> Result<Option<&SummaryStats>, StatsError> {
        self.check_category(category)?;
        Ok(self.aggregate_by_category.get(&category))
    }

    pub fn profile(&self, entity: ObjectId) -> Result<&EntityProfile, StatsError> {
        self.profiles
            .get(&entity)
            .ok_or_else(|| StatsError::ReferenceNotFound {
                iri: self.iri(entity),
            })
    }

    pub fn summary(&self, entity: ObjectId) -> Result<&SummaryStats, StatsError> {
        Ok(&self.profile(entity)?.summary)
    }

    /// `None` when the entity has no attributes under the category.
    pub fn category_summary(&self, entity: ObjectId, category: ObjectId) -> Result<Option<&SummaryStats>, StatsError> {
        self.check_category(category)?;
        Ok(self.profile(entity)?.by_category.get(&category))
    }

    fn iri(&self, id: ObjectId) -> String {
        self.graph
            .as_ref()
            .and_then(|g| g.iri(id))
            .unwrap_or_else(|| format!("{id:?}"))
    }

    fn check_category(&self, category: ObjectId) -> Result<(), StatsError> {
        if self.categories.contains(&category) {
            Ok(())
        } else {
            Err(StatsError::UnknownCategory {
                iri: self.iri(category),
            })
        }
    }

    /// IC values of a candidate attribute set. Unknown attributes are
    /// skipped into the manifest; absent or non-finite IC clamps to the
    /// maximum observed IC.
    pub fn candidate_ic(&self, session: &SimSession, attributes: &[ObjectId]) -> BatchResult<Vec<f64>> {
        let mut result = BatchResult::new(Vec::with_capacity(attributes.len()));
        for a in attributes {
            match session.information_content(*a) {
                Ok(Some(ic)) if ic.is_finite() => result.data.push(ic),
                Ok(_) => {
                    debug!("clamping absent IC to the observed maximum");
                    result.data.push(self.max_ic);
                }
                Err(e) => {
                    warn!(error = %e, "skipping candidate attribute");
                    result.add_error(e);
                }
            }
        }
        result
    }

    /// Candidate attributes under `category`, with their IC values.
    pub fn candidate_ic_in_category(
        &self,
        session: &SimSession,
        attributes: &[ObjectId],
        category: ObjectId,
    ) -> Result<BatchResult<Vec<f64>>, StatsError> {
        self.check_category(category)?;
        let mut manifest: BatchResult<()> = BatchResult::new(());
        let mut inside = Vec::with_capacity(attributes.len());
        for a in attributes {
            match under(session, *a, category) {
                Ok(true) => inside.push(*a),
                Ok(false) => {}
                Err(e) => manifest.add_error(e),
            }
        }
        let mut result = self.candidate_ic(session, &inside);
        result.absorb(manifest);
        Ok(result)
    }

    /// Mean squared deviation of the candidate IC values from the reference
    /// entity's mean IC.
    pub fn relative_variance(&self, entity: ObjectId, candidate: &[f64]) -> Result<f64, StatsError> {
        let mean = self.summary(entity)?.mean;
        if candidate.is_empty() {
            return Err(StatsError::InsufficientData { needed: 1, actual: 0 });
        }
        Ok(candidate.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / candidate.len() as f64)
    }

    /// One-sample t-test of the candidate against the reference entity's mean IC.
    pub fn t_test_p_value(&self, entity: ObjectId, candidate: &[f64]) -> Result<f64, StatsError> {
        significance::t_test(candidate, self.summary(entity)?.mean)
    }

    /// One-way ANOVA between the candidate and the reference entity's IC values.
    pub fn anova_p_value(&self, entity: ObjectId, candidate: &[f64]) -> Result<f64, StatsError> {
        let reference = &self.profile(entity)?.ic_values;
        significance::anova(&[candidate, reference.as_slice()])
    }

    /// Two-sample Kolmogorov-Smirnov test against the reference entity's IC values.
    pub fn ks_p_value(&self, entity: ObjectId, candidate: &[f64]) -> Result<f64, StatsError> {
        let reference = &self.profile(entity)?.ic_values;
        significance::kolmogorov_smirnov(candidate, reference)
    }

    /// IC distribution over `[0, max_ic]` with the configured bin count.
    pub fn histogram(&self, values: &[f64]) -> Histogram {
        Histogram::new(values, self.bins, 0.0, self.max_ic)
    }

    /// Histogram of a reference entity's IC values.
    pub fn entity_histogram(&self, entity: ObjectId) -> Result<Histogram, StatsError> {
        Ok(self.histogram(&self.profile(entity)?.ic_values))
    }

    /// Counters keyed by the standard field names.
    pub fn metrics(&self) -> Vec<(&'static str, u64)> {
        vec![
            (fields::CORPUS_SIZE, self.profiles.len() as u64),
            (fields::STATS_BUILD_TIME, self.build_time_ms),
        ]
    }
}

fn under(session: &SimSession, attribute: ObjectId, category: ObjectId) -> Result<bool, SimError> {
    Ok(session.subsumers(attribute)?.contains(&category))
}

fn restrict(session: &SimSession, attributes: &[ObjectId], ics: &[f64], category: ObjectId) -> Vec<f64> {
    attributes
        .iter()
        .zip(ics)
        .filter(|(a, _)| under(session, **a, category).unwrap_or(false))
        .map(|(_, ic)| *ic)
        .collect()
}
