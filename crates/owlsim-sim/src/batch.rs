//! Cancellable all-pairs comparison.
//!
//! One work unit is one row of the comparison matrix. Rows run on rayon;
//! once the cancellation token is set no new row starts, and rows already
//! running finish normally so cache state is never left half-written.

use std::time::Instant;

use owlsim_core::config::BatchConfig;
use owlsim_core::errors::{BatchResult, SimError};
use owlsim_core::tracing::fields;
use owlsim_core::traits::{Cancellable, CancellationToken};
use owlsim_core::types::ObjectId;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::algorithm::SimAlgorithm;
use crate::session::SimSession;
use crate::similarity::Similarity;

#[derive(Debug, Default)]
pub struct AllPairsOutput {
    /// Pairs at or above the minimum score, in row order.
    pub pairs: Vec<Similarity>,
    pub pairs_compared: usize,
    pub rows_completed: usize,
}

impl AllPairsOutput {
    /// Counters keyed by the standard field names.
    pub fn metrics(&self, skipped: usize) -> Vec<(&'static str, u64)> {
        vec![
            (fields::PAIRS_COMPARED, self.pairs_compared as u64),
            (fields::SKIPPED, skipped as u64),
        ]
    }
}

#[derive(Default)]
struct RowOutcome {
    pairs: Vec<Similarity>,
    compared: usize,
    errors: Vec<SimError>,
    ran: bool,
}

pub struct AllPairsRunner<'s> {
    session: &'s SimSession,
    algorithm: SimAlgorithm,
    config: BatchConfig,
    token: CancellationToken,
}

impl<'s> AllPairsRunner<'s> {
    pub fn new(session: &'s SimSession, algorithm: SimAlgorithm, config: &BatchConfig) -> Self {
        Self {
            session,
            algorithm,
            config: config.clone(),
            token: CancellationToken::new(),
        }
    }

    /// Use an externally owned token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// A handle that cancels this runner.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Compare every pair of corpus entities.
    pub fn entity_pairs(&self) -> BatchResult<AllPairsOutput> {
        self.run(self.session.entities())
    }

    /// Compare every pair of attributes used by the corpus.
    pub fn attribute_pairs(&self) -> BatchResult<AllPairsOutput> {
        self.run(&self.session.annotation_attributes())
    }

    /// Resolve IRIs (skipping unknown ones into the manifest), then compare.
    pub fn run_iris(&self, iris: &[&str]) -> BatchResult<AllPairsOutput> {
        let mut result = BatchResult::new(AllPairsOutput::default());
        let ids = result.absorb(self.session.resolve_all(iris));
        let output = result.absorb(self.run(&ids));
        result.data = output;
        result
    }

    /// Compare every pair of `items`.
    ///
    /// Unordered pairs are compared once when the algorithm and the config
    /// are both symmetric. Items whose closure cannot be computed are
    /// skipped up front.
    pub fn run(&self, items: &[ObjectId]) -> BatchResult<AllPairsOutput> {
        let start = Instant::now();
        let mut result = BatchResult::new(AllPairsOutput::default());

        let mut valid = Vec::with_capacity(items.len());
        for item in items {
            match self.session.subsumers(*item) {
                Ok(_) => valid.push(*item),
                Err(e) => {
                    warn!(error = %e, "skipping item");
                    result.add_error(e);
                }
            }
        }

        let rows: Vec<RowOutcome> = match self.pool() {
            Some(pool) => pool.install(|| self.rows(&valid)),
            None => self.rows(&valid),
        };

        for row in rows {
            if !row.ran {
                result.cancelled = true;
                continue;
            }
            result.data.rows_completed += 1;
            result.data.pairs_compared += row.compared;
            result.data.pairs.extend(row.pairs);
            for e in row.errors {
                result.add_error(e);
            }
        }

        info!(
            algorithm = %self.algorithm,
            items = valid.len(),
            pairs_compared = result.data.pairs_compared,
            reported = result.data.pairs.len(),
            skipped = result.error_count(),
            cancelled = result.cancelled,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "all-pairs run finished"
        );
        result
    }

    fn pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.config.effective_threads();
        if threads == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!(error = %e, threads, "falling back to the global thread pool");
                None
            }
        }
    }

    fn rows(&self, items: &[ObjectId]) -> Vec<RowOutcome> {
        (0..items.len())
            .into_par_iter()
            .map(|i| self.row(items, i))
            .collect()
    }

    fn row(&self, items: &[ObjectId], i: usize) -> RowOutcome {
        if self.token.is_cancelled() {
            return RowOutcome::default();
        }
        let once = self.config.effective_symmetric() && self.algorithm.is_symmetric();
        let min_score = self.config.effective_min_score();
        let first = if once { i + 1 } else { 0 };

        let mut outcome = RowOutcome {
            ran: true,
            ..RowOutcome::default()
        };
        for (j, b) in items.iter().enumerate().skip(first) {
            if j == i {
                continue;
            }
            match self.session.compare(items[i], *b, self.algorithm) {
                Ok(sim) => {
                    outcome.compared += 1;
                    if sim.score >= min_score {
                        outcome.pairs.push(sim);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "pair skipped");
                    outcome.errors.push(e);
                }
            }
        }
        outcome
    }
}
