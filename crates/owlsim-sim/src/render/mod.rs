//! Pluggable output of pair scores.

pub mod owl;
pub mod tab;

pub use owl::OwlAxiomRenderer;
pub use tab::TabRenderer;

use owlsim_core::errors::SimError;
use owlsim_core::types::ObjectId;

use crate::algorithm::SimAlgorithm;
use crate::session::SimSession;

/// Scores of one pair under several algorithms, plus its LCS class.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScores {
    pub a: ObjectId,
    pub b: ObjectId,
    pub scores: Vec<(SimAlgorithm, f64)>,
    pub lcs: Option<ObjectId>,
    pub lcs_ic: Option<f64>,
}

impl SimSession {
    /// Score a pair under every algorithm in `algorithms`.
    pub fn pair_scores(&self, a: ObjectId, b: ObjectId, algorithms: &[SimAlgorithm]) -> Result<PairScores, SimError> {
        let mut scores = Vec::with_capacity(algorithms.len());
        for algorithm in algorithms {
            scores.push((*algorithm, self.compare(a, b, *algorithm)?.score));
        }
        let lcs = self.lowest_common_subsumer_class(a, b)?;
        let lcs_ic = match lcs {
            Some(c) => self.information_content(c)?,
            None => None,
        };
        Ok(PairScores {
            a,
            b,
            scores,
            lcs,
            lcs_ic,
        })
    }
}

/// Writes pair scores in some output format.
pub trait PairScoreRenderer {
    /// Emit whatever precedes the first pair. Called once.
    fn print_header(&mut self, _algorithms: &[SimAlgorithm]) -> Result<(), SimError> {
        Ok(())
    }

    fn print_pair_scores(&mut self, session: &SimSession, scores: &PairScores) -> Result<(), SimError>;

    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

pub(crate) fn render_error(e: std::io::Error) -> SimError {
    SimError::Render {
        message: e.to_string(),
    }
}
