//! Tab-delimited pair scores.
//!
//! Columns: `A_ID A_Label B_ID B_Label <one per algorithm> LCS_ID LCS_Label LCS_IC`.
//! Absent labels and IC are empty cells.

use std::io::Write;

use owlsim_core::errors::SimError;

use super::{render_error, PairScoreRenderer, PairScores};
use crate::algorithm::SimAlgorithm;
use crate::session::SimSession;

pub struct TabRenderer<W: Write> {
    out: W,
}

impl<W: Write> TabRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Tabs and newlines inside labels would break the row.
fn cell(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

impl<W: Write> PairScoreRenderer for TabRenderer<W> {
    fn print_header(&mut self, algorithms: &[SimAlgorithm]) -> Result<(), SimError> {
        let mut columns = vec![
            "A_ID".to_string(),
            "A_Label".to_string(),
            "B_ID".to_string(),
            "B_Label".to_string(),
        ];
        columns.extend(algorithms.iter().map(|a| a.name()));
        columns.extend(["LCS_ID", "LCS_Label", "LCS_IC"].map(String::from));
        writeln!(self.out, "{}", columns.join("\t")).map_err(render_error)
    }

    fn print_pair_scores(&mut self, session: &SimSession, scores: &PairScores) -> Result<(), SimError> {
        let mut row = vec![
            session.identifier(scores.a),
            cell(&session.label(scores.a).unwrap_or_default()),
            session.identifier(scores.b),
            cell(&session.label(scores.b).unwrap_or_default()),
        ];
        row.extend(scores.scores.iter().map(|(_, s)| s.to_string()));
        match scores.lcs {
            Some(lcs) => {
                row.push(session.identifier(lcs));
                row.push(cell(&session.label(lcs).unwrap_or_default()));
            }
            None => row.extend([String::new(), String::new()]),
        }
        row.push(scores.lcs_ic.map(|ic| ic.to_string()).unwrap_or_default());
        writeln!(self.out, "{}", row.join("\t")).map_err(render_error)
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.out.flush().map_err(render_error)
    }
}
