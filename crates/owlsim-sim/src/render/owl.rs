//! OWL functional-syntax pair scores.
//!
//! Each pair becomes a match individual linked to both operands, with one
//! data property assertion per score and an annotation pointing at the LCS.

use std::io::Write;

use owlsim_core::constants::MATCH_INDIVIDUAL_PREFIX;
use owlsim_core::errors::SimError;
use xxhash_rust::xxh3::xxh3_64;

use super::{render_error, PairScoreRenderer, PairScores};
use crate::algorithm::SimAlgorithm;
use crate::session::SimSession;

pub const SCORE_PROPERTY_PREFIX: &str = "http://owlsim.org/score/";
pub const HAS_SUBJECT: &str = "http://owlsim.org/vocab/has_subject";
pub const HAS_OBJECT: &str = "http://owlsim.org/vocab/has_object";
pub const HAS_LCS: &str = "http://owlsim.org/vocab/has_lcs";
pub const LCS_IC: &str = "http://owlsim.org/vocab/lcs_ic";

pub struct OwlAxiomRenderer<W: Write> {
    out: W,
}

impl<W: Write> OwlAxiomRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Stable IRI of the match individual for an ordered pair.
pub fn match_iri(a_iri: &str, b_iri: &str) -> String {
    let hash = xxh3_64(format!("{a_iri}\t{b_iri}").as_bytes());
    format!("{MATCH_INDIVIDUAL_PREFIX}{hash:016x}")
}

fn literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<W: Write> PairScoreRenderer for OwlAxiomRenderer<W> {
    fn print_header(&mut self, algorithms: &[SimAlgorithm]) -> Result<(), SimError> {
        let out = &mut self.out;
        writeln!(out, "Prefix(xsd:=<http://www.w3.org/2001/XMLSchema#>)").map_err(render_error)?;
        writeln!(out, "Prefix(rdfs:=<http://www.w3.org/2000/01/rdf-schema#>)").map_err(render_error)?;
        for algorithm in algorithms {
            writeln!(out, "Declaration(DataProperty(<{SCORE_PROPERTY_PREFIX}{}>))", algorithm.name())
                .map_err(render_error)?;
        }
        writeln!(out, "Declaration(DataProperty(<{LCS_IC}>))").map_err(render_error)?;
        for p in [HAS_SUBJECT, HAS_OBJECT, HAS_LCS] {
            writeln!(out, "Declaration(AnnotationProperty(<{p}>))").map_err(render_error)?;
        }
        Ok(())
    }

    fn print_pair_scores(&mut self, session: &SimSession, scores: &PairScores) -> Result<(), SimError> {
        let a = session.iri(scores.a);
        let b = session.iri(scores.b);
        let ind = match_iri(&a, &b);
        let label_of = |id| session.label(id).unwrap_or_else(|| session.identifier(id));
        let out = &mut self.out;

        writeln!(out, "Declaration(NamedIndividual(<{ind}>))").map_err(render_error)?;
        writeln!(
            out,
            "AnnotationAssertion(rdfs:label <{ind}> \"{} vs {}\")",
            literal(&label_of(scores.a)),
            literal(&label_of(scores.b))
        )
        .map_err(render_error)?;
        writeln!(out, "AnnotationAssertion(<{HAS_SUBJECT}> <{ind}> <{a}>)").map_err(render_error)?;
        writeln!(out, "AnnotationAssertion(<{HAS_OBJECT}> <{ind}> <{b}>)").map_err(render_error)?;
        for (algorithm, score) in &scores.scores {
            writeln!(
                out,
                "DataPropertyAssertion(<{SCORE_PROPERTY_PREFIX}{}> <{ind}> \"{score}\"^^xsd:double)",
                algorithm.name()
            )
            .map_err(render_error)?;
        }
        if let Some(lcs) = scores.lcs {
            writeln!(out, "AnnotationAssertion(<{HAS_LCS}> <{ind}> <{}>)", session.iri(lcs))
                .map_err(render_error)?;
        }
        if let Some(ic) = scores.lcs_ic {
            writeln!(out, "DataPropertyAssertion(<{LCS_IC}> <{ind}> \"{ic}\"^^xsd:double)")
                .map_err(render_error)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.out.flush().map_err(render_error)
    }
}
