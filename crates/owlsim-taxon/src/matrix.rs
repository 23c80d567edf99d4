//! Dense class-by-taxon applicability matrix.
//!
//! Built in two phases: collect classes and taxa (first-seen order fixes
//! their indices), then populate a fixed-size row-major grid. The finished
//! matrix is immutable.
//!
//! Text form is tab-separated. The header lists taxon IRIs; each following
//! line is a class IRI and one `true`/`false` per taxon.

use std::io::{BufRead, Write};
use std::time::Instant;

use owlsim_core::errors::{BatchResult, TaxonError};
use owlsim_core::tracing::fields;
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::{iri_from_identifier, FxHashMap, ObjectId};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::constraints::TaxonConstraints;

/// Phase one: the ordered class and taxon sets.
#[derive(Debug, Default)]
pub struct ClassTaxonMatrixBuilder {
    classes: Vec<ObjectId>,
    class_index: FxHashMap<ObjectId, usize>,
    taxa: Vec<ObjectId>,
    taxon_index: FxHashMap<ObjectId, usize>,
}

fn push_unique(items: &mut Vec<ObjectId>, index: &mut FxHashMap<ObjectId, usize>, id: ObjectId) {
    if !index.contains_key(&id) {
        index.insert(id, items.len());
        items.push(id);
    }
}

impl ClassTaxonMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: ObjectId) -> &mut Self {
        push_unique(&mut self.classes, &mut self.class_index, class);
        self
    }

    pub fn add_classes(&mut self, classes: impl IntoIterator<Item = ObjectId>) -> &mut Self {
        for c in classes {
            self.add_class(c);
        }
        self
    }

    pub fn add_taxon(&mut self, taxon: ObjectId) -> &mut Self {
        push_unique(&mut self.taxa, &mut self.taxon_index, taxon);
        self
    }

    pub fn add_taxa(&mut self, taxa: impl IntoIterator<Item = ObjectId>) -> &mut Self {
        for t in taxa {
            self.add_taxon(t);
        }
        self
    }

    /// Phase two: evaluate every cell. Rows run in parallel; each row
    /// gathers the class's constraints once and checks every taxon.
    pub fn build(self, engine: &TaxonConstraints) -> Result<ClassTaxonMatrix, TaxonError> {
        let start = Instant::now();
        for t in &self.taxa {
            engine.check_taxon(*t)?;
        }
        let rows: Result<Vec<Vec<bool>>, TaxonError> = self
            .classes
            .par_iter()
            .map(|c| {
                let constraints = engine.constraints_of(*c)?;
                Ok(self
                    .taxa
                    .iter()
                    .map(|t| constraints.iter().all(|k| engine.satisfies(k, *t)))
                    .collect())
            })
            .collect();
        let cells: Vec<bool> = rows?.into_iter().flatten().collect();

        let graph = engine.graph();
        let class_iris = iris(graph, &self.classes);
        let taxon_iris = iris(graph, &self.taxa);
        info!(
            classes = self.classes.len(),
            taxa = self.taxa.len(),
            { fields::MATRIX_BUILD_TIME } = start.elapsed().as_millis() as u64,
            "class-taxon matrix built"
        );
        Ok(ClassTaxonMatrix {
            classes: self.classes,
            class_index: self.class_index,
            class_iris,
            taxa: self.taxa,
            taxon_index: self.taxon_index,
            taxon_iris,
            cells,
        })
    }
}

fn iris(graph: &dyn OntologyGraph, ids: &[ObjectId]) -> Vec<String> {
    ids.iter().map(|id| graph.iri(*id).unwrap_or_default()).collect()
}

/// Applicability of every (class, taxon) pair of a fixed cross product.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassTaxonMatrix {
    classes: Vec<ObjectId>,
    class_index: FxHashMap<ObjectId, usize>,
    class_iris: Vec<String>,
    taxa: Vec<ObjectId>,
    taxon_index: FxHashMap<ObjectId, usize>,
    taxon_iris: Vec<String>,
    /// Row-major, `classes.len() * taxa.len()`.
    cells: Vec<bool>,
}

impl ClassTaxonMatrix {
    /// Build the full cross product of `classes` and `taxa`.
    pub fn create(
        engine: &TaxonConstraints,
        classes: impl IntoIterator<Item = ObjectId>,
        taxa: impl IntoIterator<Item = ObjectId>,
    ) -> Result<Self, TaxonError> {
        let mut builder = ClassTaxonMatrixBuilder::new();
        builder.add_classes(classes).add_taxa(taxa);
        builder.build(engine)
    }

    /// Like [`Self::create`], skipping unknown IRIs into the manifest.
    pub fn create_from_iris(engine: &TaxonConstraints, classes: &[&str], taxa: &[&str]) -> BatchResult<Self> {
        let mut result = BatchResult::new(Self::default());
        let mut builder = ClassTaxonMatrixBuilder::new();
        for iri in classes {
            match engine.class(iri) {
                Ok(id) => {
                    builder.add_class(id);
                }
                Err(e) => {
                    warn!(iri, "skipping unknown class");
                    result.add_error(e);
                }
            }
        }
        for iri in taxa {
            match engine.taxon(iri) {
                Ok(id) => {
                    builder.add_taxon(id);
                }
                Err(e) => {
                    warn!(iri, "skipping unknown taxon");
                    result.add_error(e);
                }
            }
        }
        match builder.build(engine) {
            Ok(matrix) => result.data = matrix,
            Err(e) => result.add_error(e),
        }
        result
    }

    pub fn classes(&self) -> &[ObjectId] {
        &self.classes
    }

    pub fn taxa(&self) -> &[ObjectId] {
        &self.taxa
    }

    /// `None` when the pair was not part of the cross product.
    pub fn get(&self, class: ObjectId, taxon: ObjectId) -> Option<bool> {
        let row = *self.class_index.get(&class)?;
        let col = *self.taxon_index.get(&taxon)?;
        Some(self.cells[row * self.taxa.len() + col])
    }

    /// One class's values, in taxon order.
    pub fn row(&self, class: ObjectId) -> Option<&[bool]> {
        let row = *self.class_index.get(&class)?;
        let width = self.taxa.len();
        Some(&self.cells[row * width..(row + 1) * width])
    }

    /// Taxa the class is applicable to, in taxon order.
    pub fn applicable_taxa(&self, class: ObjectId) -> Vec<ObjectId> {
        match self.row(class) {
            Some(row) => self
                .taxa
                .iter()
                .zip(row)
                .filter(|(_, ok)| **ok)
                .map(|(t, _)| *t)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Write the tab-separated text form.
    pub fn write<W: Write>(&self, mut out: W) -> Result<(), TaxonError> {
        writeln!(out, "{}", self.taxon_iris.join("\t"))?;
        let width = self.taxa.len();
        for (row, iri) in self.class_iris.iter().enumerate() {
            write!(out, "{iri}")?;
            for value in &self.cells[row * width..(row + 1) * width] {
                write!(out, "\t{value}")?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write to a string.
    pub fn to_text(&self) -> Result<String, TaxonError> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        String::from_utf8(buf).map_err(|e| TaxonError::Io {
            message: e.to_string(),
        })
    }

    /// Read the text form, resolving IRIs against `graph`.
    pub fn parse<R: BufRead>(reader: R, graph: &dyn OntologyGraph) -> Result<Self, TaxonError> {
        let mut lines = reader.lines().enumerate();
        // An empty first line is a header with no taxa.
        let header = match lines.next() {
            Some((_, line)) => line?,
            None => return Ok(Self::default()),
        };

        let mut matrix = Self::default();
        for iri in header.split('\t').filter(|s| !s.is_empty()) {
            let id = resolve(graph, iri).ok_or_else(|| TaxonError::UnknownTaxon { iri: iri.to_string() })?;
            if matrix.taxon_index.contains_key(&id) {
                return Err(TaxonError::MalformedMatrix {
                    line: 1,
                    message: format!("duplicate taxon {iri}"),
                });
            }
            matrix.taxon_index.insert(id, matrix.taxa.len());
            matrix.taxa.push(id);
            matrix.taxon_iris.push(iri.to_string());
        }

        let width = matrix.taxa.len();
        for (n, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let malformed = |message: String| TaxonError::MalformedMatrix { line: n + 1, message };
            let mut cells = line.split('\t');
            let iri = cells.next().unwrap_or_default();
            let values: Vec<&str> = cells.collect();
            if values.len() != width {
                return Err(malformed(format!("expected {width} values, found {}", values.len())));
            }
            let id = resolve(graph, iri).ok_or_else(|| TaxonError::UnknownClass { iri: iri.to_string() })?;
            if matrix.class_index.contains_key(&id) {
                return Err(malformed(format!("duplicate class {iri}")));
            }
            matrix.class_index.insert(id, matrix.classes.len());
            matrix.classes.push(id);
            matrix.class_iris.push(iri.to_string());
            for v in values {
                let value = match v.trim() {
                    s if s.eq_ignore_ascii_case("true") => true,
                    s if s.eq_ignore_ascii_case("false") => false,
                    other => return Err(malformed(format!("not a boolean: {other:?}"))),
                };
                matrix.cells.push(value);
            }
        }
        Ok(matrix)
    }

    /// Parse from a string.
    pub fn from_text(text: &str, graph: &dyn OntologyGraph) -> Result<Self, TaxonError> {
        Self::parse(text.as_bytes(), graph)
    }
}

fn resolve(graph: &dyn OntologyGraph, iri: &str) -> Option<ObjectId> {
    graph
        .object_by_iri(&iri_from_identifier(iri))
        .or_else(|| graph.class_by_identifier(iri))
}
