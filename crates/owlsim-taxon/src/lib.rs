//! # owlsim-taxon
//!
//! Taxon applicability of ontology classes. A class is inapplicable to a
//! taxon when something it reaches through its edge closure carries an
//! `only_in_taxon` axiom the taxon falls outside of, or a `never_in_taxon`
//! axiom the taxon falls under. [`ClassTaxonMatrix`] evaluates a whole
//! class-by-taxon cross product once and answers lookups in constant time.

pub mod constraints;
pub mod matrix;

pub use constraints::{TaxonConstraint, TaxonConstraints, TaxonRelation};
pub use matrix::{ClassTaxonMatrix, ClassTaxonMatrixBuilder};
