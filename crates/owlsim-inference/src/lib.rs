//! # owlsim-inference
//!
//! Predicts new bioentity-to-class annotations from existing ones and the
//! ontology structure.
//!
//! An [`AnnotationPredictor`] proposes candidate classes per bioentity;
//! [`InferencePipeline`] runs it and applies the [`RedundancyFilter`] exactly
//! once, either dropping redundant predictions or flagging them.

pub mod annotation;
pub mod compositional;
pub mod pipeline;
pub mod predictor;
pub mod propagation;
pub mod redundancy;

pub use annotation::{group_by_bioentity, GeneAnnotation, Prediction};
pub use compositional::{CompositionalClassPredictor, Resolution};
pub use pipeline::InferencePipeline;
pub use predictor::AnnotationPredictor;
pub use propagation::PropagationPredictor;
pub use redundancy::{RedundancyFilter, RedundancyMode};
