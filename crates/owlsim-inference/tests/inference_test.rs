//! Annotation inference over the GO slim fixture.

use std::sync::Arc;

use owlsim_core::errors::{InferenceError, OwlSimError};
use owlsim_core::traits::{OntologyGraph, Reasoner};
use owlsim_core::ObjectId;
use owlsim_graph::{OntologyStore, StructuralReasoner};
use owlsim_inference::{
    AnnotationPredictor, CompositionalClassPredictor, GeneAnnotation, InferencePipeline, Prediction,
    PropagationPredictor, RedundancyFilter, RedundancyMode, Resolution,
};
use test_fixtures::{load_ontology, obo, GO_SLIM};

const NUCLEUS: &str = "GO:0005634";
const ORGANELLE: &str = "GO:0043231";
const COMPONENT: &str = "GO:0005575";
const MEMBRANE: &str = "GO:0016020";
const ENVELOPE: &str = "GO:0005635";
const NUCLEAR_MEMBRANE: &str = "GO:0031965";
const REGULATION_OF_APOPTOSIS: &str = "GO:0042981";
const POSITIVE_REGULATION_OF_APOPTOSIS: &str = "GO:0043065";

fn store() -> Arc<OntologyStore> {
    load_ontology(GO_SLIM)
}

fn filter(store: &Arc<OntologyStore>, mode: RedundancyMode) -> RedundancyFilter {
    let reasoner = Arc::new(StructuralReasoner::new(store.clone()));
    reasoner.precompute_inferences().unwrap();
    RedundancyFilter::new(reasoner, mode)
}

fn id(store: &OntologyStore, curie: &str) -> ObjectId {
    store.require(curie).unwrap()
}

fn flags(predictions: &[Prediction], class: &str) -> (bool, bool) {
    let p = predictions
        .iter()
        .find(|p| p.annotation.class == obo(class))
        .unwrap_or_else(|| panic!("no prediction for {class}"));
    (
        p.is_redundant_with_existing_annotations,
        p.is_redundant_with_other_predictions,
    )
}

#[test]
fn part_of_propagates_to_the_whole_closure() {
    let s = store();
    let predictor = PropagationPredictor::new(s.clone());
    let result = predictor.predict(&[GeneAnnotation::new("MGI:1", ENVELOPE)]);
    assert!(result.is_clean());

    let mut classes: Vec<ObjectId> = result.data.iter().map(|p| p.class).collect();
    classes.sort_unstable();
    let mut expected = vec![id(&s, NUCLEUS), id(&s, ORGANELLE), id(&s, COMPONENT)];
    expected.sort_unstable();
    assert_eq!(classes, expected);

    for p in &result.data {
        assert_eq!(p.annotation.bioentity, "MGI:1");
        assert_eq!(p.annotation.evidence.as_deref(), Some("propagation"));
        assert!(!p.is_redundant());
    }
}

#[test]
fn redundancy_pass_keeps_only_the_most_specific_new_class() {
    let s = store();
    let pipeline = InferencePipeline::new(
        PropagationPredictor::new(s.clone()),
        filter(&s, RedundancyMode::Drop),
    );
    let result = pipeline.run(&[GeneAnnotation::new("MGI:1", ENVELOPE)]);
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].annotation.class, obo(NUCLEUS));
}

#[test]
fn flag_mode_keeps_redundant_predictions_with_flags() {
    let s = store();
    let pipeline = InferencePipeline::new(
        PropagationPredictor::new(s.clone()),
        filter(&s, RedundancyMode::Flag),
    );
    let result = pipeline.run(&[GeneAnnotation::new("MGI:1", ENVELOPE)]);
    assert_eq!(result.data.len(), 3);
    assert_eq!(flags(&result.data, NUCLEUS), (false, false));
    assert_eq!(flags(&result.data, ORGANELLE), (false, true));
    // The envelope itself is a cellular component.
    assert_eq!(flags(&result.data, COMPONENT), (true, true));
}

#[test]
fn annotations_to_unknown_classes_are_skipped() {
    let s = store();
    let pipeline = InferencePipeline::new(
        PropagationPredictor::new(s.clone()),
        filter(&s, RedundancyMode::Drop),
    );
    let result = pipeline.run(&[
        GeneAnnotation::new("MGI:1", "GO:9999999"),
        GeneAnnotation::new("MGI:2", ENVELOPE).with_evidence("IDA"),
    ]);
    assert_eq!(result.error_count(), 1);
    assert!(matches!(
        &result.errors[0],
        OwlSimError::Inference(InferenceError::UnknownClass { iri }) if iri == "GO:9999999"
    ));
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].annotation.bioentity, "MGI:2");
}

#[test]
fn predictions_follow_bioentity_order() {
    let s = store();
    let pipeline = InferencePipeline::new(
        PropagationPredictor::new(s.clone()),
        filter(&s, RedundancyMode::Drop),
    );
    let result = pipeline.run(&[
        GeneAnnotation::new("MGI:2", "GO:0000281"),
        GeneAnnotation::new("MGI:1", ENVELOPE),
    ]);
    let bioentities: Vec<&str> = result.data.iter().map(|p| p.annotation.bioentity.as_str()).collect();
    assert_eq!(bioentities, vec!["MGI:1", "MGI:2"]);
    assert_eq!(result.data[1].annotation.class, obo("GO:0000278"));
}

#[test]
fn undeclared_propagating_relations_are_ignored() {
    let s = store();
    let predictor = PropagationPredictor::with_properties(s, &["BFO:0000050", "RO:0000000"]);
    assert_eq!(predictor.properties().len(), 1);
}

#[test]
fn defined_class_is_predicted_from_genus_and_differentia() {
    let s = store();
    let predictor = CompositionalClassPredictor::from_graph(s.clone());
    assert_eq!(predictor.definitions().len(), 3);

    let existing = {
        let mut v = vec![id(&s, MEMBRANE), id(&s, ENVELOPE)];
        v.sort_unstable();
        v
    };
    let predictions = predictor.predict_for_bioentity("MGI:1", &existing);
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].class, id(&s, NUCLEAR_MEMBRANE));
    assert_eq!(predictions[0].annotation.evidence.as_deref(), Some("compositional"));

    let def = s.logical_definition(id(&s, NUCLEAR_MEMBRANE)).unwrap();
    assert_eq!(predictor.resolve(&def, &existing), Resolution::Resolved(existing.clone()));
}

#[test]
fn partial_match_is_resolved_but_unsatisfied() {
    let s = store();
    let predictor = CompositionalClassPredictor::from_graph(s.clone());
    let def = s.logical_definition(id(&s, NUCLEAR_MEMBRANE)).unwrap();

    let membrane_only = predictor.resolve(&def, &[id(&s, MEMBRANE)]);
    assert_eq!(membrane_only, Resolution::Resolved(Vec::new()));
    assert!(!membrane_only.is_satisfied());
    assert!(predictor.predict_for_bioentity("MGI:1", &[id(&s, ENVELOPE)]).is_empty());
}

#[test]
fn regulation_definitions_are_unresolvable() {
    let s = store();
    let predictor = CompositionalClassPredictor::from_graph(s.clone());
    let annotations = [id(&s, "GO:0065007"), id(&s, "GO:0006915")];
    for curie in [REGULATION_OF_APOPTOSIS, POSITIVE_REGULATION_OF_APOPTOSIS] {
        let def = s.logical_definition(id(&s, curie)).unwrap();
        assert!(matches!(
            predictor.resolve(&def, &annotations),
            Resolution::Unresolvable(_)
        ));
    }
    let outcomes = predictor.resolve_all(&annotations);
    assert_eq!(
        outcomes.iter().filter(|(_, r)| matches!(r, Resolution::Unresolvable(_))).count(),
        2
    );
}

#[test]
fn existing_defined_class_is_not_predicted_again() {
    let s = store();
    let predictor = CompositionalClassPredictor::from_graph(s.clone());
    let predictions = predictor.predict_for_bioentity("MGI:1", &[id(&s, NUCLEAR_MEMBRANE)]);
    assert!(predictions.is_empty());
}

#[test]
fn compositional_pipeline_end_to_end() {
    let s = store();
    let pipeline = InferencePipeline::new(
        CompositionalClassPredictor::from_graph(s.clone()),
        filter(&s, RedundancyMode::Drop),
    );
    let result = pipeline.run(&[
        GeneAnnotation::new("MGI:1", MEMBRANE),
        GeneAnnotation::new("MGI:1", obo(ENVELOPE)),
        GeneAnnotation::new("MGI:2", MEMBRANE),
    ]);
    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].annotation.bioentity, "MGI:1");
    assert_eq!(result.data[0].annotation.class, obo(NUCLEAR_MEMBRANE));
}
