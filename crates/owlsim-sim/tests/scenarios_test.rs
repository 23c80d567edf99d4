//! End-to-end scoring scenarios over the fixture ontologies.

use std::sync::Arc;

use owlsim_core::config::SimConfig;
use owlsim_core::errors::SimError;
use owlsim_core::model::ObjectKind;
use owlsim_core::traits::OntologyGraph;
use owlsim_graph::OntologyBuilder;
use owlsim_sim::{BmaMode, Metric, SimAlgorithm, SimSession, Witness};
use test_fixtures::{load_ontology, ABC, PHENOTYPES};

const EPS: f64 = 1e-9;

fn abc_session() -> SimSession {
    SimSession::new(load_ontology(ABC), &SimConfig::default()).unwrap()
}

fn phenotype_session() -> SimSession {
    let config = SimConfig {
        comparison_property: Some("RO:0002200".to_string()),
        ..Default::default()
    };
    SimSession::new(load_ontology(PHENOTYPES), &config).unwrap()
}

fn id(session: &SimSession, iri: &str) -> owlsim_core::ObjectId {
    session.resolve(iri).unwrap()
}

fn gene(session: &SimSession, symbol: &str) -> owlsim_core::ObjectId {
    id(session, &format!("http://example.org/gene/{symbol}"))
}

#[test]
fn sibling_classes_share_their_parent() {
    let s = abc_session();
    let a = id(&s, "http://example.org/A");
    let b = id(&s, "http://example.org/B");
    let c = id(&s, "http://example.org/C");

    assert_eq!(*s.least_common_subsumers(a, b).unwrap(), vec![c]);
    let sim = s.compare(a, b, SimAlgorithm::Pairwise(Metric::Jaccard)).unwrap();
    assert!((sim.score - 1.0 / 3.0).abs() < EPS);
    assert_eq!(sim.witness, Witness::Overlap { common: 1, union: 3 });
}

#[test]
fn comparison_with_self_is_reflexive() {
    let s = abc_session();
    let a = id(&s, "http://example.org/A");
    assert_eq!(*s.least_common_subsumers(a, a).unwrap(), vec![a]);
    let sim = s.compare(a, a, SimAlgorithm::Pairwise(Metric::Jaccard)).unwrap();
    assert_eq!(sim.score, 1.0);
}

#[test]
fn subsumed_class_has_the_subsumer_as_lcs() {
    let s = abc_session();
    let a = id(&s, "http://example.org/A");
    let c = id(&s, "http://example.org/C");
    assert_eq!(*s.least_common_subsumers(a, c).unwrap(), vec![c]);
    assert_eq!(*s.least_common_subsumers(c, a).unwrap(), vec![c]);
}

#[test]
fn disjoint_entities_score_zero() {
    let s = abc_session();
    let i1 = id(&s, "http://example.org/i1");
    let i2 = id(&s, "http://example.org/i2");

    let jaccard = s.compare(i1, i2, SimAlgorithm::Pairwise(Metric::Jaccard)).unwrap();
    assert_eq!(jaccard.score, 0.0);
    assert!(!jaccard.score.is_nan());

    let conj = s.compare(i1, i2, SimAlgorithm::Pairwise(Metric::ConjunctiveSet)).unwrap();
    assert_eq!(conj.score, 0.0);
    assert_eq!(conj.lcs_class(), None);

    let ratio = s
        .compare(i1, i2, SimAlgorithm::Pairwise(Metric::ConjunctiveSetIcRatio))
        .unwrap();
    assert_eq!(ratio.score, 0.0);
}

#[test]
fn corpus_skips_entities_without_attributes() {
    let s = phenotype_session();
    assert_eq!(s.corpus_size(), 6);
    let uncharacterized = gene(&s, "UNCHARACTERIZED");
    assert!(!s.entities().contains(&uncharacterized));
}

#[test]
fn information_content_follows_frequency() {
    let s = phenotype_session();
    let ic = |curie: &str| s.information_content(id(&s, curie)).unwrap();

    assert_eq!(ic("HP:0000001"), Some(0.0));
    assert_eq!(ic("HP:0000118"), Some(0.0));
    assert!((ic("HP:0000707").unwrap() - 1.0).abs() < EPS);
    assert!((ic("HP:0002069").unwrap() - 3f64.log2()).abs() < EPS);
    assert!((ic("HP:0001249").unwrap() - 6f64.log2()).abs() < EPS);
    // Declared but never used.
    assert_eq!(ic("HP:0031797"), None);
    assert_eq!(s.max_information_content(), Some(6f64.log2()));
}

#[test]
fn unknown_comparison_property_is_rejected() {
    let config = SimConfig {
        comparison_property: Some("RO:0009999".to_string()),
        ..Default::default()
    };
    let err = SimSession::new(load_ontology(PHENOTYPES), &config).err().unwrap();
    assert!(matches!(err, SimError::UnknownProperty { .. }));
}

#[test]
fn unknown_attribute_is_reported() {
    let s = phenotype_session();
    let err = s.resolve("HP:9999999").unwrap_err();
    assert!(matches!(err, SimError::UnknownAttribute { iri } if iri == "HP:9999999"));
}

#[test]
fn multiple_lcs_members_are_synthesized_into_one_class() {
    let s = phenotype_session();
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");
    let neuro = id(&s, "HP:0012758");
    let cognitive = id(&s, "HP:0100543");

    let lcs = s.least_common_subsumers(id_, gdd).unwrap();
    let mut expected = vec![neuro, cognitive];
    expected.sort_unstable();
    assert_eq!(*lcs, expected);

    let class = s.lowest_common_subsumer_class(id_, gdd).unwrap().unwrap();
    assert_eq!(s.graph().kind(class), Some(ObjectKind::Intersection));
    assert_eq!(
        s.label(class).as_deref(),
        Some("Neurodevelopmental abnormality and Cognitive impairment")
    );
    assert!(s.iri(class).starts_with(owlsim_core::constants::SYNTHESIZED_CLASS_PREFIX));

    // SCN1A, SCN2A and KCNQ2 carry both operands.
    assert_eq!(s.frequency(class).unwrap(), 3);
    assert!((s.information_content(class).unwrap().unwrap() - 1.0).abs() < EPS);

    // Same operands, same class.
    assert_eq!(s.lowest_common_subsumer_class(gdd, id_).unwrap(), Some(class));
    assert_eq!(s.synthesize(&[cognitive, neuro]).unwrap(), class);
    assert_eq!(s.synthesized_count(), 1);
}

#[test]
fn conjunctive_metrics_use_the_synthesized_class() {
    let s = phenotype_session();
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");

    let conj = s.compare(id_, gdd, SimAlgorithm::Pairwise(Metric::ConjunctiveSet)).unwrap();
    assert!((conj.score - 1.0).abs() < EPS);

    let disj = s.compare(id_, gdd, SimAlgorithm::Pairwise(Metric::DisjunctiveSet)).unwrap();
    assert!((disj.score - 2.0).abs() < EPS);

    // IC(lcs) / min(IC(ID), IC(GDD)) = 1 / log2(3).
    let ratio = s
        .compare(id_, gdd, SimAlgorithm::Pairwise(Metric::ConjunctiveSetIcRatio))
        .unwrap();
    assert!((ratio.score - 1.0 / 3f64.log2()).abs() < EPS);
}

#[test]
fn max_ic_keeps_every_tied_subsumer() {
    let s = phenotype_session();
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");

    let sim = s.compare(id_, gdd, SimAlgorithm::Pairwise(Metric::MaxIc)).unwrap();
    assert!((sim.score - 1.0).abs() < EPS);
    let Witness::MaxIc { subsumers, .. } = &sim.witness else {
        panic!("unexpected witness {:?}", sim.witness);
    };
    let mut expected = vec![
        id(&s, "HP:0000707"),
        id(&s, "HP:0012758"),
        id(&s, "HP:0100543"),
    ];
    expected.sort_unstable();
    assert_eq!(*subsumers, expected);
}

#[test]
fn entity_jaccard_and_its_asymmetric_variant() {
    let s = phenotype_session();
    let scn1a = gene(&s, "SCN1A");
    let scn2a = gene(&s, "SCN2A");
    let col1a1 = gene(&s, "COL1A1");

    let j = |a, b| s.compare(a, b, SimAlgorithm::Pairwise(Metric::Jaccard)).unwrap().score;
    assert!((j(scn1a, scn2a) - 0.7).abs() < EPS);
    assert!((j(scn1a, col1a1) - 1.0 / 6.0).abs() < EPS);

    let aj = |a, b| {
        s.compare(a, b, SimAlgorithm::Pairwise(Metric::AsymmetricJaccard))
            .unwrap()
            .score
    };
    assert!((aj(scn2a, scn1a) - 7.0 / 8.0).abs() < EPS);
    assert!((aj(scn1a, scn2a) - 7.0 / 9.0).abs() < EPS);
}

#[test]
fn combined_metric_switches_on_the_threshold() {
    let s = phenotype_session();
    let scn1a = gene(&s, "SCN1A");
    let scn2a = gene(&s, "SCN2A");
    let combined = SimAlgorithm::Pairwise(Metric::CombinedJaccardConjunctive);

    // 0.7 is above the default threshold of 0.2.
    let above = s.compare(scn1a, scn2a, combined).unwrap();
    assert!((above.score - 0.7).abs() < EPS);
    assert!(matches!(above.witness, Witness::Combined { conjunctive: None, .. }));

    // Jaccard(ID, GDD) = 5/7 only falls below a tightened threshold.
    let strict = SimConfig {
        comparison_property: Some("RO:0002200".to_string()),
        jaccard_threshold: Some(0.9),
        ..Default::default()
    };
    let s = SimSession::new(load_ontology(PHENOTYPES), &strict).unwrap();
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");
    let sim = s.compare(id_, gdd, combined).unwrap();
    let conjunctive = s.compare(id_, gdd, SimAlgorithm::Pairwise(Metric::ConjunctiveSet)).unwrap();
    assert!((sim.score - 1.0).abs() < EPS);
    assert!((sim.score - conjunctive.score).abs() < EPS);
    assert_eq!(sim.lcs_class(), conjunctive.lcs_class());
    assert!(matches!(sim.witness, Witness::Combined { conjunctive: Some(c), class: Some(_), .. } if (c - 1.0).abs() < EPS));
}

#[test]
fn root_only_lcs_falls_back_to_every_member() {
    let mut builder = OntologyBuilder::new();
    builder
        .class("http://example.org/R1", "R1")
        .class("http://example.org/R2", "R2")
        .class("http://example.org/A", "A")
        .class("http://example.org/B", "B")
        .subclass("http://example.org/A", "http://example.org/R1")
        .subclass("http://example.org/A", "http://example.org/R2")
        .subclass("http://example.org/B", "http://example.org/R1")
        .subclass("http://example.org/B", "http://example.org/R2")
        .individual("http://example.org/i", "i")
        .instance_of("http://example.org/i", "http://example.org/A");
    let s = SimSession::new(Arc::new(builder.build()), &SimConfig::default()).unwrap();
    let a = id(&s, "http://example.org/A");
    let b = id(&s, "http://example.org/B");
    let r1 = id(&s, "http://example.org/R1");
    let r2 = id(&s, "http://example.org/R2");

    let mut roots = vec![r1, r2];
    roots.sort_unstable();
    assert_eq!(*s.least_common_subsumers(a, b).unwrap(), roots);
    // Each root has a single reflexive subsumer, below the default minimum.
    assert_eq!(s.subsumers(r1).unwrap().len(), 1);

    let class = s.lowest_common_subsumer_class(a, b).unwrap().unwrap();
    assert_eq!(s.graph().kind(class), Some(ObjectKind::Intersection));
    assert_eq!(s.label(class).as_deref(), Some("R1 and R2"));
    assert_eq!(s.synthesized_count(), 1);
}

#[test]
fn max_ic_ties_are_measured_against_the_final_maximum() {
    // C2 < C1 < C0 with IC 2, 1 and 0 over eight entities.
    let mut builder = OntologyBuilder::new();
    builder
        .class("http://example.org/C0", "C0")
        .class("http://example.org/C1", "C1")
        .class("http://example.org/C2", "C2")
        .class("http://example.org/A", "A")
        .class("http://example.org/B", "B")
        .subclass("http://example.org/C1", "http://example.org/C0")
        .subclass("http://example.org/C2", "http://example.org/C1")
        .subclass("http://example.org/A", "http://example.org/C2")
        .subclass("http://example.org/B", "http://example.org/C2");
    for (i, class) in ["C2", "C2", "C1", "C1", "C0", "C0", "C0", "C0"].iter().enumerate() {
        let iri = format!("http://example.org/e{i}");
        builder
            .individual(&iri, &format!("e{i}"))
            .instance_of(&iri, &format!("http://example.org/{class}"));
    }
    let config = SimConfig {
        ic_tie_epsilon: Some(1.5),
        ..Default::default()
    };
    let s = SimSession::new(Arc::new(builder.build()), &config).unwrap();
    let a = id(&s, "http://example.org/A");
    let b = id(&s, "http://example.org/B");

    let sim = s.compare(a, b, SimAlgorithm::Pairwise(Metric::MaxIc)).unwrap();
    assert!((sim.score - 2.0).abs() < EPS);
    let Witness::MaxIc { subsumers, .. } = &sim.witness else {
        panic!("unexpected witness {:?}", sim.witness);
    };
    let mut expected = vec![id(&s, "http://example.org/C1"), id(&s, "http://example.org/C2")];
    expected.sort_unstable();
    assert_eq!(*subsumers, expected);
}

#[test]
fn best_match_average_pools_both_directions() {
    let s = phenotype_session();
    let scn2a = gene(&s, "SCN2A");
    let kcnq2 = gene(&s, "KCNQ2");

    let symmetric = SimAlgorithm::BestMatchAverage {
        metric: Metric::MaxIc,
        mode: BmaMode::Symmetric,
    };
    let sim = s.compare(scn2a, kcnq2, symmetric).unwrap();
    let expected = (2.0 + 2.0 * 3f64.log2()) / 4.0;
    assert!((sim.score - expected).abs() < EPS);

    let Witness::BestMatches { forward, backward } = &sim.witness else {
        panic!("unexpected witness {:?}", sim.witness);
    };
    assert_eq!(forward.len(), 2);
    assert_eq!(backward.len(), 2);

    let asymmetric = SimAlgorithm::BestMatchAverage {
        metric: Metric::MaxIc,
        mode: BmaMode::Asymmetric,
    };
    let sim = s.compare(scn2a, kcnq2, asymmetric).unwrap();
    assert!((sim.score - (1.0 + 3f64.log2()) / 2.0).abs() < EPS);
}

#[test]
fn best_match_average_of_empty_set_is_zero() {
    let s = phenotype_session();
    let scn1a = gene(&s, "SCN1A");
    let empty = gene(&s, "UNCHARACTERIZED");
    let sim = s.compare(scn1a, empty, "bma-jaccard".parse().unwrap()).unwrap();
    assert_eq!(sim.score, 0.0);
}

#[test]
fn compare_by_name_resolves_curies_and_algorithms() {
    let s = phenotype_session();
    let sim = s
        .compare_by_name("HP:0002069", "HP:0002373", "JaccardSimilarity")
        .unwrap();
    // {2069,1250,707,118,1} vs {2373,1250,707,118,1}.
    assert!((sim.score - 4.0 / 6.0).abs() < EPS);

    let err = s.compare_by_name("HP:0002069", "HP:0002373", "cosine").unwrap_err();
    assert!(matches!(err, SimError::UnknownAlgorithm { .. }));
}

#[test]
fn caches_can_be_cleared_without_losing_synthesized_classes() {
    let s = phenotype_session();
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");
    let class = s.lowest_common_subsumer_class(id_, gdd).unwrap();
    s.clear_caches();
    assert_eq!(s.lowest_common_subsumer_class(id_, gdd).unwrap(), class);
    assert_eq!(s.synthesized_count(), 1);
}

#[test]
fn session_is_shareable_across_threads() {
    let s = Arc::new(phenotype_session());
    let id_ = id(&s, "HP:0001249");
    let gdd = id(&s, "HP:0001263");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&s);
            std::thread::spawn(move || s.lowest_common_subsumer_class(id_, gdd).unwrap())
        })
        .collect();
    let classes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(classes.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(s.synthesized_count(), 1);
}
