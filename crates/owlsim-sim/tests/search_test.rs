//! Overlap search over the phenotype fixture.

use owlsim_core::config::{SearchConfig, SimConfig};
use owlsim_sim::{SearchEngine, SimSession};
use test_fixtures::{load_ontology, PHENOTYPES};

fn session() -> SimSession {
    let config = SimConfig {
        comparison_property: Some("RO:0002200".to_string()),
        ..Default::default()
    };
    SimSession::new(load_ontology(PHENOTYPES), &config).unwrap()
}

fn search_config(min_ic: f64) -> SearchConfig {
    SearchConfig {
        min_ic: Some(min_ic),
        ..Default::default()
    }
}

fn gene_iri(symbol: &str) -> String {
    format!("http://example.org/gene/{symbol}")
}

#[test]
fn hits_are_ranked_by_overlap_then_iri() {
    let s = session();
    let engine = SearchEngine::new(&s, &search_config(0.5));
    let query = s.resolve(&gene_iri("SCN1A")).unwrap();

    let hits = engine.search(query).unwrap();
    let iris: Vec<&str> = hits.iter().map(|h| h.iri.as_str()).collect();
    assert_eq!(iris, vec![gene_iri("KCNQ2"), gene_iri("SCN2A")]);
    assert!(hits.iter().all(|h| h.score == 5));
    assert!(hits.iter().all(|h| h.entity != query));
}

#[test]
fn default_minimum_ic_leaves_only_rare_attributes() {
    let s = session();
    // Only ID (IC log2 6 > 2.5) survives the default threshold, and no
    // other gene carries it.
    let engine = SearchEngine::new(&s, &SearchConfig::default());
    let query = s.resolve(&gene_iri("SCN1A")).unwrap();
    assert!(engine.search(query).unwrap().is_empty());
}

#[test]
fn label_blacklist_removes_attributes() {
    let s = session();
    let config = SearchConfig {
        min_ic: Some(0.5),
        excluded_labels: vec!["SEIZURE".to_string()],
        ..Default::default()
    };
    let engine = SearchEngine::new(&s, &config);
    let query = s.resolve(&gene_iri("SCN1A")).unwrap();
    let hits = engine.search(query).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.score == 4));
}

#[test]
fn exclusion_subset_is_never_significant() {
    let s = session();
    let config = SearchConfig {
        min_ic: Some(0.0),
        exclusion_subset: Some("non_informative".to_string()),
        ..Default::default()
    };
    let engine = SearchEngine::new(&s, &config);
    let closure = s.subsumers(s.resolve(&gene_iri("PAX6")).unwrap()).unwrap();
    let significant = engine.significant_attributes(&closure).unwrap();

    let top = s.resolve("HP:0000118").unwrap();
    let eye = s.resolve("HP:0000478").unwrap();
    assert!(!significant.contains(&top));
    assert!(significant.contains(&eye));
}

#[test]
fn profile_search_matches_shared_branches() {
    let s = session();
    let engine = SearchEngine::new(&s, &search_config(0.5));
    let visual = s.resolve("HP:0000505").unwrap();

    let hits = engine.search_profile(&[visual]).unwrap();
    let iris: Vec<&str> = hits.iter().map(|h| h.iri.as_str()).collect();
    assert_eq!(iris, vec![gene_iri("FBN1"), gene_iri("PAX6")]);
    // Visual impairment and abnormality of the eye.
    assert!(hits.iter().all(|h| h.score == 2));
}

#[test]
fn hits_are_truncated() {
    let s = session();
    let config = SearchConfig {
        min_ic: Some(0.5),
        max_hits: Some(1),
        ..Default::default()
    };
    let engine = SearchEngine::new(&s, &config);
    let query = s.resolve(&gene_iri("SCN1A")).unwrap();
    let hits = engine.search(query).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].iri, gene_iri("KCNQ2"));
}
