//! Property tests over random class hierarchies.

use std::sync::Arc;

use owlsim_core::config::SimConfig;
use owlsim_core::ObjectId;
use owlsim_graph::{OntologyBuilder, OntologyStore};
use owlsim_sim::{Metric, SimAlgorithm, SimSession};
use proptest::prelude::*;

fn class_iri(i: usize) -> String {
    format!("http://example.org/C{i}")
}

/// A random DAG: class `i` may have parents among `0..i`. Entities are
/// annotated to random classes through instance-of edges.
fn build(parents: &[Vec<usize>], annotations: &[Vec<usize>]) -> Arc<OntologyStore> {
    let mut builder = OntologyBuilder::new();
    for (i, ps) in parents.iter().enumerate() {
        builder.class(&class_iri(i), &format!("C{i}"));
        if i == 0 {
            continue;
        }
        for p in ps {
            builder.subclass(&class_iri(i), &class_iri(*p % i));
        }
    }
    for (e, classes) in annotations.iter().enumerate() {
        let iri = format!("http://example.org/e{e}");
        builder.individual(&iri, &format!("e{e}"));
        for c in classes {
            builder.instance_of(&iri, &class_iri(*c % parents.len()));
        }
    }
    Arc::new(builder.build())
}

fn hierarchy() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<Vec<usize>>)> {
    (
        prop::collection::vec(prop::collection::vec(0usize..64, 0..3), 2..14),
        prop::collection::vec(prop::collection::vec(0usize..64, 1..4), 1..8),
    )
}

fn classes(session: &SimSession, n: usize) -> Vec<ObjectId> {
    (0..n).map(|i| session.resolve(&class_iri(i)).unwrap()).collect()
}

proptest! {
    #[test]
    fn lcs_members_do_not_subsume_each_other((parents, annotations) in hierarchy()) {
        let store = build(&parents, &annotations);
        let s = SimSession::new(store, &SimConfig::default()).unwrap();
        let cs = classes(&s, parents.len());
        for a in &cs {
            for b in &cs {
                let lcs = s.least_common_subsumers(*a, *b).unwrap();
                for x in lcs.iter() {
                    for y in lcs.iter() {
                        if x == y {
                            continue;
                        }
                        let x_above_y = s.subsumers(*y).unwrap().contains(x);
                        let y_above_x = s.subsumers(*x).unwrap().contains(y);
                        prop_assert!(!x_above_y || y_above_x);
                    }
                }
            }
        }
    }

    #[test]
    fn jaccard_is_symmetric_and_bounded((parents, annotations) in hierarchy()) {
        let store = build(&parents, &annotations);
        let s = SimSession::new(store, &SimConfig::default()).unwrap();
        let jaccard = SimAlgorithm::Pairwise(Metric::Jaccard);
        let cs = classes(&s, parents.len());
        for a in &cs {
            prop_assert_eq!(s.compare(*a, *a, jaccard).unwrap().score, 1.0);
            for b in &cs {
                let ab = s.compare(*a, *b, jaccard).unwrap().score;
                let ba = s.compare(*b, *a, jaccard).unwrap().score;
                prop_assert_eq!(ab, ba);
                prop_assert!((0.0..=1.0).contains(&ab));
            }
        }
    }

    #[test]
    fn information_content_decreases_upwards((parents, annotations) in hierarchy()) {
        let store = build(&parents, &annotations);
        let s = SimSession::new(store, &SimConfig::default()).unwrap();
        for y in classes(&s, parents.len()) {
            let fy = s.frequency(y).unwrap();
            for x in s.subsumers(y).unwrap().iter() {
                let fx = s.frequency(*x).unwrap();
                prop_assert!(fx >= fy);
                if let (Some(ix), Some(iy)) = (
                    s.information_content(*x).unwrap(),
                    s.information_content(y).unwrap(),
                ) {
                    prop_assert!(ix <= iy + 1e-12);
                }
            }
        }
    }
}
