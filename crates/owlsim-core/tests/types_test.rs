//! Tests for interning, pair keys, and the cancellation token.

use owlsim_core::traits::{Cancellable, CancellationToken};
use owlsim_core::types::{IriInterner, PairKey};
use rayon::prelude::*;

#[test]
fn pair_key_is_unordered() {
    let interner = IriInterner::new();
    let a = interner.intern("http://example.org/A");
    let b = interner.intern("http://example.org/B");
    assert_eq!(PairKey::new(a, b), PairKey::new(b, a));
    assert!(!PairKey::new(a, b).is_reflexive());
    assert!(PairKey::new(a, a).is_reflexive());
}

#[test]
fn concurrent_interning_yields_one_id_per_iri() {
    let interner = IriInterner::new();
    let ids: Vec<_> = (0..1000)
        .into_par_iter()
        .map(|i| interner.intern(&format!("http://example.org/C{}", i % 10)))
        .collect();
    assert_eq!(interner.len(), 10);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(interner.resolve(*id), format!("http://example.org/C{}", i % 10));
    }
}

#[test]
fn get_does_not_insert() {
    let interner = IriInterner::new();
    assert!(interner.get("http://example.org/missing").is_none());
    assert!(interner.is_empty());
}

#[test]
fn cancellation_is_shared_between_clones() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
}
