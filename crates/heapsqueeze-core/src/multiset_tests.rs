use super::*;

#[test]
fn counts_occurrences() {
    let mut set = Multiset::new();
    set.add(4u64);
    set.add(4);
    set.add(10);

    assert_eq!(set.count(&4), 2);
    assert_eq!(set.count(&10), 1);
    assert_eq!(set.count(&7), 0);
    assert_eq!(set.len(), 2);
    assert_eq!(set.total(), 3);
}

#[test]
fn empty_multiset() {
    let set: Multiset<u64> = Multiset::new();
    assert!(set.is_empty());
    assert_eq!(set.total(), 0);
    assert_eq!(set.keys().count(), 0);
}

fn of<K: std::hash::Hash + Eq>(keys: impl IntoIterator<Item = K>) -> Multiset<K> {
    let mut set = Multiset::new();
    for key in keys {
        set.add(key);
    }
    set
}

#[test]
fn keys_keep_insertion_order() {
    let set = of(["b", "a", "b", "c"]);
    let keys: Vec<_> = set.keys().copied().collect();
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn add_n_and_zero() {
    let mut set = Multiset::new();
    set.add_n("x".to_string(), 5);
    set.add_n("y".to_string(), 0);

    assert_eq!(set.count("x"), 5);
    assert_eq!(set.count("y"), 0);
    assert_eq!(set.len(), 2);
}

#[test]
fn merge_sums_counts() {
    let mut a = of([1u64, 2, 2]);
    let b = of([2u64, 3]);
    a.merge(b);

    assert_eq!(a.count(&1), 1);
    assert_eq!(a.count(&2), 3);
    assert_eq!(a.count(&3), 1);
    assert_eq!(a.total(), 5);
}

#[test]
fn equality_ignores_order() {
    let a = of([1u64, 2]);
    let b = of([2u64, 1]);
    assert_eq!(a, b);
}
