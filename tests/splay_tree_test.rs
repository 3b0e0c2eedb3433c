// tests/splay_tree_test.rs
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use trace_model::{SplayNode, SplayTree, TraceModelError};

fn reference_less_or_equal(keys: &BTreeSet<i64>, key: i64) -> Option<i64> {
    keys.iter().copied().filter(|k| *k <= key).max()
}

fn reference_greater_or_equal(keys: &BTreeSet<i64>, key: i64) -> Option<i64> {
    keys.iter().copied().filter(|k| *k >= key).min()
}

#[test]
fn test_scenario_insert_query_delete() {
    let mut tree = SplayTree::new();
    for key in [5, 3, 8, 1, 4] {
        tree.insert(key, key * 10);
    }

    let node = tree.find_greatest_less_or_equal(&6).unwrap();
    assert_eq!(node.key(), &5);
    assert_eq!(node.value(), &50);

    assert_eq!(tree.remove(&3).unwrap(), 30);
    assert!(tree.find(&3).is_none());
    assert!(matches!(tree.remove(&3), Err(TraceModelError::KeyNotFound(_))));
}

#[test]
fn test_random_inserts_stay_sorted() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut tree = SplayTree::new();
    let mut reference = BTreeSet::new();

    for _ in 0..2_000 {
        let key: i64 = rng.gen_range(-5_000..5_000);
        assert_eq!(tree.insert(key, key), reference.insert(key));
    }

    let keys: Vec<i64> = tree.keys().copied().collect();
    let expected: Vec<i64> = reference.iter().copied().collect();
    assert_eq!(keys, expected);
    assert_eq!(tree.len(), reference.len());
}

#[test]
fn test_find_after_insert_returns_value() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut tree = SplayTree::new();
    let mut keys: Vec<u32> = (0..500).collect();
    keys.shuffle(&mut rng);

    for &key in &keys {
        tree.insert(key, format!("value-{}", key));
    }
    for &key in &keys {
        assert_eq!(tree.get(&key), Some(&format!("value-{}", key)));
        assert_eq!(tree.root().map(SplayNode::key), Some(&key));
    }
}

#[test]
fn test_reinsert_keeps_original_value() {
    let mut tree = SplayTree::new();
    for key in 0..100 {
        tree.insert(key, "original");
    }
    for key in 0..100 {
        assert!(!tree.insert(key, "replacement"));
    }
    assert!(tree.values().all(|value| *value == "original"));
    assert_eq!(tree.len(), 100);
}

#[test]
fn test_nearest_queries_match_linear_scan() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = SplayTree::new();
    let mut reference = BTreeSet::new();

    for _ in 0..1_000 {
        let key: i64 = rng.gen_range(0..10_000);
        tree.insert(key, ());
        reference.insert(key);
    }

    for _ in 0..2_000 {
        let probe: i64 = rng.gen_range(-100..10_100);
        assert_eq!(
            tree.find_greatest_less_or_equal(&probe).map(|n| *n.key()),
            reference_less_or_equal(&reference, probe),
            "greatest <= {}",
            probe
        );
        assert_eq!(
            tree.find_least_greater_or_equal(&probe).map(|n| *n.key()),
            reference_greater_or_equal(&reference, probe),
            "least >= {}",
            probe
        );
    }
}

#[test]
fn test_random_removals_match_reference() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tree = SplayTree::new();
    let mut reference = BTreeSet::new();

    for _ in 0..5_000 {
        let key: i64 = rng.gen_range(0..500);
        if rng.gen_bool(0.5) {
            tree.insert(key, key);
            reference.insert(key);
        } else {
            let removed = tree.remove(&key);
            if reference.remove(&key) {
                assert_eq!(removed.unwrap(), key);
            } else {
                assert!(removed.is_err());
            }
        }
        assert_eq!(tree.len(), reference.len());
    }

    let keys: Vec<i64> = tree.keys().copied().collect();
    assert_eq!(keys, reference.into_iter().collect::<Vec<_>>());
}

#[test]
fn test_comparator_tree_orders_addresses() {
    // Code ranges keyed by start address, looked up by an address inside them
    let mut tree = SplayTree::with_comparator(|a: &(u64, u64), b: &(u64, u64)| a.0.cmp(&b.0));
    tree.insert((0x1000, 0x1040), "fn_a");
    tree.insert((0x2000, 0x2100), "fn_b");
    tree.insert((0x1800, 0x1820), "fn_c");

    let node = tree.find_greatest_less_or_equal(&(0x1810, 0)).unwrap();
    assert_eq!(node.value(), &"fn_c");
    assert!(0x1810 < node.key().1);

    assert!(tree.find_greatest_less_or_equal(&(0x0fff, 0)).is_none());
}

#[test]
fn test_amortized_depth_stays_low() {
    let n = 4_096u32;
    let mut rng = StdRng::seed_from_u64(1234);
    let mut tree: SplayTree<u32, ()> = (0..n).map(|key| (key, ())).collect();
    assert_eq!(tree.height(), n as usize);

    for _ in 0..20_000 {
        let key = rng.gen_range(0..n);
        tree.find(&key);
    }

    // log2(4096) = 12; a linear shape would be 4096 deep
    let height = tree.height();
    assert!(height < (n as usize) / 8, "height {} too large", height);
}
