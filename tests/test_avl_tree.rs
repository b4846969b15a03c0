use avl_collections::avl_tree::AvlTree;
use rand::Rng;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 2_000;

#[test]
fn int_test_avl_tree() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = AvlTree::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(-500, 500);
        assert_eq!(tree.insert(key), expected.insert(key));
        assert!(tree.is_valid());
    }

    assert_eq!(tree.len(), expected.len());
    assert_eq!(
        tree.iter().collect::<Vec<i32>>(),
        expected.iter().cloned().collect::<Vec<i32>>(),
    );

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(-500, 500);
        assert_eq!(tree.delete(&key), expected.remove(&key));
        assert_eq!(tree.contains(&key), expected.contains(&key));
        assert_eq!(tree.len(), expected.len());
        assert!(tree.is_valid());
    }

    assert_eq!(tree.traverse(), expected.into_iter().collect::<Vec<i32>>());
}

#[test]
fn int_test_round_trip() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = AvlTree::new();

    for i in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<i32>();
        if i % 3 == 2 {
            let victim = tree.min();
            if let Some(victim) = victim {
                tree.delete(&victim);
            }
        } else {
            tree.insert(key);
        }

        if i % 100 == 0 {
            let decoded = AvlTree::deserialize(&tree.serialize()).unwrap();
            assert_eq!(decoded, tree);
        }
    }

    let decoded: AvlTree = tree.serialize().parse().unwrap();
    assert_eq!(decoded.serialize(), tree.serialize());
    assert_eq!(decoded, tree);
}

#[test]
fn int_test_height_bound() {
    let tree: AvlTree = (0..4095).collect();
    assert_eq!(tree.height(), 11);
    assert!(tree.is_valid());

    let tree: AvlTree = (0..10_000).rev().collect();
    // 1.44 * log2(n + 2)
    assert!(tree.height() <= 19);
    assert!(tree.is_valid());
}

#[test]
fn int_test_idempotent_insert() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree: AvlTree = (0..200).map(|_| rng.gen_range(0, 100)).collect();

    for key in 0..100 {
        let before = tree.serialize();
        if !tree.insert(key) {
            assert_eq!(tree.serialize(), before);
        }
    }
    assert_eq!(tree.len(), 100);
}
