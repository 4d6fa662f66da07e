//! Property tests for the AVL tree and the chained hash table.

use std::collections::BTreeSet;

use avl_chain::{AvlTree, ChainedHashTable, Error, HashTable, SearchTree};
use proptest::prelude::*;

/// Height of the subtree below a child key, -1 for a missing child.
fn child_height(tree: &AvlTree<i32>, child: Option<&i32>) -> i32 {
    child.and_then(|key| tree.height_of(key)).unwrap_or(-1)
}

/// Checks cached heights and balance of every node through the public queries.
fn assert_balanced(tree: &AvlTree<i32>) -> Result<(), TestCaseError> {
    for key in tree.in_order() {
        let left = child_height(tree, tree.left_child_of(key));
        let right = child_height(tree, tree.right_child_of(key));
        prop_assert_eq!(tree.height_of(key), Some(1 + left.max(right)));
        prop_assert!((left - right).abs() <= 1);
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    Remove(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64..64i32).prop_map(Op::Insert),
        2 => (-64..64i32).prop_map(Op::Remove),
    ]
}

// ============================================================================
// AVL Tree
// ============================================================================

proptest! {
    // Every operation leaves the tree ordered and balanced.
    #[test]
    fn prop_tree_stays_balanced(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut tree = AvlTree::new();
        let mut reference = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(key) => prop_assert_eq!(tree.insert(key), reference.insert(key)),
                Op::Remove(key) => prop_assert_eq!(tree.remove(&key), reference.remove(&key)),
            }
            assert_balanced(&tree)?;
        }
        prop_assert_eq!(tree.len(), reference.len());
        prop_assert_eq!(tree.in_order(), reference.iter().collect::<Vec<_>>());
    }

    // In-order traversal is strictly increasing; the other orders visit the same keys.
    #[test]
    fn prop_traversals_agree(keys in prop::collection::vec(any::<i32>(), 0..100)) {
        let tree: AvlTree<i32> = keys.into_iter().collect();
        let in_order = tree.in_order();
        prop_assert!(in_order.windows(2).all(|pair| pair[0] < pair[1]));

        let mut pre_order = tree.pre_order();
        let mut post_order = tree.post_order();
        prop_assert_eq!(pre_order.first(), post_order.last());
        pre_order.sort();
        post_order.sort();
        prop_assert_eq!(&pre_order, &in_order);
        prop_assert_eq!(&post_order, &in_order);
    }

    // Ascending inserts never degrade into a list.
    #[test]
    fn prop_ascending_inserts_stay_shallow(n in 1..500i32) {
        let tree: AvlTree<i32> = (0..n).collect();
        let bound = (f64::from(n) + 1.0).log2().ceil() as i32 + 1;
        prop_assert!(tree.height() + 1 <= bound);
    }

    // Removing a node with two children promotes its in-order successor.
    #[test]
    fn prop_remove_promotes_successor(keys in prop::collection::btree_set(0..1000i32, 3..100)) {
        let mut tree: AvlTree<i32> = keys.iter().copied().collect();
        let target = keys
            .iter()
            .copied()
            .find(|key| tree.left_child_of(key).is_some() && tree.right_child_of(key).is_some());
        if let Some(target) = target {
            let successor = keys.range(target + 1..).next().copied();
            prop_assert!(tree.remove(&target));
            prop_assert!(!tree.contains(&target));
            if let Some(successor) = successor {
                prop_assert!(tree.contains(&successor));
            }
            assert_balanced(&tree)?;
            let expected: Vec<i32> = keys.iter().copied().filter(|&key| key != target).collect();
            prop_assert_eq!(tree.in_order(), expected.iter().collect::<Vec<_>>());
        }
    }
}

// ============================================================================
// Hash Table
// ============================================================================

proptest! {
    // Bucket placement is a pure function of key and capacity.
    #[test]
    fn prop_bucket_index_is_deterministic(key in any::<i64>(), text in "[a-zé漢🦀]{0,12}") {
        let numbers = ChainedHashTable::<i64, 13>::new();
        let index = numbers.bucket_index(&key);
        prop_assert!(index < 13);
        prop_assert_eq!(index, numbers.bucket_index(&key));

        let words = ChainedHashTable::<String, 13>::new();
        let expected = text
            .as_bytes()
            .iter()
            .fold(0usize, |hash, &b| hash.wrapping_mul(31).wrapping_add(i64::from(b as i8) as usize))
            % 13;
        prop_assert_eq!(words.bucket_index(&text), expected);
    }

    // Inserting the same key twice keeps exactly one copy.
    #[test]
    fn prop_insert_is_idempotent(keys in prop::collection::vec(0..50u32, 0..100)) {
        let mut table = ChainedHashTable::<u32, 7>::new();
        for key in &keys {
            table.insert(*key);
            prop_assert!(!table.insert(*key));
        }
        let distinct: BTreeSet<u32> = keys.iter().copied().collect();
        prop_assert_eq!(table.len(), distinct.len());
        for key in &distinct {
            prop_assert_eq!(table.iter().filter(|&stored| stored == key).count(), 1);
        }
    }

    // Removal takes out exactly one key; missing keys are reported.
    #[test]
    fn prop_remove_accounts_for_one_key(
        keys in prop::collection::btree_set(0..200i32, 0..60),
        probe in 0..200i32,
    ) {
        let mut table: ChainedHashTable<i32, 11> = keys.iter().copied().collect();
        let before = table.len();
        if keys.contains(&probe) {
            prop_assert_eq!(table.remove(&probe), Ok(probe));
            prop_assert_eq!(table.len(), before - 1);
            prop_assert!(!table.contains(&probe));
        } else {
            prop_assert_eq!(table.remove(&probe), Err(Error::KeyNotFound));
            prop_assert_eq!(table.len(), before);
        }
    }
}
