use avl_chain::{AvlTree, ChainedHashTable, Error, HashTable, SearchTree};

fn main() {
    let mut tree = AvlTree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
    }
    assert!(!tree.insert(5));
    assert_eq!(tree.height_of(&5), Some(2));
    tree.remove(&5);
    assert!(!tree.contains(&5));

    println!("in-order:   {:?}", tree.in_order());
    println!("pre-order:  {:?}", tree.pre_order());
    println!("post-order: {:?}", tree.post_order());

    let mut table = ChainedHashTable::<String, 4>::new();
    for word in ["ab", "bc", "cd", "ab"] {
        table.insert(word.to_string());
    }
    assert_eq!(table.len(), 3);
    assert_eq!(table.remove(&"zz".to_string()), Err(Error::KeyNotFound));

    for index in 0..table.capacity() {
        println!("bucket {index}: {:?}", table.bucket(index).unwrap_or_default());
    }
}
