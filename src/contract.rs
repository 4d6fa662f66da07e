//! Operations shared by every search tree and every hash table of this crate.

use crate::error::Result;

/// An ordered set of unique keys stored in a binary search tree.
pub trait SearchTree<T: Ord> {
    /// Returns true if the tree contains no keys.
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the tree.
    fn len(&self) -> usize;

    /// Returns true if the tree contains the key.
    fn contains(&self, key: &T) -> bool;

    /// Returns the height of the subtree rooted at the key.
    /// A leaf has height 0. Returns `None` if the key is not in the tree.
    fn height_of(&self, key: &T) -> Option<i32>;

    /// Returns the key of the left child of the node holding the key.
    fn left_child_of(&self, key: &T) -> Option<&T>;

    /// Returns the key of the right child of the node holding the key.
    fn right_child_of(&self, key: &T) -> Option<&T>;

    /// Inserts a key.
    /// Returns false, leaving the tree untouched, if an equal key is already present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key.
    /// Returns whether the key was previously in the tree.
    fn remove(&mut self, key: &T) -> bool;

    /// Lists the keys visiting each node between its left and right subtree.
    fn in_order(&self) -> Vec<&T>;

    /// Lists the keys visiting each node before its subtrees.
    fn pre_order(&self) -> Vec<&T>;

    /// Lists the keys visiting each node after its subtrees.
    fn post_order(&self) -> Vec<&T>;
}

/// A set of unique keys distributed over a fixed number of buckets.
pub trait HashTable<T> {
    /// Returns the number of buckets.
    fn capacity(&self) -> usize;

    /// Inserts a key.
    /// Returns false, leaving the table untouched, if the key is already present.
    fn insert(&mut self, key: T) -> bool;

    /// Removes a key and returns the stored one.
    /// Fails with [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the key is absent.
    fn remove(&mut self, key: &T) -> Result<T>;

    /// Returns true if the table contains the key.
    fn contains(&self, key: &T) -> bool;

    /// Returns the number of keys in the table.
    fn len(&self) -> usize;

    /// Returns true if the table contains no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
