use std::cmp::{self, Ordering};
use std::fmt;

use log::trace;

use crate::contract::SearchTree;

/// An ordered set of unique keys implemented with an AVL tree.
///
/// ```
/// use avl_chain::{AvlTree, SearchTree};
/// let mut tree = AvlTree::new();
/// tree.insert(3);
/// tree.insert(2);
/// tree.insert(1);
/// assert_eq!(tree.in_order(), [&1, &2, &3]);
/// assert_eq!(tree.left_child_of(&2), Some(&1));
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
struct Node<T> {
    key: T,
    height: i32,
    left: Link<T>,
    right: Link<T>,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns the height of the whole tree, or -1 if the tree is empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Clears the tree, deallocating all nodes.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Asserts order, cached heights and balance of every node.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check<T: Ord>(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> i32 {
            let node = match link {
                None => return -1,
                Some(node) => node,
            };

            // Check order against every ancestor
            if let Some(lower) = lower {
                assert!(node.key > *lower);
            }
            if let Some(upper) = upper {
                assert!(node.key < *upper);
            }

            let left_height = check(&node.left, lower, Some(&node.key));
            let right_height = check(&node.right, Some(&node.key), upper);

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!((left_height - right_height).abs() <= 1);

            node.height
        }

        check(&self.root, None, None);
    }

    fn find(&self, key: &T) -> Option<&Node<T>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }

    /// Inserts below the given link and rebalances on the way back up.
    /// Returns `None` for a duplicate key, otherwise the direction the descent
    /// took at the node now occupying the link (`Equal` for a new leaf).
    fn insert_at(link: &mut Link<T>, key: T) -> Option<Ordering> {
        let mut node = match link.take() {
            None => {
                *link = Some(Node::create(key));
                return Some(Ordering::Equal);
            }
            Some(node) => node,
        };

        let direction = key.cmp(&node.key);
        let below = match direction {
            Ordering::Equal => None,
            Ordering::Less => Self::insert_at(&mut node.left, key),
            Ordering::Greater => Self::insert_at(&mut node.right, key),
        };

        *link = Some(match below {
            None => node,
            Some(below) => Self::rebalance_after_insert(node, below),
        });
        below.map(|_| direction)
    }

    /// Restores balance at a node whose subtree just received a key.
    /// `below` is the direction the insertion took at the heavy child,
    /// i.e. how the new key compares to the child's key.
    fn rebalance_after_insert(mut node: Box<Node<T>>, below: Ordering) -> Box<Node<T>> {
        node.adjust_height();
        let factor = node.balance_factor();
        if factor > 1 {
            if below == Ordering::Less {
                // Left-left
                rotate_right(node)
            } else {
                // Left-right
                node.left = node.left.take().map(rotate_left);
                rotate_right(node)
            }
        } else if factor < -1 {
            if below == Ordering::Greater {
                // Right-right
                rotate_left(node)
            } else {
                // Right-left
                node.right = node.right.take().map(rotate_right);
                rotate_left(node)
            }
        } else {
            node
        }
    }

    fn remove_at(link: &mut Link<T>, key: &T) -> bool {
        let mut node = match link.take() {
            None => return false,
            Some(node) => node,
        };

        let removed = match key.cmp(&node.key) {
            Ordering::Less => Self::remove_at(&mut node.left, key),
            Ordering::Greater => Self::remove_at(&mut node.right, key),
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Leaf: the link stays empty
                (None, None) => return true,
                // Stem: splice the only child into the link
                (Some(child), None) | (None, Some(child)) => {
                    *link = Some(child);
                    return true;
                }
                // Replace by the in-order successor, the smallest key of the right subtree
                (Some(left), Some(right)) => {
                    let (rest, successor) = Self::take_min(right);
                    node.key = successor;
                    node.left = Some(left);
                    node.right = rest;
                    true
                }
            },
        };

        *link = Some(if removed {
            Self::rebalance_after_remove(node)
        } else {
            node
        });
        removed
    }

    /// Detaches the smallest node of a subtree.
    /// Returns the rebalanced rest of the subtree and the detached key.
    fn take_min(mut node: Box<Node<T>>) -> (Link<T>, T) {
        match node.left.take() {
            None => {
                let Node { key, right, .. } = *node;
                (right, key)
            }
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(Self::rebalance_after_remove(node)), min)
            }
        }
    }

    /// Restores balance at a node whose subtree just lost a key.
    /// The heavy child's own balance factor selects single or double rotation.
    fn rebalance_after_remove(mut node: Box<Node<T>>) -> Box<Node<T>> {
        node.adjust_height();
        let factor = node.balance_factor();
        if factor > 1 {
            if node.left.as_ref().map_or(0, |left| left.balance_factor()) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            rotate_right(node)
        } else if factor < -1 {
            if node.right.as_ref().map_or(0, |right| right.balance_factor()) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            rotate_left(node)
        } else {
            node
        }
    }

    fn traverse<'a, Pre, In, Post>(&'a self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(&'a T),
        In: FnMut(&'a T),
        Post: FnMut(&'a T),
    {
        fn visit<'a, T, Pre, In, Post>(
            link: &'a Link<T>,
            preorder: &mut Pre,
            inorder: &mut In,
            postorder: &mut Post,
        ) where
            Pre: FnMut(&'a T),
            In: FnMut(&'a T),
            Post: FnMut(&'a T),
        {
            if let Some(node) = link {
                preorder(&node.key);
                visit(&node.left, preorder, inorder, postorder);
                inorder(&node.key);
                visit(&node.right, preorder, inorder, postorder);
                postorder(&node.key);
            }
        }

        visit(&self.root, &mut preorder, &mut inorder, &mut postorder);
    }
}

impl<T: Ord> SearchTree<T> for AvlTree<T> {
    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        fn count<T>(link: &Link<T>) -> usize {
            match link {
                None => 0,
                Some(node) => 1 + count(&node.left) + count(&node.right),
            }
        }
        count(&self.root)
    }

    fn contains(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    fn height_of(&self, key: &T) -> Option<i32> {
        self.find(key).map(|node| node.height)
    }

    fn left_child_of(&self, key: &T) -> Option<&T> {
        self.find(key)?.left.as_ref().map(|left| &left.key)
    }

    fn right_child_of(&self, key: &T) -> Option<&T> {
        self.find(key)?.right.as_ref().map(|right| &right.key)
    }

    fn insert(&mut self, key: T) -> bool {
        Self::insert_at(&mut self.root, key).is_some()
    }

    fn remove(&mut self, key: &T) -> bool {
        Self::remove_at(&mut self.root, key)
    }

    fn in_order(&self) -> Vec<&T> {
        let mut keys = Vec::new();
        self.traverse(|_| {}, |key| keys.push(key), |_| {});
        keys
    }

    fn pre_order(&self) -> Vec<&T> {
        let mut keys = Vec::new();
        self.traverse(|key| keys.push(key), |_| {}, |_| {});
        keys
    }

    fn post_order(&self) -> Vec<&T> {
        let mut keys = Vec::new();
        self.traverse(|_| {}, |_| {}, |key| keys.push(key));
        keys
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Node<T> {
    fn create(key: T) -> Box<Self> {
        Box::new(Node {
            key,
            height: 0,
            left: None,
            right: None,
        })
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

fn height<T>(link: &Link<T>) -> i32 {
    match link {
        None => -1,
        Some(node) => node.height,
    }
}

//     n        l
//    / \      / \
//   l   c -> a   n
//  / \          / \
// a   b        b   c
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        None => node,
        Some(mut left) => {
            trace!("rotate right at height {}", node.height);
            node.left = left.right.take();
            node.adjust_height();
            left.right = Some(node);
            left.adjust_height();
            left
        }
    }
}

//   n            r
//  / \          / \
// a   r   ->   n   c
//    / \      / \
//   b   c    a   b
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        None => node,
        Some(mut right) => {
            trace!("rotate left at height {}", node.height);
            node.right = right.left.take();
            node.adjust_height();
            right.left = Some(node);
            right.adjust_height();
            right
        }
    }
}
