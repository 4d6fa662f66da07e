//! An ordered set implemented with an AVL tree and an unordered set
//! implemented with a fixed-capacity chained hash table.
//!
//! Both collections reject duplicate keys. Their operations are reached
//! through the [`SearchTree`] and [`HashTable`] traits.

mod contract;
mod error;
mod hash;
mod table;
mod tree;

pub use contract::{HashTable, SearchTree};
pub use error::{Error, Result};
pub use hash::BucketHash;
pub use table::ChainedHashTable;
pub use tree::AvlTree;
