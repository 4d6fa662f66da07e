use std::fmt;

use log::{debug, trace};

use crate::contract::HashTable;
use crate::error::{Error, Result};
use crate::hash::BucketHash;

/// A set of unique keys hashed into `CAPACITY` chained buckets.
///
/// The number of buckets is fixed for the lifetime of the table; colliding
/// keys are appended to the same bucket.
///
/// ```
/// use avl_chain::{ChainedHashTable, HashTable};
/// let mut table = ChainedHashTable::<i32, 4>::new();
/// table.insert(0);
/// table.insert(4);
/// assert_eq!(table.bucket(0), Some(&[0, 4][..]));
/// assert!(table.remove(&4).is_ok());
/// assert!(table.remove(&4).is_err());
/// ```
#[derive(Clone)]
pub struct ChainedHashTable<T, const CAPACITY: usize> {
    buckets: Box<[Vec<T>]>,
}

impl<T, const CAPACITY: usize> ChainedHashTable<T, CAPACITY>
where
    T: BucketHash + Eq,
{
    const NONZERO_CAPACITY: () = assert!(CAPACITY > 0, "hash table capacity must be positive");

    /// Creates an empty table.
    /// Each bucket allocates on its first insert.
    pub fn new() -> Self {
        let _ = Self::NONZERO_CAPACITY;
        Self {
            buckets: (0..CAPACITY).map(|_| Vec::new()).collect(),
        }
    }

    /// Returns the bucket a key belongs to, in `0..CAPACITY`.
    pub fn bucket_index(&self, key: &T) -> usize {
        key.bucket_hash() % CAPACITY
    }

    /// Returns the keys of a bucket in insertion order,
    /// or `None` if `index` is not below the capacity.
    pub fn bucket(&self, index: usize) -> Option<&[T]> {
        self.buckets.get(index).map(Vec::as_slice)
    }

    /// Returns an iterator over all keys, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flatten()
    }

    /// Removes all keys, keeping the buckets.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
    }

    /// Asserts that every key sits in its own bucket exactly once.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        for (index, bucket) in self.buckets.iter().enumerate() {
            for (position, key) in bucket.iter().enumerate() {
                assert_eq!(self.bucket_index(key), index);
                assert!(!bucket[position + 1..].contains(key));
            }
        }
    }
}

impl<T, const CAPACITY: usize> HashTable<T> for ChainedHashTable<T, CAPACITY>
where
    T: BucketHash + Eq,
{
    fn capacity(&self) -> usize {
        CAPACITY
    }

    fn insert(&mut self, key: T) -> bool {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if bucket.contains(&key) {
            return false;
        }
        trace!("insert into bucket {} of {}", index, CAPACITY);
        bucket.push(key);
        true
    }

    fn remove(&mut self, key: &T) -> Result<T> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        match bucket.iter().position(|stored| stored == key) {
            None => {
                debug!("remove of missing key from bucket {} of {}", index, CAPACITY);
                Err(Error::KeyNotFound)
            }
            Some(position) => {
                trace!("remove position {} of bucket {}", position, index);
                Ok(bucket.remove(position))
            }
        }
    }

    fn contains(&self, key: &T) -> bool {
        self.buckets[self.bucket_index(key)].contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}

impl<T, const CAPACITY: usize> Default for ChainedHashTable<T, CAPACITY>
where
    T: BucketHash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const CAPACITY: usize> fmt::Debug for ChainedHashTable<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buckets.iter()).finish()
    }
}

impl<T, const CAPACITY: usize> Extend<T> for ChainedHashTable<T, CAPACITY>
where
    T: BucketHash + Eq,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, const CAPACITY: usize> FromIterator<T> for ChainedHashTable<T, CAPACITY>
where
    T: BucketHash + Eq,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
