//! Hash codes used to place keys into the buckets of a
//! [`ChainedHashTable`](crate::ChainedHashTable).
//!
//! Integral keys are their own hash code. Text keys use the base-31
//! polynomial `s[0]*31^(n-1) + s[1]*31^(n-2) + ... + s[n-1]` over their
//! UTF-8 bytes, wrapping on overflow. Each byte is read as a signed 8-bit
//! value and sign-extended, so bytes above 0x7f contribute negatively.
//! Other key types opt in by implementing [`BucketHash`].

/// Computes the numeric code that selects a key's bucket.
///
/// Equal keys must produce equal codes.
pub trait BucketHash {
    fn bucket_hash(&self) -> usize;
}

macro_rules! integral_bucket_hash {
    ($($t:ty),*) => {
        $(
            impl BucketHash for $t {
                #[inline]
                fn bucket_hash(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

integral_bucket_hash!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl BucketHash for char {
    #[inline]
    fn bucket_hash(&self) -> usize {
        *self as usize
    }
}

impl BucketHash for bool {
    #[inline]
    fn bucket_hash(&self) -> usize {
        *self as usize
    }
}

impl BucketHash for str {
    fn bucket_hash(&self) -> usize {
        self.bytes().fold(0usize, |hash, b| {
            hash.wrapping_mul(31).wrapping_add(b as i8 as usize)
        })
    }
}

impl BucketHash for String {
    #[inline]
    fn bucket_hash(&self) -> usize {
        self.as_str().bucket_hash()
    }
}

impl<T: BucketHash + ?Sized> BucketHash for &T {
    #[inline]
    fn bucket_hash(&self) -> usize {
        (**self).bucket_hash()
    }
}

impl<T: BucketHash + ?Sized> BucketHash for Box<T> {
    #[inline]
    fn bucket_hash(&self) -> usize {
        (**self).bucket_hash()
    }
}
