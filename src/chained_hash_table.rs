use alloc::vec::Vec;
use compact_str::CompactString;
use core::{borrow::Borrow, mem};
use log::{trace, warn};
use serde::Serialize;

use crate::error::WordFrequencyError;
use crate::hasher::{FxWordHasher, WordHasher};

#[cfg(test)]
use unix_print::unix_println as println;

/// A generic string-keyed hash table which remembers insertion order
pub trait HashTable<K: Eq, V> {
    /// Inserts or replaces an item in the table, returning the replaced value
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Lookup item in the table
    fn get(&self, key: impl Borrow<str>) -> Option<&V>;

    /// Mutable lookup
    fn get_mut(&mut self, key: impl Borrow<str>) -> Option<&mut V>;

    /// Returns the number of table entries
    fn len(&self) -> usize;

    /// Returns true when the table holds no entries
    fn is_empty(&self) -> bool;

    /// Remove an entry from the table
    fn remove(&mut self, key: impl Borrow<str>) -> Option<V>;
}

pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;
/// Smallest accepted max load factor. Below it the bucket array dwarfs the entries
pub const MIN_MAX_LOAD_FACTOR: f32 = 0.01;
/// Largest bucket count a table asks for, before rounding up to a prime
pub const MAX_BUCKET_COUNT: usize = 1 << 26;

#[derive(Debug, Clone)]
struct Entry<V> {
    key: SKeyType,
    value: V,
    /// Sequence number handed out when the key was first inserted
    order: usize,
}

type SKeyType = CompactString;
type Bucket<V> = Vec<Entry<V>>;

/// Sizing policy of a [`StrHashTable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Buckets allocated up front, rounded up to a prime. Zero allocates lazily
    pub initial_buckets: usize,
    /// Rehash once `len / bucket_count` would exceed this
    pub max_load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_buckets: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), WordFrequencyError> {
        if !(self.max_load_factor.is_finite() && self.max_load_factor >= MIN_MAX_LOAD_FACTOR) {
            return Err(WordFrequencyError::InvalidLoadFactor(self.max_load_factor));
        }
        if self.initial_buckets > MAX_BUCKET_COUNT {
            return Err(WordFrequencyError::TooManyBuckets(self.initial_buckets));
        }
        Ok(())
    }
}

/// Distribution of entries over the buckets, computed by walking the table
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct BucketStats {
    pub bucket_count: usize,
    pub occupied_buckets: usize,
    pub max_bucket_len: usize,
    /// Entries per bucket, empty buckets included
    pub load_factor: f64,
    /// Entries per non-empty bucket
    pub occupied_average: f64,
}

/// Separate-chaining hash table keyed by strings.
///
/// The bucket count is always zero or a prime. The hash function is a type
/// parameter so a table with a zero-sized hasher carries no extra state for it.
#[derive(Debug, Clone)]
pub struct StrHashTable<V, H = FxWordHasher> {
    // Each bucket is a collision chain. Entries keep their insertion sequence number
    // so callers can break ties by first appearance without a side structure.
    buckets: Vec<Bucket<V>>,
    // Number of table entries
    size: usize,
    // Next insertion sequence number. Differs from `size` once entries are removed,
    // so orders stay unique
    inserted: usize,
    max_load_factor: f32,
    hasher: H,
}

impl<V, H: WordHasher> StrHashTable<V, H> {
    /// Builds an empty table with the default sizing policy
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            buckets: Vec::new(),
            size: 0,
            inserted: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hasher,
        }
    }

    pub fn with_config(config: TableConfig, hasher: H) -> Result<Self, WordFrequencyError> {
        config.validate()?;
        let mut table = Self::with_hasher(hasher);
        table.max_load_factor = config.max_load_factor;
        if config.initial_buckets > 0 {
            let bucket_count = next_prime(config.initial_buckets)
                .ok_or(WordFrequencyError::TooManyBuckets(config.initial_buckets))?;
            table.rehash(bucket_count);
        }
        Ok(table)
    }

    /// Returns the count-or-default slot for `key`, inserting `default()` when absent
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        match self.find(key) {
            Some((bucket_i, slot_i)) => &mut self.buckets[bucket_i][slot_i].value,
            None => self.push_new(key.into(), default()),
        }
    }

    /// Makes room for `additional` more entries without exceeding the max load factor.
    /// Fails, leaving the table untouched, when that needs more than [`MAX_BUCKET_COUNT`] buckets
    pub fn reserve(&mut self, additional: usize) -> Result<(), WordFrequencyError> {
        let needed = self
            .size
            .checked_add(additional)
            .ok_or(WordFrequencyError::TooManyBuckets(usize::MAX))?;
        self.grow_for(needed)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the collision chain in bucket `bucket_i`, 0 when out of range
    pub fn bucket_len(&self, bucket_i: usize) -> usize {
        self.buckets.get(bucket_i).map_or(0, Vec::len)
    }

    /// Entries per bucket. 0.0 for a table without buckets
    pub fn load_factor(&self) -> f64 {
        if self.buckets.is_empty() {
            0.0
        } else {
            self.size as f64 / self.buckets.len() as f64
        }
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub fn max_bucket_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn bucket_stats(&self) -> BucketStats {
        let occupied_buckets = self.buckets.iter().filter(|b| !b.is_empty()).count();
        let occupied_average = if occupied_buckets == 0 {
            0.0
        } else {
            self.size as f64 / occupied_buckets as f64
        };
        BucketStats {
            bucket_count: self.buckets.len(),
            occupied_buckets,
            max_bucket_len: self.max_bucket_len(),
            load_factor: self.load_factor(),
            occupied_average,
        }
    }

    /// Iterates `(key, value, insertion order)` in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V, usize)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value, entry.order))
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    // Locate key as (bucket index, position in chain)
    fn find(&self, key: &str) -> Option<(usize, usize)> {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket_i = self.hasher.hash(key) % self.buckets.len();
        self.buckets[bucket_i]
            .iter()
            .position(|entry| entry.key.as_str() == key)
            .map(|slot_i| (bucket_i, slot_i))
    }

    // Appends a key known to be absent
    fn push_new(&mut self, key: SKeyType, value: V) -> &mut V {
        // A full table keeps accepting entries in longer chains.
        // The first insert needs at most 1 / MIN_MAX_LOAD_FACTOR buckets and cannot fail
        if let Err(e) = self.grow_for(self.size + 1) {
            warn!("not growing past {} buckets: {}", self.buckets.len(), e);
        }
        let bucket_i = self.hasher.hash(&key) % self.buckets.len();
        let order = self.inserted;
        self.inserted += 1;
        self.size += 1;

        let bucket = &mut self.buckets[bucket_i];
        bucket.push(Entry { key, value, order });
        let slot_i = bucket.len() - 1;
        &mut bucket[slot_i].value
    }

    fn grow_for(&mut self, needed: usize) -> Result<(), WordFrequencyError> {
        let bucket_count = self.buckets.len();
        let max_load = f64::from(self.max_load_factor);
        if needed as f64 <= bucket_count as f64 * max_load {
            return Ok(());
        }
        let for_load = (needed as f64 / max_load).ceil();
        if for_load > MAX_BUCKET_COUNT as f64 {
            return Err(WordFrequencyError::TooManyBuckets(needed));
        }
        let target = (for_load as usize)
            .max(bucket_count * 2)
            .min(MAX_BUCKET_COUNT);
        let target = next_prime(target).ok_or(WordFrequencyError::TooManyBuckets(target))?;
        self.rehash(target);
        Ok(())
    }

    fn rehash(&mut self, bucket_count: usize) {
        #[cfg(test)]
        println!("Rehashing {} entries into {} buckets", self.size, bucket_count);
        trace!("rehashing {} entries into {} buckets", self.size, bucket_count);

        let mut buckets: Vec<Bucket<V>> = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        for entry in mem::take(&mut self.buckets).into_iter().flatten() {
            let bucket_i = self.hasher.hash(&entry.key) % bucket_count;
            buckets[bucket_i].push(entry);
        }
        self.buckets = buckets;
    }
}

impl<V, H: WordHasher + Default> Default for StrHashTable<V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<V, H: WordHasher + Default> StrHashTable<V, H> {
    /// Initializes an empty table able to hold `min_capacity` entries without rehashing
    pub fn new(min_capacity: usize) -> Self {
        let mut table = Self::default();
        if let Err(e) = table.reserve(min_capacity) {
            warn!("starting without buckets: {}", e);
        }
        table
    }
}

impl<V, H: WordHasher> HashTable<SKeyType, V> for StrHashTable<V, H> {
    fn insert(&mut self, key: SKeyType, value: V) -> Option<V> {
        match self.find(&key) {
            Some((bucket_i, slot_i)) => Some(mem::replace(
                &mut self.buckets[bucket_i][slot_i].value,
                value,
            )),
            None => {
                self.push_new(key, value);
                None
            }
        }
    }

    fn get(&self, key: impl Borrow<str>) -> Option<&V> {
        self.find(key.borrow())
            .map(|(bucket_i, slot_i)| &self.buckets[bucket_i][slot_i].value)
    }

    fn get_mut(&mut self, key: impl Borrow<str>) -> Option<&mut V> {
        self.find(key.borrow())
            .map(|(bucket_i, slot_i)| &mut self.buckets[bucket_i][slot_i].value)
    }

    fn len(&self) -> usize {
        self.size
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Chains are unordered, so the last entry fills the gap
    fn remove(&mut self, key: impl Borrow<str>) -> Option<V> {
        let (bucket_i, slot_i) = self.find(key.borrow())?;
        self.size -= 1;
        Some(self.buckets[bucket_i].swap_remove(slot_i).value)
    }
}

/// Smallest prime >= n, never below 2. None when it does not fit in a usize
fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

fn is_prime(n: usize) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}
