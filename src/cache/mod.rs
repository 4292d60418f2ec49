//! Set-associative in-memory cache
//!
//! Memory is laid out as `number_of_sets` sets of `2^index_bits` blocks. A key
//! maps to one block index (see [`key`]); that index may be occupied in every
//! set, so a lookup scans the sets at one index only. The cache does not write
//! through: callers keep it up to date.
//!
//! A write to a full index evicts the block chosen by the cache's
//! [`ReplacementPolicy`].

pub mod key;
pub mod policy;

pub use key::{block_index, KeyBytes};
pub use policy::{BlockUsage, Lru, LruPosition, Mru, MruPosition, ReplacementPolicy};

use crate::error::{RaceAverageError, Result};
use tracing::debug;

/// Largest supported `index_bits`
pub const MAX_INDEX_BITS: u32 = 16;

/// Shape of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// How many blocks may share one index
    pub number_of_sets: usize,
    /// log2 of the number of blocks per set; 0 gives a single index
    pub index_bits: u32,
}

impl CacheOptions {
    pub fn new(number_of_sets: usize, index_bits: u32) -> Self {
        Self {
            number_of_sets,
            index_bits,
        }
    }

    /// Number of blocks in each set
    pub fn blocks_per_set(&self) -> usize {
        1 << self.index_bits
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.number_of_sets == 0 {
            return Err(RaceAverageError::InvalidCacheOptions {
                message: "number_of_sets must be greater than 0".to_string(),
            }
            .into());
        }

        if self.index_bits > MAX_INDEX_BITS {
            return Err(RaceAverageError::InvalidCacheOptions {
                message: format!("index_bits must be at most {}", MAX_INDEX_BITS),
            }
            .into());
        }

        Ok(())
    }
}

/// A stored key/value pair with its usage bookkeeping
#[derive(Debug, Clone)]
pub struct Block<K, V> {
    key: K,
    value: V,
    usage: BlockUsage,
}

impl<K, V> Block<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn usage(&self) -> &BlockUsage {
        &self.usage
    }
}

/// What a write did to the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<K, V> {
    /// The key went into an empty block
    Inserted,
    /// The key was already cached and its value was replaced
    Updated,
    /// The key replaced another key's block in `set`
    Evicted { set: usize, key: K, value: V },
}

/// N-way set-associative cache with a pluggable replacement policy
#[derive(Debug)]
pub struct Cache<K, V> {
    options: CacheOptions,
    /// `sets[set][index]`
    sets: Vec<Vec<Option<Block<K, V>>>>,
    policy: Box<dyn ReplacementPolicy>,
    clock: u64,
}

impl<K: KeyBytes + PartialEq, V> Cache<K, V> {
    /// Create an empty cache that evicts the most recently read block
    pub fn new(options: CacheOptions) -> Result<Self> {
        Self::with_policy(options, Mru)
    }

    /// Create an empty cache with the given replacement policy
    pub fn with_policy(
        options: CacheOptions,
        policy: impl ReplacementPolicy + 'static,
    ) -> Result<Self> {
        options.validate()?;

        let sets = (0..options.number_of_sets)
            .map(|_| (0..options.blocks_per_set()).map(|_| None).collect())
            .collect();

        Ok(Self {
            options,
            sets,
            policy: Box::new(policy),
            clock: 0,
        })
    }

    pub fn options(&self) -> CacheOptions {
        self.options
    }

    /// Swap the replacement policy; cached blocks are kept
    pub fn set_policy(&mut self, policy: impl ReplacementPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    /// Total number of blocks
    pub fn capacity(&self) -> usize {
        self.options.number_of_sets * self.options.blocks_per_set()
    }

    /// Number of occupied blocks
    pub fn len(&self) -> usize {
        self.sets.iter().flatten().filter(|block| block.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block index `key` maps to
    pub fn index_of(&self, key: &K) -> Result<usize> {
        block_index(key, self.options.index_bits)
    }

    /// Cached block for `key` without touching its usage
    pub fn peek(&self, key: &K) -> Result<Option<&Block<K, V>>> {
        let index = self.index_of(key)?;
        Ok(self
            .find_set(index, key)
            .and_then(|set| self.sets[set][index].as_ref()))
    }

    /// Look up `key`, recording the read on a hit
    pub fn read(&mut self, key: &K) -> Result<Option<&V>> {
        let index = self.index_of(key)?;
        let Some(set) = self.find_set(index, key) else {
            return Ok(None);
        };

        let position = self.tick();
        Ok(self.sets[set][index].as_mut().map(|block| {
            block.usage.record_read(position);
            &block.value
        }))
    }

    /// Store `value` under `key`.
    ///
    /// An existing entry for `key` is updated in place. Otherwise the first
    /// empty set at the key's index is used, and when there is none the
    /// replacement policy picks a block to evict.
    pub fn write(&mut self, key: K, value: V) -> Result<WriteOutcome<K, V>> {
        let index = self.index_of(&key)?;
        let position = self.tick();

        if let Some(set) = self.find_set(index, &key) {
            if let Some(block) = self.sets[set][index].as_mut() {
                block.value = value;
                block.usage.record_write(position);
            }
            return Ok(WriteOutcome::Updated);
        }

        let block = Block {
            key,
            value,
            usage: BlockUsage::new(position),
        };

        if let Some(set) = self.sets.iter().position(|set| set[index].is_none()) {
            self.sets[set][index] = Some(block);
            return Ok(WriteOutcome::Inserted);
        }

        let candidates: Vec<&BlockUsage> = self
            .sets
            .iter()
            .filter_map(|set| set[index].as_ref().map(|block| &block.usage))
            .collect();
        let set = self
            .policy
            .choose_set(&candidates)
            .min(self.options.number_of_sets - 1);

        debug!(index, set, policy = ?self.policy, "Evicting cache block");

        Ok(match self.sets[set][index].replace(block) {
            Some(evicted) => WriteOutcome::Evicted {
                set,
                key: evicted.key,
                value: evicted.value,
            },
            None => WriteOutcome::Inserted,
        })
    }

    fn find_set(&self, index: usize, key: &K) -> Option<usize> {
        self.sets.iter().position(|set| {
            set[index]
                .as_ref()
                .is_some_and(|block| block.key == *key)
        })
    }

    fn tick(&mut self) -> u64 {
        let position = self.clock;
        self.clock += 1;
        position
    }
}
