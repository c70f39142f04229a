//! Block instances and the shelf-owned block arena.
//!
//! Columns and slots refer to blocks by [`BlockId`], a stable arena index,
//! rather than by object reference. The arena is the single owner of block
//! state; everything else is a non-owning back-reference.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a block instance within a shelf's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockId(usize);

impl BlockId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A placed block instance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    /// Catalog variant name.
    pub variant: String,
    /// Index of the owning column within the shelf.
    pub column: usize,
    /// Base slot index the block was placed at.
    pub z_index: usize,
    /// Fitness score the block was inserted with, used for priority
    /// eviction when a quota shrinks.
    pub score: f64,
}

impl Block {
    /// Creates a block instance.
    pub fn new(variant: impl Into<String>, column: usize, z_index: usize, score: f64) -> Self {
        Self {
            variant: variant.into(),
            column,
            z_index,
            score,
        }
    }
}

/// Arena of block instances with stable indices and id reuse.
#[derive(Debug, Clone, Default)]
pub struct BlockArena {
    entries: Vec<Option<Block>>,
    free: Vec<usize>,
}

impl BlockArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a block and returns its id.
    pub fn insert(&mut self, block: Block) -> BlockId {
        match self.free.pop() {
            Some(i) => {
                self.entries[i] = Some(block);
                BlockId(i)
            }
            None => {
                self.entries.push(Some(block));
                BlockId(self.entries.len() - 1)
            }
        }
    }

    /// Removes a block, returning it if it was present.
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let slot = self.entries.get_mut(id.0)?;
        let block = slot.take()?;
        self.free.push(id.0);
        Some(block)
    }

    /// Returns the block for an id.
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.entries.get(id.0)?.as_ref()
    }

    /// Returns the block for an id, mutably.
    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.entries.get_mut(id.0)?.as_mut()
    }

    /// Iterates live blocks with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, b)| Some((BlockId(i), b.as_ref()?)))
    }

    /// Iterates live blocks mutably with their ids.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BlockId, &mut Block)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(i, b)| Some((BlockId(i), b.as_mut()?)))
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    /// Returns true if the arena holds no live blocks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
