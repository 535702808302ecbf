//! Id newtypes for the shader IR.
//!
//! Variables and blocks are addressed by small integer ids instead of
//! pointers. A [`VarId`] is the only back-edge an expression may hold: it is
//! a lookup key into the variable registry, never an owning reference.

use std::fmt;

/// Variable ID within one shader build.
///
/// Allocated sequentially from 0 by the variable registry. Two builds that
/// construct values in the same order hand out the same ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VarId(u32);

impl VarId {
    /// Create a new variable ID from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// Block ID within an [`IrTree`](crate::IrTree).
///
/// Block 0 is always the main (top-level) block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// The main block every tree starts with.
    pub const ROOT: BlockId = BlockId(0);

    /// Create a new block ID from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is the main block.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "BlockId::ROOT")
        } else {
            write!(f, "BlockId({})", self.0)
        }
    }
}

/// Address of one instruction: the owning block plus its position.
///
/// Positions are stable because blocks only ever append.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstrRef {
    pub block: BlockId,
    pub index: usize,
}

impl InstrRef {
    #[inline]
    pub const fn new(block: BlockId, index: usize) -> Self {
        Self { block, index }
    }
}
