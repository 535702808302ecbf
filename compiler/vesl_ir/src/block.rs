//! Blocks and the block arena.
//!
//! A [`Block`] is one lexical scope: an ordered list of instructions plus a
//! non-owning link to its parent. All blocks of a build live in one
//! [`IrTree`], addressed by [`BlockId`]; block 0 is the main block.

use crate::instr::Instruction;
use crate::types::TypeDesc;
use crate::{BlockId, InstrRef};

/// What a block is used for.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Top level of the shader.
    Main,
    /// Body of a branch, loop or case.
    Plain,
    /// Function body; knows the declared return type.
    Return { return_type: TypeDesc },
    /// Recorded for-loop header.
    ForArgs,
    /// Function parameter list of one overload.
    FuncArgs,
}

/// One lexical scope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    id: BlockId,
    parent: Option<BlockId>,
    kind: BlockKind,
    instructions: Vec<Instruction>,
}

impl Block {
    fn new(id: BlockId, parent: Option<BlockId>, kind: BlockKind) -> Self {
        Self {
            id,
            parent,
            kind,
            instructions: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Parent block. `None` only for the main block.
    #[inline]
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    #[inline]
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Arena of all blocks in one shader build.
///
/// # Invariants
///
/// - Block 0 is the main block and has no parent.
/// - Every other block gets exactly one parent at creation; it is never
///   reassigned.
/// - Instructions are appended in call order and never reordered or
///   removed, so an [`InstrRef`] stays valid for the life of the tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IrTree {
    blocks: Vec<Block>,
}

impl Default for IrTree {
    fn default() -> Self {
        Self::new()
    }
}

impl IrTree {
    /// Create a tree holding only the main block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockId::ROOT, None, BlockKind::Main)],
        }
    }

    /// Allocate a new empty block under `parent`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "block counts never exceed u32"
    )]
    pub fn new_block(&mut self, parent: BlockId, kind: BlockKind) -> BlockId {
        debug_assert!(
            parent.index() < self.blocks.len(),
            "parent {parent:?} out of bounds (have {} blocks)",
            self.blocks.len(),
        );
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(Block::new(id, Some(parent), kind));
        id
    }

    /// Append an instruction to `block`.
    pub fn push_instruction(&mut self, block: BlockId, instr: Instruction) -> InstrRef {
        let target = &mut self.blocks[block.index()];
        target.instructions.push(instr);
        InstrRef::new(block, target.instructions.len() - 1)
    }

    /// Look up a block.
    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// Look up a block that is known to exist.
    #[inline]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    #[inline]
    pub fn root(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn instruction(&self, at: InstrRef) -> Option<&Instruction> {
        self.blocks.get(at.block.index())?.instructions.get(at.index)
    }

    pub fn instruction_mut(&mut self, at: InstrRef) -> Option<&mut Instruction> {
        self.blocks
            .get_mut(at.block.index())?
            .instructions
            .get_mut(at.index)
    }

    /// Parent of `id`, `None` for the main block.
    #[inline]
    pub fn parent(&self, id: BlockId) -> Option<BlockId> {
        self.blocks.get(id.index()).and_then(Block::parent)
    }

    /// Walk up from `id` to the nearest function body and return its
    /// declared return type.
    pub fn enclosing_return_type(&self, id: BlockId) -> Option<&TypeDesc> {
        let mut current = Some(id);
        while let Some(block_id) = current {
            let block = self.get(block_id)?;
            if let BlockKind::Return { return_type } = &block.kind {
                return Some(return_type);
            }
            current = block.parent;
        }
        None
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the main block exists from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests;
