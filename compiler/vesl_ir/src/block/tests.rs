use pretty_assertions::assert_eq;

use crate::expr::Expr;
use crate::instr::SpecialStatement;

use super::*;

#[test]
fn tree_starts_with_main_block() {
    let tree = IrTree::new();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().id(), BlockId::ROOT);
    assert_eq!(tree.root().kind(), &BlockKind::Main);
    assert_eq!(tree.root().parent(), None);
}

#[test]
fn new_block_records_parent() {
    let mut tree = IrTree::new();
    let a = tree.new_block(BlockId::ROOT, BlockKind::Plain);
    let b = tree.new_block(a, BlockKind::Plain);
    assert_eq!(tree.parent(a), Some(BlockId::ROOT));
    assert_eq!(tree.parent(b), Some(a));
}

#[test]
fn push_keeps_call_order() {
    let mut tree = IrTree::new();
    let first = tree.push_instruction(BlockId::ROOT, Instruction::Statement(Expr::int(1)));
    let second = tree.push_instruction(BlockId::ROOT, Instruction::Statement(Expr::int(1)));
    let third = tree.push_instruction(
        BlockId::ROOT,
        Instruction::Special(SpecialStatement::Discard),
    );
    assert_eq!(first.index, 0);
    assert_eq!(second.index, 1);
    assert_eq!(third.index, 2);
    // Identical instructions are kept, not deduplicated.
    assert_eq!(tree.root().len(), 3);
    assert_eq!(
        tree.instruction(third),
        Some(&Instruction::Special(SpecialStatement::Discard))
    );
}

#[test]
fn enclosing_return_type_walks_parents() {
    let mut tree = IrTree::new();
    let body = tree.new_block(
        BlockId::ROOT,
        BlockKind::Return {
            return_type: TypeDesc::FLOAT,
        },
    );
    let inner = tree.new_block(body, BlockKind::Plain);
    assert_eq!(tree.enclosing_return_type(inner), Some(&TypeDesc::FLOAT));
    assert_eq!(tree.enclosing_return_type(BlockId::ROOT), None);
}

#[test]
fn instruction_mut_edits_in_place() {
    let mut tree = IrTree::new();
    let at = tree.push_instruction(BlockId::ROOT, Instruction::Statement(Expr::int(1)));
    if let Some(Instruction::Statement(expr)) = tree.instruction_mut(at) {
        *expr = Expr::int(2);
    }
    assert_eq!(
        tree.instruction(at),
        Some(&Instruction::Statement(Expr::int(2)))
    );
    assert_eq!(tree.instruction(InstrRef::new(BlockId::new(9), 0)), None);
}
