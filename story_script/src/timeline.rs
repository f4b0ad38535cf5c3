//! Replace-in-array edits for the authoring UI.
//!
//! The timeline is a flat `Vec<Block>`; nesting is positional, so any block can
//! be moved anywhere. Every helper returns a new vector and leaves the input
//! untouched. Unknown ids return an unchanged copy.

use story_data::{Block, BlockId, LineBlock};

use crate::resolve::set_gender_universal;

fn position(blocks: &[Block], id: BlockId) -> Option<usize> {
    blocks.iter().position(|b| b.id == id)
}

/// Insert `block` at `index`, clamped to the end of the timeline.
pub fn insert_block(blocks: &[Block], index: usize, block: Block) -> Vec<Block> {
    let mut out = blocks.to_vec();
    out.insert(index.min(out.len()), block);
    out
}

/// Replace the block that shares `updated.id`.
pub fn replace_block(blocks: &[Block], updated: Block) -> Vec<Block> {
    let mut out = blocks.to_vec();
    if let Some(idx) = position(&out, updated.id) {
        out[idx] = updated;
    }
    out
}

/// Move a block so it ends up at index `to` (clamped).
pub fn move_block(blocks: &[Block], id: BlockId, to: usize) -> Vec<Block> {
    let mut out = blocks.to_vec();
    if let Some(from) = position(&out, id) {
        let block = out.remove(from);
        out.insert(to.min(out.len()), block);
    }
    out
}

pub fn remove_block(blocks: &[Block], id: BlockId) -> Vec<Block> {
    blocks.iter().filter(|b| b.id != id).cloned().collect()
}

/// Apply `edit` to the line with `id`. Non-line blocks are left alone.
pub fn update_line(blocks: &[Block], id: BlockId, edit: impl FnOnce(&mut LineBlock)) -> Vec<Block> {
    let mut out = blocks.to_vec();
    if let Some(line) = out.iter_mut().find(|b| b.id == id).and_then(Block::as_line_mut) {
        edit(line);
    }
    out
}

pub fn toggle_partner_specific(blocks: &[Block], id: BlockId) -> Vec<Block> {
    update_line(blocks, id, |line| line.is_partner_specific = !line.is_partner_specific)
}

/// Flip gender-universal; switching it on collapses the girl slots onto the boy slots.
pub fn toggle_gender_universal(blocks: &[Block], id: BlockId) -> Vec<Block> {
    update_line(blocks, id, |line| {
        let on = !line.is_gender_universal;
        set_gender_universal(line, on);
    })
}
