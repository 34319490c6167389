//! Text resolution over the block graph.
//!
//! A block's text is its literal `Text` if it has one, otherwise the
//! space-joined text of its `CHILD` blocks. The walk is bounded by a depth
//! limit, by the set of ids on the current path and by a budget of visited
//! blocks, so malformed, cyclic or heavily shared graphs still terminate
//! quickly.

use std::collections::HashSet;

use crate::error::BlockFault;
use crate::model::{BlockCollection, Diagnostic};

use super::options::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS};

/// Resolve the flattened text of a block.
///
/// Never fails: unknown ids, cycles and overly deep graphs resolve to empty
/// text for the affected subtree.
///
/// # Example
///
/// ```
/// use untextract::model::{Block, BlockCollection};
/// use untextract::resolve_text;
///
/// let blocks = BlockCollection::from_blocks(vec![
///     Block::cell("c1", 1, 1).with_children(["w1", "w2"]),
///     Block::word("w1", "Total"),
///     Block::word("w2", "due"),
/// ]);
/// assert_eq!(resolve_text("c1", &blocks), "Total due");
/// assert_eq!(resolve_text("nope", &blocks), "");
/// ```
pub fn resolve_text(block_id: &str, blocks: &BlockCollection) -> String {
    TextResolver::new(blocks).resolve(block_id)
}

/// Resolves block text against one block collection.
#[derive(Debug, Clone, Copy)]
pub struct TextResolver<'a> {
    blocks: &'a BlockCollection,
    max_depth: usize,
    max_visits: usize,
}

/// State of one resolution call.
struct Walk<'a> {
    path: HashSet<&'a str>,
    visits: usize,
}

impl<'a> TextResolver<'a> {
    /// Create a resolver with the default depth limit.
    pub fn new(blocks: &'a BlockCollection) -> Self {
        Self {
            blocks,
            max_depth: DEFAULT_MAX_DEPTH,
            max_visits: DEFAULT_MAX_VISITS,
        }
    }

    /// Set the depth limit and return self.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the visit budget and return self.
    ///
    /// Shared children are visited once per parent, so a densely shared
    /// graph can grow exponentially with depth; the budget caps that work.
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Resolve text, discarding any faults.
    pub fn resolve(&self, block_id: &str) -> String {
        let mut diagnostics = Vec::new();
        self.resolve_into(block_id, &mut diagnostics)
    }

    /// Resolve text, appending absorbed faults to `diagnostics`.
    pub fn resolve_into(&self, block_id: &str, diagnostics: &mut Vec<Diagnostic>) -> String {
        let mut walk = Walk {
            path: HashSet::new(),
            visits: 0,
        };
        self.resolve_at(block_id, 0, &mut walk, diagnostics)
    }

    fn resolve_at(
        &self,
        block_id: &str,
        depth: usize,
        walk: &mut Walk<'a>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> String {
        walk.visits += 1;
        if walk.visits > self.max_visits {
            // Report once per call; the rest of the walk unwinds silently.
            if walk.visits == self.max_visits.saturating_add(1) {
                diagnostics.push(Diagnostic::new(
                    block_id,
                    BlockFault::ResolutionBudgetExceeded {
                        limit: self.max_visits,
                    },
                ));
            }
            return String::new();
        }

        let Some(block) = self.blocks.get(block_id) else {
            diagnostics.push(Diagnostic::new(block_id, BlockFault::MissingReference));
            return String::new();
        };

        if let Some(ref text) = block.text {
            return text.clone();
        }
        if !block.has_children() {
            return String::new();
        }

        if depth >= self.max_depth {
            diagnostics.push(Diagnostic::new(
                block_id,
                BlockFault::ResolutionDepthExceeded {
                    limit: self.max_depth,
                },
            ));
            return String::new();
        }
        if !walk.path.insert(block.id.as_str()) {
            diagnostics.push(Diagnostic::new(block_id, BlockFault::CyclicReference));
            return String::new();
        }

        let parts: Vec<String> = block
            .child_ids()
            .map(|child| self.resolve_at(child, depth + 1, walk, diagnostics))
            .filter(|text| !text.is_empty())
            .collect();

        walk.path.remove(block.id.as_str());
        parts.join(" ")
    }
}
