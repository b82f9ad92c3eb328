//! Arena-backed binary allocation trie
//!
//! Tracks which leaves of a fixed-depth binary tree are allocated, one trie
//! level per address bit (most significant host bit first). Every node
//! caches whether its entire subtree is allocated, so the common case is a
//! single root-to-leaf walk; only when large contiguous ranges are exhausted
//! does a call degrade toward scanning for the one remaining free leaf.
//!
//! Nodes live in a `Vec` arena addressed by stable `u32` indices and are
//! materialized lazily as allocation paths are walked. Freeing a leaf never
//! removes nodes; teardown is arena teardown.
//!
//! INVARIANTS:
//! - A leaf is `Full` iff that exact address is allocated.
//! - An internal node is `Full` iff both children exist and are `Full`.
//! - Fullness is recomputed only along the mutated path, bottom-up.

use crate::domain::bit_array::BitArray;
use crate::error::PoolError;

/// Stable arena index of a trie node.
type NodeId = u32;

const ROOT: NodeId = 0;

/// Allocation state of a single node's subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    /// No children materialized, nothing allocated below.
    Empty,
    /// At least one child materialized, not fully allocated below.
    Partial,
    /// Leaf: this exact address is allocated. Internal: both subtrees full.
    Full,
}

/// Branch taken at one trie level. Left encodes bit 0, right bit 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    const fn from_bit(bit: bool) -> Self {
        if bit {
            Side::Right
        } else {
            Side::Left
        }
    }

    const fn bit(self) -> bool {
        matches!(self, Side::Right)
    }
}

#[derive(Clone, Copy, Debug)]
struct Node {
    children: [Option<NodeId>; 2],
    state: NodeState,
}

impl Node {
    const fn new() -> Self {
        Self {
            children: [None, None],
            state: NodeState::Empty,
        }
    }
}

/// Binary allocation trie over an address space of size `2^leaf_depth`.
///
/// Not safe for concurrent mutation; callers needing shared access must
/// serialize externally.
#[derive(Debug)]
pub struct AllocationTrie {
    arena: Vec<Node>,
    leaf_depth: u32,
    node_limit: Option<usize>,
}

impl AllocationTrie {
    /// Create a trie managing `2^leaf_depth` addressable slots.
    ///
    /// # Panics
    /// Panics if `leaf_depth` exceeds the path width of [`BitArray`].
    #[must_use]
    pub fn new(leaf_depth: u32) -> Self {
        assert!(leaf_depth <= BitArray::WIDTH);
        Self {
            arena: vec![Node::new()],
            leaf_depth,
            node_limit: None,
        }
    }

    /// Create a trie with an upper bound on materialized nodes.
    ///
    /// Walks that would need to materialize a node beyond the limit fail
    /// with [`PoolError::NodeBudgetExceeded`], leaving already-created
    /// nodes in place for retry.
    #[must_use]
    pub fn with_node_limit(leaf_depth: u32, node_limit: usize) -> Self {
        let mut trie = Self::new(leaf_depth);
        trie.node_limit = Some(node_limit);
        trie
    }

    /// Depth of every leaf; the number of address bits the trie resolves.
    #[must_use]
    pub fn leaf_depth(&self) -> u32 {
        self.leaf_depth
    }

    /// Total number of addressable slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        1usize << self.leaf_depth
    }

    /// Number of materialized nodes, root included.
    ///
    /// Instrumentation hook: teardown releases exactly this many nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Allocate a leaf, preferring the one addressed by the low
    /// `leaf_depth` bits of `preferred`.
    ///
    /// The exact preferred leaf is granted if free. Otherwise the walk
    /// falls back at the first full branch point along the requested path:
    /// the sibling subtree is searched for its first free leaf in
    /// leftmost-first order, and the path bit at that level is overwritten
    /// to reflect the branch actually taken. Returns the granted path.
    ///
    /// Note: the leftmost-first tie-break makes repeated requests for an
    /// occupied leaf grant consecutive ascending addresses. That ordering
    /// is an artifact of the traversal, not a documented guarantee.
    ///
    /// # Errors
    /// - [`PoolError::Exhausted`] if every leaf is allocated.
    /// - [`PoolError::NodeBudgetExceeded`] if the walk hits the node
    ///   budget; the trie stays consistent and the call can be retried.
    pub fn allocate(&mut self, preferred: BitArray) -> Result<BitArray, PoolError> {
        let mut path = preferred;
        self.allocate_at(ROOT, &mut path, self.leaf_depth)?;
        Ok(path)
    }

    /// Free the leaf addressed by the low `leaf_depth` bits of `path`.
    ///
    /// # Errors
    /// [`PoolError::DoubleFree`] if the path was never materialized or the
    /// leaf is not currently allocated. The trie is left untouched.
    pub fn free(&mut self, path: BitArray) -> Result<(), PoolError> {
        self.free_at(Some(ROOT), path, self.leaf_depth)
    }

    /// Cached state of the root: `Full` means the whole space is
    /// allocated, `Empty` that nothing below the root ever was.
    #[must_use]
    pub fn root_state(&self) -> NodeState {
        self.node(ROOT).state
    }

    /// Count allocated leaves by walking every materialized node.
    ///
    /// Never-visited subtrees contribute zero. O(materialized nodes),
    /// which is acceptable for sparse allocation patterns.
    #[must_use]
    pub fn count_full_leaves(&self) -> usize {
        self.count_at(ROOT)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.arena[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id as usize]
    }

    /// Return the child on `side`, materializing it on demand.
    fn child(&mut self, id: NodeId, side: Side) -> Result<NodeId, PoolError> {
        if let Some(child) = self.node(id).children[side as usize] {
            return Ok(child);
        }
        if let Some(limit) = self.node_limit {
            if self.arena.len() >= limit {
                return Err(PoolError::NodeBudgetExceeded { limit });
            }
        }
        let child = self.arena.len() as NodeId;
        self.arena.push(Node::new());
        self.node_mut(id).children[side as usize] = Some(child);
        Ok(child)
    }

    /// Recompute the cached state of one internal node from its children.
    fn refresh_state(&mut self, id: NodeId) {
        let children = self.node(id).children;
        let is_full =
            |child: Option<NodeId>| child.is_some_and(|c| self.node(c).state == NodeState::Full);

        let state = if is_full(children[0]) && is_full(children[1]) {
            NodeState::Full
        } else if children[0].is_some() || children[1].is_some() {
            NodeState::Partial
        } else {
            NodeState::Empty
        };
        self.node_mut(id).state = state;
    }

    fn allocate_at(
        &mut self,
        id: NodeId,
        path: &mut BitArray,
        height: u32,
    ) -> Result<(), PoolError> {
        if self.node(id).state == NodeState::Full {
            return Err(PoolError::Exhausted);
        }
        if height == 0 {
            self.node_mut(id).state = NodeState::Full;
            return Ok(());
        }

        let side = Side::from_bit(path.get(height - 1));
        let child = self.child(id, side)?;
        match self.allocate_at(child, path, height - 1) {
            Ok(()) => {
                self.refresh_state(id);
                Ok(())
            }
            Err(PoolError::Exhausted) => {
                // The requested subtree is full. A right branch has no
                // sibling to fall back on at this level; let the parent
                // retry with its own sibling.
                if side == Side::Right {
                    return Err(PoolError::Exhausted);
                }
                let sibling = self.child(id, Side::Right)?;
                self.force_allocate_at(sibling, path, height - 1)?;
                self.refresh_state(id);
                *path = path.with_bit_on(height - 1);
                Ok(())
            }
            Err(other) => {
                // A budget failure below may still have materialized
                // children; keep the cached state honest.
                self.refresh_state(id);
                Err(other)
            }
        }
    }

    /// Allocate the first free leaf below `id`, leftmost-first.
    fn force_allocate_at(
        &mut self,
        id: NodeId,
        path: &mut BitArray,
        height: u32,
    ) -> Result<(), PoolError> {
        if self.node(id).state == NodeState::Full {
            return Err(PoolError::Exhausted);
        }
        if height == 0 {
            self.node_mut(id).state = NodeState::Full;
            return Ok(());
        }

        for side in [Side::Left, Side::Right] {
            let child = self.child(id, side)?;
            match self.force_allocate_at(child, path, height - 1) {
                Ok(()) => {
                    self.refresh_state(id);
                    *path = path.with_bit(height - 1, side.bit());
                    return Ok(());
                }
                Err(PoolError::Exhausted) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(PoolError::Exhausted)
    }

    fn free_at(
        &mut self,
        id: Option<NodeId>,
        path: BitArray,
        height: u32,
    ) -> Result<(), PoolError> {
        let id = id.ok_or(PoolError::DoubleFree)?;
        if height == 0 {
            if self.node(id).state != NodeState::Full {
                return Err(PoolError::DoubleFree);
            }
            self.node_mut(id).state = NodeState::Empty;
            return Ok(());
        }

        let side = Side::from_bit(path.get(height - 1));
        let child = self.node(id).children[side as usize];
        let result = self.free_at(child, path, height - 1);
        self.refresh_state(id);
        result
    }

    fn count_at(&self, id: NodeId) -> usize {
        let node = self.node(id);
        match node.children {
            [None, None] => (node.state == NodeState::Full) as usize,
            [left, right] => {
                left.map_or(0, |c| self.count_at(c)) + right.map_or(0, |c| self.count_at(c))
            }
        }
    }
}
