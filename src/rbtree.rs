//! Module provide ordered index implemented by [RbTree] type.
//!
//! RbTree is a classic [red-black tree][wiki-rb], with parent links and a
//! single shared sentinel standing in for every missing child and parent.
//! Insertion and deletion locate their position by plain BST descent, make
//! a local edit, then walk upward with a repair loop doing O(1) work per
//! level.
//!
//! - Keys are `i64` and unique.
//! - Values are owned by the caller, moved in on insert and handed back on
//!   remove or teardown.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! [wiki-rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{cmp::Ordering, fmt};

use crate::{
    iter::{Iter, Order, Walk},
    node::{Arena, Color, Dir, Node, Ref, SENTINEL},
    Error, Result,
};

/// RbTree manage a single instance of in-memory ordered index using
/// [red-black][rb] tree.
///
/// [rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<V> {
    arena: Arena<V>,
    root: Ref,
    n_count: usize, // number of entries in the tree.
}

/// Statistics returned by [RbTree::validate].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of entries in the tree.
    pub entries: usize,
    /// Number of black nodes from root to any sentinel, root included.
    pub black_height: usize,
    /// Length of the longest root-to-leaf path, in nodes.
    pub max_depth: usize,
}

impl<V> Default for RbTree<V> {
    fn default() -> RbTree<V> {
        RbTree::new()
    }
}

impl<V> RbTree<V> {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree<V> {
        RbTree {
            arena: Arena::new(),
            root: SENTINEL,
            n_count: Default::default(),
        }
    }
}

/// Maintenance API.
impl<V> RbTree<V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Same as [RbTree::len].
    #[inline]
    pub fn size(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Remove every entry, dropping the values.
    pub fn clear(&mut self) {
        let n = self.n_count;
        self.arena = Arena::new();
        self.root = SENTINEL;
        self.n_count = 0;
        debug!(target: "rbtree", "cleared {} entries", n);
    }

    /// Tear down the tree, handing each value to `release` exactly once.
    ///
    /// Entries are released in post-order, children before their parent.
    pub fn destroy_with<F>(mut self, mut release: F)
    where
        F: FnMut(i64, V),
    {
        let order: Vec<Ref> = Walk::new(&self.arena, self.root, Order::Post).collect();
        let n = order.len();
        for r in order.into_iter() {
            let node = self.arena.remove(r);
            if let Some(value) = node.value {
                release(node.key, value)
            }
        }
        self.root = SENTINEL;
        self.n_count = 0;
        debug!(target: "rbtree", "destroyed {} entries", n);
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root and sentinel are black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in strictly ascending order.
    /// * Every child points back to its parent.
    /// * Number of reachable entries match [RbTree::len].
    ///
    /// Additionally return statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats> {
        if !self.arena[SENTINEL].is_black() {
            return err_at!(Fatal, msg: "red sentinel");
        }
        if !self.arena[self.root].is_black() {
            return err_at!(Fatal, msg: "red root {}", self.arena[self.root].key);
        }
        if !self.root.is_sentinel() && !self.arena[self.root].parent.is_sentinel() {
            return err_at!(Fatal, msg: "root {} has a parent", self.arena[self.root].key);
        }

        let mut stats = Stats::default();
        let black_height = self.validate_tree(self.root, None, None, 1, &mut stats)?;
        stats.black_height = black_height;

        if stats.entries != self.n_count {
            err_at!(Fatal, msg: "n_count {} entries {}", self.n_count, stats.entries)?;
        }
        if self.arena.count() != self.n_count {
            err_at!(Fatal, msg: "n_count {} arena {}", self.n_count, self.arena.count())?;
        }

        Ok(stats)
    }

    fn validate_tree(
        &self,
        r: Ref,
        low: Option<i64>,
        high: Option<i64>,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize> {
        if r.is_sentinel() {
            return Ok(0);
        }

        let node = &self.arena[r];
        stats.entries += 1;
        stats.max_depth = usize::max(stats.max_depth, depth);

        match (low, high) {
            (Some(low), _) if node.key <= low => {
                err_at!(Fatal, msg: "sort key:{} low:{}", node.key, low)?;
            }
            (_, Some(high)) if node.key >= high => {
                err_at!(Fatal, msg: "sort key:{} high:{}", node.key, high)?;
            }
            _ => (),
        }

        for child in node.children.iter().copied() {
            if child.is_sentinel() {
                continue;
            }
            let cnode = &self.arena[child];
            if cnode.parent != r {
                err_at!(Fatal, msg: "parent link key:{} parent:{}", cnode.key, node.key)?;
            }
            if node.is_red() && cnode.is_red() {
                err_at!(Fatal, msg: "consecutive reds {} {}", node.key, cnode.key)?;
            }
        }

        let (left, right) = (node.left(), node.right());
        let lblacks = self.validate_tree(left, low, Some(node.key), depth + 1, stats)?;
        let rblacks = self.validate_tree(right, Some(node.key), high, depth + 1, stats)?;
        if lblacks != rblacks {
            err_at!(Fatal, msg: "unbalanced blacks {} {} at {}", lblacks, rblacks, node.key)?;
        }

        Ok(lblacks + if node.is_black() { 1 } else { 0 })
    }
}

/// Lookup API.
impl<V> RbTree<V> {
    /// Get the value for key.
    pub fn search(&self, key: i64) -> Option<&V> {
        self.arena[self.find(key)].value.as_ref()
    }

    /// Get a mutable reference to the value for key.
    pub fn search_mut(&mut self, key: i64) -> Option<&mut V> {
        let r = self.find(key);
        self.arena.get_mut(r)?.value.as_mut()
    }

    /// Check whether key is present in this index.
    pub fn contains(&self, key: i64) -> bool {
        !self.find(key).is_sentinel()
    }

    /// Same as [RbTree::search], failing with `KeyNotFound`.
    pub fn get(&self, key: i64) -> Result<&V> {
        match self.search(key) {
            Some(value) => Ok(value),
            None => err_at!(KeyNotFound, msg: "key {}", key),
        }
    }

    /// Return the entry with smallest key.
    pub fn first(&self) -> Option<(i64, &V)> {
        self.entry(self.minimum(self.root))
    }

    /// Return the entry with largest key.
    pub fn last(&self) -> Option<(i64, &V)> {
        self.entry(self.maximum(self.root))
    }

    fn find(&self, key: i64) -> Ref {
        let mut cur = self.root;
        while !cur.is_sentinel() {
            let node = &self.arena[cur];
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return cur,
            };
        }
        SENTINEL
    }
}

/// Structural API, for callers building their own navigation on top of
/// node handles. Handles for removed entries must not be reused.
impl<V> RbTree<V> {
    /// Return the root handle, sentinel when empty.
    #[inline]
    pub fn root(&self) -> Ref {
        self.root
    }

    /// Return the node with smallest key in the subtree under `node`,
    /// sentinel if `node` is the sentinel or not a live entry.
    pub fn minimum(&self, node: Ref) -> Ref {
        match self.arena.get(node) {
            Some(_) => self.edge(node, Dir::Left),
            None => SENTINEL,
        }
    }

    /// Return the node with largest key in the subtree under `node`,
    /// sentinel if `node` is the sentinel or not a live entry.
    pub fn maximum(&self, node: Ref) -> Ref {
        match self.arena.get(node) {
            Some(_) => self.edge(node, Dir::Right),
            None => SENTINEL,
        }
    }

    /// Return the left child of `node`.
    pub fn left(&self, node: Ref) -> Ref {
        self.arena.get(node).map_or(SENTINEL, Node::left)
    }

    /// Return the right child of `node`.
    pub fn right(&self, node: Ref) -> Ref {
        self.arena.get(node).map_or(SENTINEL, Node::right)
    }

    /// Return the parent of `node`, sentinel for the root.
    pub fn parent(&self, node: Ref) -> Ref {
        self.arena.get(node).map_or(SENTINEL, |n| n.parent)
    }

    /// Return the color of `node`. Sentinel is always black.
    pub fn color(&self, node: Ref) -> Color {
        self.arena.get(node).map_or(Color::Black, |n| n.color)
    }

    /// Return the `(key, value)` entry held by `node`.
    pub fn entry(&self, node: Ref) -> Option<(i64, &V)> {
        self.arena.get(node)?.entry()
    }

    // descend from `node` along `dir` till the last true node.
    fn edge(&self, mut node: Ref, dir: Dir) -> Ref {
        let mut next = self.arena[node].child(dir);
        while !next.is_sentinel() {
            node = next;
            next = self.arena[node].child(dir);
        }
        node
    }
}

/// Walk API.
impl<V> RbTree<V> {
    /// Return an iterator over all entries in ascending key order.
    pub fn iter(&self) -> Iter<V> {
        self.walk(Order::In)
    }

    /// Same as [RbTree::iter].
    pub fn inorder(&self) -> Iter<V> {
        self.walk(Order::In)
    }

    /// Return an iterator visiting each node before its children.
    pub fn preorder(&self) -> Iter<V> {
        self.walk(Order::Pre)
    }

    /// Return an iterator visiting each node after its children.
    pub fn postorder(&self) -> Iter<V> {
        self.walk(Order::Post)
    }

    /// Return an iterator over all entries in the given order.
    pub fn walk(&self, order: Order) -> Iter<V> {
        Iter::new(&self.arena, self.root, order)
    }
}

impl<'a, V> IntoIterator for &'a RbTree<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> fmt::Debug for RbTree<V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Write API.
impl<V> RbTree<V> {
    /// Insert a new entry. Return false, without touching the tree, if
    /// key is already present; the rejected value is dropped.
    pub fn insert(&mut self, key: i64, value: V) -> bool {
        self.try_insert(key, value).is_ok()
    }

    /// Insert a new entry. If key is already present, leave the tree
    /// untouched and hand the value back.
    pub fn try_insert(&mut self, key: i64, value: V) -> std::result::Result<(), V> {
        let mut parent = SENTINEL;
        let mut cur = self.root;
        let mut dir = Dir::Left;
        while !cur.is_sentinel() {
            let node = &self.arena[cur];
            dir = match key.cmp(&node.key) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return Err(value),
            };
            parent = cur;
            cur = node.child(dir);
        }

        let z = self.arena.insert(Node::new(key, value, parent));
        if parent.is_sentinel() {
            self.root = z;
        } else {
            self.arena[parent].set_child(dir, z);
        }

        self.insert_fixup(z);
        self.n_count += 1;
        Ok(())
    }

    /// Same as [RbTree::insert], failing with `DuplicateKey`.
    pub fn put(&mut self, key: i64, value: V) -> Result<()> {
        match self.try_insert(key, value) {
            Ok(()) => Ok(()),
            Err(_) => err_at!(DuplicateKey, msg: "key {}", key),
        }
    }

    /// Delete key from this instance. Return false, without touching the
    /// tree, if key is not present. The removed value is dropped.
    pub fn delete(&mut self, key: i64) -> bool {
        self.remove(key).is_some()
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then remove is a no-op.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let z = self.find(key);
        if z.is_sentinel() {
            return None;
        }

        let (zl, zr) = (self.arena[z].left(), self.arena[z].right());
        let mut removed_color = self.arena[z].color;
        let x = if zl.is_sentinel() {
            self.transplant(z, zr);
            zr
        } else if zr.is_sentinel() {
            self.transplant(z, zl);
            zl
        } else {
            // successor takes over z's slot and color.
            let y = self.edge(zr, Dir::Left);
            removed_color = self.arena[y].color;
            let x = self.arena[y].right();
            if self.arena[y].parent == z {
                self.arena[x].parent = y;
            } else {
                self.transplant(y, x);
                self.arena[y].set_child(Dir::Right, zr);
                self.arena[zr].parent = y;
            }
            self.transplant(z, y);
            self.arena[y].set_child(Dir::Left, zl);
            self.arena[zl].parent = y;
            self.arena[y].color = self.arena[z].color;
            x
        };

        let node = self.arena.remove(z);
        self.n_count -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }
        self.reset_sentinel();

        node.value
    }

    /// Same as [RbTree::remove], failing with `KeyNotFound`.
    pub fn take(&mut self, key: i64) -> Result<V> {
        match self.remove(key) {
            Some(value) => Ok(value),
            None => err_at!(KeyNotFound, msg: "key {}", key),
        }
    }
}

//--------- structural primitives ----------------

impl<V> RbTree<V> {
    #[inline]
    fn which(&self, parent: Ref, child: Ref) -> Dir {
        match self.arena[parent].left() == child {
            true => Dir::Left,
            false => Dir::Right,
        }
    }

    // rotate_left when dir is Left, rotate_right when dir is Right.
    //
    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             a   y         ==>         x   c
    //                / \                   / \
    //               b   c                 a   b
    //
    fn rotate(&mut self, x: Ref, dir: Dir) {
        let y = self.arena[x].child(!dir);
        let b = self.arena[y].child(dir);

        self.arena[x].set_child(!dir, b);
        if !b.is_sentinel() {
            self.arena[b].parent = x;
        }

        self.transplant(x, y);

        self.arena[y].set_child(dir, x);
        self.arena[x].parent = y;
    }

    // Replace u's attachment point in its parent, or the root slot, with
    // v. Children of u and v are left as they are.
    fn transplant(&mut self, u: Ref, v: Ref) {
        let parent = self.arena[u].parent;
        if parent.is_sentinel() {
            self.root = v;
        } else {
            let dir = self.which(parent, u);
            self.arena[parent].set_child(dir, v);
        }
        self.arena[v].parent = parent;
    }

    // Deletion may leave sentinel's parent pointing at a live node.
    fn reset_sentinel(&mut self) {
        self.arena[SENTINEL].parent = SENTINEL;
    }

    // z is red and only the red-red rule may be broken, at z.
    fn insert_fixup(&mut self, mut z: Ref) {
        let mut levels = 0_usize;

        while self.arena[self.arena[z].parent].is_red() {
            // red parent is never the root, grandparent is a true node.
            let p = self.arena[z].parent;
            let g = self.arena[p].parent;
            let side = self.which(g, p);
            let uncle = self.arena[g].child(!side);

            if self.arena[uncle].is_red() {
                self.arena[p].set_black();
                self.arena[uncle].set_black();
                self.arena[g].set_red();
                z = g;
                levels += 1;
                continue;
            }

            if z == self.arena[p].child(!side) {
                // inner child, turn it into an outer child.
                z = p;
                self.rotate(z, side);
            }

            let p = self.arena[z].parent;
            let g = self.arena[p].parent;
            self.arena[p].set_black();
            self.arena[g].set_red();
            self.rotate(g, !side);
        }

        let root = self.root;
        self.arena[root].set_black();
        trace!(target: "rbtree", "insert_fixup recolored {} levels", levels);
    }

    // x carries an extra black on its path to the root.
    fn delete_fixup(&mut self, mut x: Ref) {
        let mut levels = 0_usize;

        while x != self.root && self.arena[x].is_black() {
            let p = self.arena[x].parent;
            let side = self.which(p, x);
            let mut w = self.arena[p].child(!side);

            if self.arena[w].is_red() {
                self.arena[w].set_black();
                self.arena[p].set_red();
                self.rotate(p, side);
                w = self.arena[p].child(!side);
            }

            let near = self.arena[w].child(side);
            let far = self.arena[w].child(!side);
            if self.arena[near].is_black() && self.arena[far].is_black() {
                self.arena[w].set_red();
                x = p;
                levels += 1;
                continue;
            }

            if self.arena[far].is_black() {
                self.arena[near].set_black();
                self.arena[w].set_red();
                self.rotate(w, !side);
                w = self.arena[p].child(!side);
            }

            let far = self.arena[w].child(!side);
            self.arena[w].color = self.arena[p].color;
            self.arena[p].set_black();
            self.arena[far].set_black();
            self.rotate(p, side);
            x = self.root;
        }

        self.arena[x].set_black();
        trace!(target: "rbtree", "delete_fixup moved deficiency {} levels", levels);
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
