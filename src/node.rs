use slab::Slab;

use std::ops::{Index, IndexMut, Not};

/// Handle to a node slot in [RbTree](crate::RbTree).
///
/// Handles are plain arena indices. Slot 0 is reserved for the sentinel,
/// which stands for every missing child and missing parent. A handle
/// stays valid until its entry is removed; after that the slot may be
/// reused by a later insert.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Ref(usize);

pub(crate) const SENTINEL: Ref = Ref(0);

impl Ref {
    /// Return whether this handle is the sentinel, that is, no node.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.0 == 0
    }
}

/// Node color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Child slot, used to fold the mirrored cases of rotation and repair
/// into a single code path.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

// Node corresponds to a single entry in RbTree instance. The sentinel is
// also a Node, without a value.
pub(crate) struct Node<V> {
    pub key: i64,
    pub value: Option<V>, // None only for the sentinel.
    pub color: Color,
    pub parent: Ref,
    pub children: [Ref; 2],
}

impl<V> Node<V> {
    pub fn new(key: i64, value: V, parent: Ref) -> Node<V> {
        Node {
            key,
            value: Some(value),
            color: Color::Red,
            parent,
            children: [SENTINEL, SENTINEL],
        }
    }

    fn sentinel() -> Node<V> {
        Node {
            key: 0,
            value: None,
            color: Color::Black,
            parent: SENTINEL,
            children: [SENTINEL, SENTINEL],
        }
    }

    #[inline]
    pub fn child(&self, dir: Dir) -> Ref {
        self.children[dir as usize]
    }

    #[inline]
    pub fn set_child(&mut self, dir: Dir, child: Ref) {
        self.children[dir as usize] = child
    }

    #[inline]
    pub fn left(&self) -> Ref {
        self.child(Dir::Left)
    }

    #[inline]
    pub fn right(&self) -> Ref {
        self.child(Dir::Right)
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub fn entry(&self) -> Option<(i64, &V)> {
        self.value.as_ref().map(|value| (self.key, value))
    }
}

/// Node storage for one tree. Slot 0 holds the sentinel for the whole
/// lifetime of the arena.
pub(crate) struct Arena<V> {
    slab: Slab<Node<V>>,
}

impl<V> Arena<V> {
    pub fn new() -> Arena<V> {
        let mut slab = Slab::new();
        let index = slab.insert(Node::sentinel());
        debug_assert_eq!(index, SENTINEL.0);
        Arena { slab }
    }

    pub fn insert(&mut self, node: Node<V>) -> Ref {
        Ref(self.slab.insert(node))
    }

    /// Remove a detached node. Caller must never pass the sentinel.
    pub fn remove(&mut self, r: Ref) -> Node<V> {
        debug_assert!(!r.is_sentinel());
        self.slab.remove(r.0)
    }

    /// Return the node for `r`, if `r` names a live entry.
    pub fn get(&self, r: Ref) -> Option<&Node<V>> {
        match r.is_sentinel() {
            true => None,
            false => self.slab.get(r.0),
        }
    }

    pub fn get_mut(&mut self, r: Ref) -> Option<&mut Node<V>> {
        match r.is_sentinel() {
            true => None,
            false => self.slab.get_mut(r.0),
        }
    }

    /// Number of live entries, sentinel excluded.
    pub fn count(&self) -> usize {
        self.slab.len() - 1
    }
}

impl<V> Index<Ref> for Arena<V> {
    type Output = Node<V>;

    fn index(&self, index: Ref) -> &Self::Output {
        &self.slab[index.0]
    }
}

impl<V> IndexMut<Ref> for Arena<V> {
    fn index_mut(&mut self, index: Ref) -> &mut Self::Output {
        &mut self.slab[index.0]
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
