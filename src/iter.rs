//! Depth-first walks over [RbTree](crate::RbTree).
//!
//! Walks are lazy. Each call to `next()` resumes from an explicit stack
//! of path fragments, so no result container is built up front and the
//! caller is free to stop early.

use crate::node::{Arena, Ref};

/// Visiting order for a depth-first walk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Order {
    /// left, node, right. Yields keys in ascending order.
    In,
    /// node, left, right.
    Pre,
    /// left, right, node.
    Post,
}

// Where a fragment stands within its own node's visit.
#[derive(Copy, Clone)]
enum IFlag {
    Enter,
    Left,
    Center,
    Right,
    Exit,
}

struct Fragment {
    flag: IFlag,
    node: Ref,
}

// Walk yields node handles, used for public iteration and for teardown.
pub(crate) struct Walk<'a, V> {
    arena: &'a Arena<V>,
    order: Order,
    paths: Vec<Fragment>,
}

impl<'a, V> Walk<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, root: Ref, order: Order) -> Walk<'a, V> {
        let mut paths = Vec::default();
        if !root.is_sentinel() {
            paths.push(Fragment {
                flag: IFlag::Enter,
                node: root,
            });
        }
        Walk {
            arena,
            order,
            paths,
        }
    }
}

impl<'a, V> Iterator for Walk<'a, V> {
    type Item = Ref;

    fn next(&mut self) -> Option<Ref> {
        loop {
            let path = self.paths.last_mut()?;
            let node = path.node;
            match path.flag {
                IFlag::Enter => {
                    path.flag = IFlag::Left;
                    if self.order == Order::Pre {
                        break Some(node);
                    }
                }
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    let left = self.arena[node].left();
                    if !left.is_sentinel() {
                        let flag = IFlag::Enter;
                        self.paths.push(Fragment { flag, node: left });
                    }
                }
                IFlag::Center => {
                    path.flag = IFlag::Right;
                    if self.order == Order::In {
                        break Some(node);
                    }
                }
                IFlag::Right => {
                    path.flag = IFlag::Exit;
                    let right = self.arena[node].right();
                    if !right.is_sentinel() {
                        let flag = IFlag::Enter;
                        self.paths.push(Fragment { flag, node: right });
                    }
                }
                IFlag::Exit => {
                    self.paths.pop();
                    if self.order == Order::Post {
                        break Some(node);
                    }
                }
            }
        }
    }
}

/// Iterator over `(key, &value)` entries of an [RbTree](crate::RbTree),
/// in the [Order] it was created with.
///
/// The tree is borrowed for the lifetime of the iterator, so it cannot
/// be mutated during the walk.
pub struct Iter<'a, V> {
    walk: Walk<'a, V>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, root: Ref, order: Order) -> Iter<'a, V> {
        Iter {
            walk: Walk::new(arena, root, order),
            remaining: arena.count(),
        }
    }

    /// Return the order this iterator visits entries in.
    pub fn order(&self) -> Order {
        self.walk.order
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.walk.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        let arena: &'a Arena<V> = self.walk.arena;
        arena[node].entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, V> ExactSizeIterator for Iter<'a, V> {}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
