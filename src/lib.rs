//! Package implement an ordered index over integer keys, using a classic
//! [red-black tree][wiki-rb] with parent links and a shared sentinel.
//!
//! - Each entry in [RbTree] instance correspond to a {Key, Value} pair,
//!   where key is `i64` and value is any type owned by the caller.
//! - Keys are unique. A duplicate insert is rejected and the value is
//!   handed back, never overwritten.
//! - Insert, delete and lookup are O(log n).
//! - In-order, pre-order and post-order walks, as lazy iterators.
//! - Nodes live in a slab arena, linked by index. Slot 0 is the sentinel,
//!   which stands for every missing child and missing parent.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and CRUD operations:
//!
//! ```
//! use rbindex::RbTree;
//!
//! let mut index: RbTree<String> = RbTree::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! assert!(index.insert(10, "value10".to_string()));
//! assert!(index.insert(20, "value20".to_string()));
//! assert!(!index.insert(20, "again".to_string()));
//!
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.search(10).unwrap(), "value10");
//! assert!(index.contains(20));
//!
//! let old_value = index.remove(10).unwrap();
//! assert_eq!(old_value, "value10".to_string());
//! assert!(!index.contains(10));
//! ```
//!
//! Walking the index:
//!
//! ```
//! use rbindex::RbTree;
//!
//! let mut index: RbTree<u64> = RbTree::new();
//! for key in [10, 20, 30] {
//!     index.insert(key, (key as u64) * 100);
//! }
//!
//! let keys: Vec<i64> = index.inorder().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![10, 20, 30]);
//! let keys: Vec<i64> = index.preorder().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![20, 10, 30]);
//! let keys: Vec<i64> = index.postorder().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![10, 30, 20]);
//! ```
//!
//! [wiki-rb]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// ```ignore
// use crate::Error;
// err_at!(KeyNotFound, msg: "key {}", key);
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
}

mod iter;
mod node;
mod rbtree;

pub use iter::{Iter, Order};
pub use node::{Color, Ref};
pub use rbtree::{RbTree, Stats};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    KeyNotFound(String, String),
    DuplicateKey(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            KeyNotFound(p, msg) => write!(f, "{} KeyNotFound: {}", p, msg),
            DuplicateKey(p, msg) => write!(f, "{} DuplicateKey: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
