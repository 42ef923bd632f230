use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use super::*;
use crate::RbTree;

fn keys(iter: Iter<u32>) -> Vec<i64> {
    iter.map(|(key, _)| key).collect()
}

#[test]
fn test_walk_empty() {
    let index: RbTree<u32> = RbTree::new();
    for order in [Order::In, Order::Pre, Order::Post].iter() {
        let mut iter = index.walk(*order);
        assert_eq!(iter.len(), 0);
        assert_eq!(iter.next(), None);
    }
}

//              4(b)
//            /      \
//         2(r)       6(r)
//         /  \       /  \
//       1(b) 3(b)  5(b)  8(b)
//                        /  \
//                      7(r)  9(r)
//
#[test]
fn test_walk_orders() {
    let mut index: RbTree<u32> = RbTree::new();
    for key in 1..=9 {
        index.insert(key, key as u32);
    }
    index.validate().unwrap();

    assert_eq!(keys(index.inorder()), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(keys(index.preorder()), vec![4, 2, 1, 3, 6, 5, 8, 7, 9]);
    assert_eq!(keys(index.postorder()), vec![1, 3, 2, 5, 7, 9, 8, 6, 4]);

    assert_eq!(index.preorder().order(), Order::Pre);
    assert_eq!(index.iter().len(), 9);

    let mut iter = index.postorder();
    iter.next();
    assert_eq!(iter.size_hint(), (8, Some(8)));
}

#[test]
fn test_walk_early_stop() {
    let mut index: RbTree<u32> = RbTree::new();
    for key in (0..100).rev() {
        index.insert(key, (key * 3) as u32);
    }

    let items: Vec<(i64, u32)> = index
        .iter()
        .skip_while(|(key, _)| *key < 10)
        .take(3)
        .map(|(key, value)| (key, *value))
        .collect();
    assert_eq!(items, vec![(10, 30), (11, 33), (12, 36)]);

    let mut n = 0;
    for (key, value) in &index {
        assert_eq!(*value, (key * 3) as u32);
        n += 1;
    }
    assert_eq!(n, 100);
}

#[test]
fn test_walk_random() {
    let seed: u64 = random();
    println!("test_walk_random {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index: RbTree<u32> = RbTree::new();
    let mut refkeys = vec![];
    for _i in 0..1000 {
        let key = rng.gen::<i32>() as i64;
        if index.insert(key, 0) {
            refkeys.push(key);
        }
    }
    refkeys.sort_unstable();
    assert_eq!(keys(index.inorder()), refkeys);

    // every order visits the same set, each node exactly once.
    let mut pre = keys(index.preorder());
    let mut post = keys(index.postorder());
    assert_eq!(pre.first().copied(), index.entry(index.root()).map(|(k, _)| k));
    assert_eq!(post.last().copied(), index.entry(index.root()).map(|(k, _)| k));
    pre.sort_unstable();
    post.sort_unstable();
    assert_eq!(pre, refkeys);
    assert_eq!(post, refkeys);
}
