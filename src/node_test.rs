use super::*;

#[test]
fn test_dir_not() {
    assert_eq!(!Dir::Left, Dir::Right);
    assert_eq!(!Dir::Right, Dir::Left);
    assert_eq!(Dir::Left as usize, 0);
    assert_eq!(Dir::Right as usize, 1);
}

#[test]
fn test_arena_sentinel() {
    let mut arena: Arena<&str> = Arena::new();
    assert_eq!(arena.count(), 0);
    assert!(arena[SENTINEL].is_black());
    assert!(arena[SENTINEL].entry().is_none());
    assert!(arena.get(SENTINEL).is_none());
    assert!(arena.get_mut(SENTINEL).is_none());

    let r = arena.insert(Node::new(7, "seven", SENTINEL));
    assert!(!r.is_sentinel());
    assert_eq!(arena.count(), 1);
    assert!(arena[r].is_red());
    assert_eq!(arena[r].left(), SENTINEL);
    assert_eq!(arena[r].right(), SENTINEL);
    assert_eq!(arena.get(r).and_then(Node::entry), Some((7, &"seven")));

    let node = arena.remove(r);
    assert_eq!(node.value, Some("seven"));
    assert_eq!(arena.count(), 0);
    assert!(arena.get(r).is_none());
}

#[test]
fn test_node_children() {
    let mut node = Node::new(1, (), SENTINEL);
    node.set_child(Dir::Right, Ref(3));
    assert_eq!(node.right(), Ref(3));
    assert_eq!(node.child(!Dir::Right), SENTINEL);
    node.set_black();
    assert!(node.is_black());
    node.set_red();
    assert!(node.is_red());
}
