use super::*;

#[test]
fn first_merge_adopts_the_rect() {
    let mut d = DirtyRegionTracker::new(8);
    let r = IntRect::new(3, 4, 5, 6);
    d.merge_base(r);
    assert_eq!(d.base(), r);
}

#[test]
fn merge_is_order_independent() {
    let a = IntRect::new(0, 0, 10, 10);
    let b = IntRect::new(40, -5, 2, 2);

    let mut ab = DirtyRegionTracker::new(8);
    ab.merge_base(a);
    ab.merge_base(b);
    let mut ba = DirtyRegionTracker::new(8);
    ba.merge_base(b);
    ba.merge_base(a);

    assert_eq!(ab.base(), ba.base());
    assert_eq!(ab.base(), IntRect::from_ltrb(0, -5, 42, 10));
}

#[test]
fn layer_merge_inflates_by_margin() {
    let mut d = DirtyRegionTracker::new(8);
    d.merge_layer(IntRect::new(100, 100, 10, 10));
    assert_eq!(d.layer(), IntRect::new(92, 92, 26, 26));
    assert!(d.base().is_empty());
}

#[test]
fn empty_rects_never_grow_a_union() {
    let mut d = DirtyRegionTracker::new(8);
    d.merge_base(IntRect::new(5, 5, 0, 10));
    d.merge_layer(IntRect::new(5, 5, 10, -1));
    assert_eq!(d.base(), IntRect::ZERO);
    assert_eq!(d.layer(), IntRect::ZERO);
}

#[test]
fn drain_returns_previous_union_and_resets() {
    let mut d = DirtyRegionTracker::new(8);
    d.merge_base(IntRect::new(1, 2, 3, 4));
    d.merge_layer(IntRect::new(1, 2, 3, 4));

    assert_eq!(d.drain_base(), IntRect::new(1, 2, 3, 4));
    assert_eq!(d.drain_base(), IntRect::ZERO);
    assert_eq!(d.drain_base(), IntRect::ZERO);

    assert_eq!(d.drain_layer(), IntRect::new(-7, -6, 19, 20));
    assert_eq!(d.drain_layer(), IntRect::ZERO);
}
