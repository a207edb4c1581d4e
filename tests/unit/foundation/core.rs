use super::*;

#[test]
fn unite_ignores_empty_operands() {
    let a = IntRect::new(10, 10, 20, 20);
    assert_eq!(a.unite(IntRect::ZERO), a);
    assert_eq!(IntRect::ZERO.unite(a), a);
    assert_eq!(
        a.unite(IntRect::new(50, 0, 10, 5)),
        IntRect::from_ltrb(10, 0, 60, 30)
    );
}

#[test]
fn inflate_grows_every_side() {
    let r = IntRect::new(10, 20, 30, 40).inflate(8);
    assert_eq!(r, IntRect::new(2, 12, 46, 56));
}

#[test]
fn intersects_is_exclusive_at_edges() {
    let a = IntRect::new(0, 0, 10, 10);
    assert!(a.intersects(IntRect::new(9, 9, 5, 5)));
    assert!(!a.intersects(IntRect::new(10, 0, 5, 5)));
    assert!(!a.intersects(IntRect::ZERO));
}

#[test]
fn truncation_matches_component_wise_cast() {
    let r = IntRect::from_rect_truncating(Rect::new(1.7, 2.2, 11.9, 5.0));
    assert_eq!(r, IntRect::new(1, 2, 10, 2));
}

#[test]
fn region_skips_covered_and_empty_rects() {
    let mut region = Region::new();
    region.union_rect(IntRect::new(0, 0, 10, 10));
    region.union_rect(IntRect::new(2, 2, 3, 3));
    region.union_rect(IntRect::ZERO);
    assert_eq!(region.iter().count(), 1);

    region.union_rect(IntRect::new(-5, -5, 30, 30));
    assert_eq!(region.iter().count(), 1);
    assert_eq!(region.bounds(), IntRect::new(-5, -5, 30, 30));
}

#[test]
fn region_bounds_are_order_independent() {
    let rects = [
        IntRect::new(0, 0, 4, 4),
        IntRect::new(100, 3, 2, 2),
        IntRect::new(-10, 50, 1, 1),
    ];
    let fwd = Region::from_rects(rects);
    let rev = Region::from_rects(rects.iter().rev().copied());
    assert_eq!(fwd.bounds(), rev.bounds());
    assert_eq!(fwd.bounds(), IntRect::from_ltrb(-10, 0, 102, 51));
}

#[test]
fn inverted_clear_color_averages_channels() {
    let c = Rgba8::rgb(255, 0, 0).to_inverted_clear_color();
    assert!((c[0] - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(c[0], c[1]);
    assert_eq!(c[3], 1.0);
    assert_eq!(Rgba8::WHITE.to_inverted_clear_color()[0], 0.0);
}

#[test]
fn color_parses_hex_and_object() {
    let c: Rgba8 = serde_json::from_str("\"#33b5e5\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0x33, 0xb5, 0xe5));
    let c: Rgba8 = serde_json::from_str("{\"r\": 1, \"g\": 2, \"b\": 3}").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    assert!(serde_json::from_str::<Rgba8>("\"33b5e5\"").is_err());
}

#[test]
fn subtract_leaves_disjoint_bands() {
    let a = IntRect::from_ltrb(0, 0, 10, 10);
    assert_eq!(a.subtract(IntRect::from_ltrb(20, 20, 30, 30)), vec![a]);
    assert!(a.subtract(IntRect::from_ltrb(-1, -1, 11, 11)).is_empty());

    let ring = a.subtract(IntRect::from_ltrb(2, 2, 8, 8));
    assert_eq!(
        ring,
        vec![
            IntRect::from_ltrb(0, 0, 10, 2),
            IntRect::from_ltrb(0, 8, 10, 10),
            IntRect::from_ltrb(0, 2, 2, 8),
            IntRect::from_ltrb(8, 2, 10, 8),
        ]
    );
    let area: i32 = ring.iter().map(|r| r.width * r.height).sum();
    assert_eq!(area, 100 - 36);
}

#[test]
fn uncovered_drops_everything_the_region_covers() {
    let region = Region::from_rects([
        IntRect::from_ltrb(0, 0, 10, 4),
        IntRect::from_ltrb(0, 6, 10, 10),
    ]);
    assert_eq!(
        region.uncovered(IntRect::from_ltrb(2, 0, 4, 10)),
        vec![IntRect::from_ltrb(2, 4, 4, 6)]
    );
    assert!(region.uncovered(IntRect::from_ltrb(1, 1, 3, 3)).is_empty());
    assert!(region.uncovered(IntRect::ZERO).is_empty());
}
