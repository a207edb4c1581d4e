use super::*;

fn tracker() -> ViewportTracker {
    ViewportTracker::new(&CompositorOpts::default())
}

#[test]
fn tile_bounds_floor_and_ceil_the_scaled_edges() {
    let mut vp = tracker();
    vp.set_viewport(Rect::new(100.0, 300.0, 900.0, 700.0), 1.0, 1.0).unwrap();
    assert_eq!(vp.tile_bounds(), IntRect::from_ltrb(0, 1, 4, 3));

    vp.set_viewport(Rect::new(100.0, 300.0, 900.0, 700.0), 2.0, 2.0).unwrap();
    assert_eq!(vp.tile_bounds(), IntRect::from_ltrb(0, 2, 8, 6));
}

#[test]
fn budget_counts_both_pages_and_prefetch() {
    let mut vp = tracker();
    // An unaligned 512x256 viewport can straddle 3x2 tiles, plus one prefetch tile per side,
    // for each of the two pages.
    let up = vp
        .set_viewport(Rect::new(0.0, 0.0, 512.0, 256.0), 1.0, 1.0)
        .unwrap();
    assert_eq!(up.max_texture_count, (3 + 2) * (2 + 2) * 2);
}

#[test]
fn identical_viewport_and_scale_is_a_noop() {
    let mut vp = tracker();
    let r = Rect::new(10.0, 20.0, 330.0, 500.0);
    let first = vp.set_viewport(r, 1.5, 1.5).unwrap();
    let bounds = vp.tile_bounds();
    assert!(vp.set_viewport(r, 1.5, 1.5).is_none());
    assert!(vp.set_viewport(r, 1.5, 1.5).is_none());
    assert_eq!(vp.tile_bounds(), bounds);
    assert_eq!(vp.max_texture_count(), first.max_texture_count);
}

#[test]
fn pending_zoom_forces_recompute() {
    let mut vp = tracker();
    let r = Rect::new(0.0, 0.0, 100.0, 100.0);
    vp.set_viewport(r, 1.0, 1.0).unwrap();
    let up = vp.set_viewport(r, 1.0, 2.0).unwrap();
    assert!(!up.scale_changed);
}

#[test]
fn scale_change_requests_retile() {
    let mut vp = tracker();
    let first = vp
        .set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0, 1.0)
        .unwrap();
    assert!(first.scale_changed);
    let scrolled = vp
        .set_viewport(Rect::new(0.0, 50.0, 100.0, 150.0), 1.0, 1.0)
        .unwrap();
    assert!(!scrolled.scale_changed);
    let zoomed = vp
        .set_viewport(Rect::new(0.0, 50.0, 100.0, 150.0), 2.0, 2.0)
        .unwrap();
    assert!(zoomed.scale_changed);
}

#[test]
fn scroll_direction_flags() {
    let mut vp = tracker();
    vp.set_viewport(Rect::new(100.0, 100.0, 200.0, 200.0), 1.0, 1.0);

    vp.set_viewport(Rect::new(50.0, 150.0, 150.0, 250.0), 1.0, 1.0);
    assert!(vp.going_down());
    assert!(vp.going_left());

    vp.set_viewport(Rect::new(80.0, 120.0, 180.0, 220.0), 1.0, 1.0);
    assert!(!vp.going_down());
    assert!(!vp.going_left());
}

#[test]
fn zero_sized_viewport_has_empty_bounds_and_prefetch_only_budget() {
    let mut vp = tracker();
    let up = vp
        .set_viewport(Rect::new(130.0, 130.0, 130.0, 130.0), 1.0, 1.0)
        .unwrap();
    assert!(vp.tile_bounds().is_empty());
    assert_eq!(up.max_texture_count, 2 * 2 * 2);
}

#[test]
fn prefetch_is_per_axis() {
    let mut vp = tracker();
    let visible = Rect::new(0.0, 0.0, 400.0, 800.0);
    // Wide enough horizontally (400 * 1.2 >= 300), too short vertically.
    assert_eq!(vp.update_prefetch(visible, Size::new(300.0, 5000.0)), (0, 1));
    assert_eq!(vp.update_prefetch(visible, Size::new(3000.0, 900.0)), (1, 0));
    assert_eq!(vp.expanded_tile_bounds(), (1, 0));
}
