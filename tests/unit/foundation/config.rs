use super::*;

#[test]
fn defaults_validate() {
    CompositorOpts::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let opts = CompositorOpts::from_reader(
        r##"{"tile_width": 512, "ring": {"color": "#ff0000"}}"##.as_bytes(),
    )
    .unwrap();
    assert_eq!(opts.tile_width, 512);
    assert_eq!(opts.tile_height, 256);
    assert_eq!(opts.ring.color, Rgba8::rgb(255, 0, 0));
    assert_eq!(opts.ring.border_width, 1);
}

#[test]
fn rejects_inconsistent_values() {
    let bad = [
        CompositorOpts {
            tile_width: 0,
            ..Default::default()
        },
        CompositorOpts {
            prefetch_ratio: f64::NAN,
            ..Default::default()
        },
        CompositorOpts {
            min_scale_warning: 5.0,
            max_scale_warning: 1.0,
            ..Default::default()
        },
        CompositorOpts {
            layer_dirty_margin: -1,
            ..Default::default()
        },
    ];
    for opts in bad {
        assert!(matches!(opts.validate(), Err(WebtileError::Config(_))));
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = CompositorOpts::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, WebtileError::Serde(_)));
}

#[test]
fn plausible_scale_band_is_inclusive() {
    let opts = CompositorOpts::default();
    assert!(opts.scale_is_plausible(0.1));
    assert!(opts.scale_is_plausible(10.0));
    assert!(!opts.scale_is_plausible(50.0));
    assert!(!opts.scale_is_plausible(0.05));
}
