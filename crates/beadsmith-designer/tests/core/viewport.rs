use beadsmith_designer::model::Point;
use beadsmith_designer::viewport::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new();
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.pan(), Point::new(0.0, 0.0));
    assert_eq!(vp.scale_limits(), (0.5, 3.0));
}

#[test]
fn test_zoom_keeps_focal_point_fixed() {
    let mut vp = Viewport::new();
    vp.set_pan(30.0, -12.0);
    let focal = Point::new(240.0, 180.0);
    let before = vp.screen_to_design(focal);

    vp.zoom(0.5, focal);
    let after = vp.screen_to_design(focal);

    assert!((vp.scale() - 1.5).abs() < 1e-9);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_zoom_clamps_scale() {
    let mut vp = Viewport::new();
    vp.zoom(10.0, Point::new(0.0, 0.0));
    assert_eq!(vp.scale(), 3.0);
    vp.zoom(-10.0, Point::new(0.0, 0.0));
    assert_eq!(vp.scale(), 0.5);
}

#[test]
fn test_zoom_at_clamped_scale_leaves_pan() {
    let mut vp = Viewport::new();
    vp.set_scale(3.0);
    vp.set_pan(10.0, 10.0);
    vp.zoom_in_at(Point::new(400.0, 300.0));
    assert_eq!(vp.pan(), Point::new(10.0, 10.0));
}

#[test]
fn test_screen_design_round_trip() {
    let mut vp = Viewport::new();
    vp.set_scale(2.0);
    vp.set_pan(15.0, 25.0);
    let design = Point::new(42.0, -7.5);
    let screen = vp.design_to_screen(design);
    assert_eq!(screen, Point::new(99.0, 10.0));
    assert_eq!(vp.screen_to_design(screen), design);
}

#[test]
fn test_reset() {
    let mut vp = Viewport::new();
    vp.zoom_in();
    vp.pan_by(5.0, 5.0);
    vp.reset();
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.pan(), Point::new(0.0, 0.0));
}

#[test]
fn test_non_finite_input_ignored() {
    let mut vp = Viewport::new();
    vp.set_scale(f64::NAN);
    vp.set_pan(f64::INFINITY, 0.0);
    assert_eq!(vp.scale(), 1.0);
    assert_eq!(vp.pan(), Point::new(0.0, 0.0));
}

#[test]
fn test_display() {
    let mut vp = Viewport::new();
    vp.set_pan(1.5, 2.0);
    assert_eq!(vp.to_string(), "Scale: 1.00x | Pan: (1.5, 2.0)");
}
