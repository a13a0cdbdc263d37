use beadsmith_designer::input::PointerKind;
use beadsmith_designer::layout::PathLayout;
use beadsmith_designer::model::Point;
use beadsmith_designer::projector::{project, PathProjector, ProjectionOptions};
use beadsmith_designer::viewport::Viewport;
use proptest::prelude::*;

fn projector() -> PathProjector {
    PathProjector::new(PathLayout::hanging_chain(180.0, 300.0, 120.0))
}

#[test]
fn test_pointer_on_chain_has_no_offset() {
    let projector = projector();
    let on_chain = projector.sampler().point_at(0.3);
    let projection = projector.project_design(on_chain, &ProjectionOptions::default());
    assert!((projection.t - 0.3).abs() <= 1.0 / 199.0);
    assert!(projection.offset_mm.abs() < 0.5);
}

#[test]
fn test_placement_point_projects_back() {
    let projector = projector();
    let target = projector.placement_point(0.5, 6.0);
    let projection = projector.project_design(target, &ProjectionOptions::default());
    assert!((projection.t - 0.5).abs() <= 1.0 / 199.0);
    assert!((projection.offset_mm - 6.0).abs() < 0.1);
}

#[test]
fn test_zoomed_viewport_projection() {
    let projector = projector();
    let mut viewport = Viewport::new();
    viewport.zoom(1.0, Point::new(150.0, 100.0));
    let design = projector.sampler().point_at(0.75);
    let screen = viewport.design_to_screen(design);

    let projection = project(
        screen,
        projector.layout(),
        &viewport,
        &ProjectionOptions::for_pointer(PointerKind::Mouse),
    );
    assert!((projection.t - 0.75).abs() <= 1.0 / 199.0);
}

#[test]
fn test_touch_projection_is_within_one_interval() {
    let projector = projector();
    let design = projector.sampler().point_at(0.37);
    let projection =
        projector.project_design(design, &ProjectionOptions::for_pointer(PointerKind::Touch));
    assert!((projection.t - 0.37).abs() <= 1.0 / 49.0);
}

proptest! {
    #[test]
    fn prop_projection_is_bounded(
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
        scale in 0.5f64..3.0,
        bound in 0.0f64..40.0,
        snap in proptest::option::of(0.01f64..0.5),
    ) {
        let projector = projector();
        let mut viewport = Viewport::new();
        viewport.set_scale(scale);
        let options = ProjectionOptions { samples: 64, snap_step: snap, offset_bound_mm: bound };

        let projection = projector.project(Point::new(x, y), &viewport, &options);
        prop_assert!((0.0..=1.0).contains(&projection.t));
        prop_assert!(projection.offset_mm.abs() <= bound);
    }

    #[test]
    fn prop_non_finite_pointer_is_safe(x in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)]) {
        let projection = projector().project_design(Point::new(x, 10.0), &ProjectionOptions::default());
        prop_assert_eq!(projection.t, 0.0);
        prop_assert_eq!(projection.offset_mm, 0.0);
    }
}
