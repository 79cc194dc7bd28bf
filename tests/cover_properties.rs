use proptest::prelude::*;
use quadcell::{Bounds, CellId, CellIdConverter, MercatorBounds, OutOfBoundsPolicy, QuadcellError};

type Cell = CellId<30>;

fn square4() -> CellIdConverter<30> {
    CellIdConverter::new(Bounds::new(0.0, 0.0, 4.0, 4.0)).expect("valid bounds")
}

#[test]
fn test_cover_scenarios_are_deterministic() {
    let converter = square4();
    for _ in 0..3 {
        let far = converter.cover(3.5, 2.5, 2.5, 3.5).unwrap();
        let near = converter.cover(2.25, 1.75, 2.75, 1.25).unwrap();
        assert_eq!(far, Cell::from_string("3").unwrap());
        assert_eq!(near, Cell::from_string("12").unwrap());
        assert!(near.level() > far.level());
    }
}

#[test]
fn test_cover_straddling_boundary_is_coarse() {
    let converter = square4();
    // Tiny extent, but it straddles x = 1.0 inside quadrant "0".
    let cover = converter.cover(0.999, 0.5, 1.001, 0.5).unwrap();
    assert_eq!(cover.to_string(), "0");
}

#[test]
fn test_mercator_cover() {
    let converter = CellIdConverter::<19>::new(MercatorBounds::bounds()).unwrap();
    let nyc = (
        MercatorBounds::lon_to_x(-74.0060),
        MercatorBounds::lat_to_y(40.7128),
    );
    let boston = (
        MercatorBounds::lon_to_x(-71.0589),
        MercatorBounds::lat_to_y(42.3601),
    );
    let cover = converter.cover(nyc.0, nyc.1, boston.0, boston.1).unwrap();
    assert!(cover.to_string().starts_with('2'));
    let rect = converter.cell_bounds(&cover);
    assert!(rect.min().x <= nyc.0 && nyc.0 <= rect.max().x);
    assert!(rect.min().y <= boston.1 && boston.1 <= rect.max().y);
}

#[test]
fn test_reject_policy_in_cover() {
    let converter = CellIdConverter::<30>::with_policy(
        Bounds::new(0.0, 0.0, 4.0, 4.0),
        OutOfBoundsPolicy::Reject,
    )
    .unwrap();
    let err = converter.cover(1.0, 1.0, 5.0, 1.0).unwrap_err();
    assert!(matches!(err, QuadcellError::OutOfBounds { x, .. } if x == 5.0));
}

fn contains_with_tolerance(converter: &CellIdConverter<30>, cell: &Cell, x: f64, y: f64) -> bool {
    let rect = converter.cell_bounds(cell);
    let tx = converter.step_x() * 2.0;
    let ty = converter.step_y() * 2.0;
    rect.min().x - tx <= x && x <= rect.max().x + tx && rect.min().y - ty <= y && y <= rect.max().y + ty
}

proptest! {
    #[test]
    fn cover_contains_both_points(
        x1 in 0.0f64..4.0, y1 in 0.0f64..4.0,
        x2 in 0.0f64..4.0, y2 in 0.0f64..4.0,
    ) {
        let converter = square4();
        let cover = converter.cover(x1, y1, x2, y2).unwrap();
        prop_assert!(contains_with_tolerance(&converter, &cover, x1, y1));
        prop_assert!(contains_with_tolerance(&converter, &cover, x2, y2));
    }

    #[test]
    fn cover_is_commutative(
        x1 in -10.0f64..10.0, y1 in -10.0f64..10.0,
        x2 in -10.0f64..10.0, y2 in -10.0f64..10.0,
    ) {
        let converter = square4();
        prop_assert_eq!(
            converter.cover(x1, y1, x2, y2).unwrap(),
            converter.cover(x2, y2, x1, y1).unwrap()
        );
    }

    #[test]
    fn cover_of_single_point_is_finest(x in 0.0f64..=4.0, y in 0.0f64..=4.0) {
        let converter = square4();
        let cover = converter.cover(x, y, x, y).unwrap();
        prop_assert_eq!(cover.level(), Cell::MAX_DEPTH);
        prop_assert_eq!(cover, converter.to_cell(x, y).unwrap());
    }

    #[test]
    fn cover_depth_never_grows_with_distance(
        x in 0.0f64..2.0, y in 0.0f64..2.0,
        dx in 0.0f64..1.0, dy in 0.0f64..1.0,
        t1 in 0.0f64..1.0, t2 in 0.0f64..1.0,
    ) {
        let converter = square4();
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        let near_cover = converter.cover(x, y, x + dx * near, y + dy * near).unwrap();
        let far_cover = converter.cover(x, y, x + dx * far, y + dy * far).unwrap();
        prop_assert!(far_cover.level() <= near_cover.level());
        prop_assert!(far_cover.is_ancestor_of(&near_cover));
    }

    #[test]
    fn cover_coords_matches_pairwise_cover(
        x1 in 0.0f64..4.0, y1 in 0.0f64..4.0,
        x2 in 0.0f64..4.0, y2 in 0.0f64..4.0,
    ) {
        let converter = square4();
        let folded = converter
            .cover_coords([geo::coord! { x: x1, y: y1 }, geo::coord! { x: x2, y: y2 }])
            .unwrap();
        prop_assert_eq!(folded, converter.cover(x1, y1, x2, y2).unwrap());
    }

    #[test]
    fn to_cell_lands_in_cell_bounds(x in 0.0f64..4.0, y in 0.0f64..4.0) {
        let converter = square4();
        let cell = converter.to_cell(x, y).unwrap();
        prop_assert!(contains_with_tolerance(&converter, &cell, x, y));
        let origin = converter.from_cell(&cell);
        prop_assert!(origin.x() <= x + 1e-12 && origin.y() <= y + 1e-12);
    }
}
