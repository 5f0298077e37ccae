use approx::assert_abs_diff_eq;
use contour_shapes::synthetic::{
    arc_contour, circle_contour, polyline_contour, reference_scene,
};
use contour_shapes::{
    is_closed_curve, ArcRejection, ClassifierParams, Contour, HeuristicThresholds, Route,
    ShapeClassifier, ShapeKind, SkipReason,
};

fn classifier() -> ShapeClassifier {
    ShapeClassifier::new(ClassifierParams::default()).expect("default params are valid")
}

#[test]
fn closed_circle_routes_to_ellipse() {
    let circle = circle_contour((350.0, 100.0), 60.0);
    assert!(circle.len() >= 100);

    let res = classifier().classify(std::slice::from_ref(&circle));
    assert_eq!(res.shapes.len(), 1);
    assert_eq!(res.outcomes[0].route, Some(Route::Ellipse));

    let ellipse = res.shapes[0].as_ellipse().expect("ellipse record");
    assert_abs_diff_eq!(ellipse.center.x, 350.0, epsilon = 0.5);
    assert_abs_diff_eq!(ellipse.center.y, 100.0, epsilon = 0.5);
    assert_abs_diff_eq!(ellipse.semi_major, 60.0, epsilon = 1.0);
    assert_abs_diff_eq!(ellipse.semi_minor, 60.0, epsilon = 1.0);
    assert!(ellipse.eccentricity < 0.2, "ecc = {}", ellipse.eccentricity);
}

#[test]
fn quarter_arc_yields_exactly_one_arc() {
    let quarter = arc_contour((100.0, 100.0), 50.0, 0.0, 90.0);
    let res = classifier().classify(&[quarter]);

    assert_eq!(res.shapes.len(), 1);
    let arc = res.shapes[0].as_arc().expect("arc record");
    assert!((arc.span_deg - 90.0).abs() <= 5.0, "span = {}", arc.span_deg);
    assert_abs_diff_eq!(arc.chord_length, 50.0 * 2f64.sqrt(), epsilon = 1e-9);
    assert_abs_diff_eq!(arc.radius, 50.0, epsilon = 1.5);
    assert!(arc.start_angle_deg < 5.0 || arc.start_angle_deg > 355.0);
    assert!((arc.end_angle_deg - 90.0).abs() < 5.0);
}

#[test]
fn wide_arc_is_rejected_without_fallback() {
    let wide = arc_contour((400.0, 200.0), 35.0, 30.0, 330.0);
    let res = classifier().classify(&[wide]);

    assert!(res.shapes.is_empty());
    let outcome = res.outcomes[0];
    assert_eq!(outcome.route, Some(Route::Arc));
    assert!(matches!(
        outcome.skip,
        Some(SkipReason::ArcRejected(ArcRejection::SpanTooWide { span_deg })) if span_deg > 270.0
    ));
}

#[test]
fn polygons_are_named_by_vertex_count() {
    let contours = [
        polyline_contour(&[(500, 50), (450, 150), (550, 150)], true),
        polyline_contour(&[(50, 50), (200, 50), (200, 150), (50, 150)], true),
        // Concave outlines keep solidity below the curved-shape threshold.
        polyline_contour(&[(0, 0), (100, 0), (100, 100), (50, 30), (0, 100)], true),
        polyline_contour(
            &[(0, 0), (100, 0), (100, 40), (40, 40), (40, 100), (0, 100)],
            true,
        ),
    ];
    let res = classifier().classify(&contours);

    let names: Vec<_> = res
        .shapes
        .iter()
        .map(|s| s.as_polygon().expect("polygon").name.as_str())
        .collect();
    assert_eq!(names, ["triangle", "quadrilateral", "pentagon", "hexagon"]);

    let hexagon = res.shapes[3].as_polygon().expect("polygon");
    assert_abs_diff_eq!(hexagon.area, 6400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(hexagon.solidity, 6400.0 / 8200.0, epsilon = 1e-9);
}

#[test]
fn endpoints_within_ten_pixels_are_closed() {
    let th = HeuristicThresholds::default();
    let nearly = arc_contour((0.0, 0.0), 60.0, 0.0, 355.0);
    assert!(nearly.len() >= 10);
    assert!(nearly.endpoint_gap() < 10.0);
    assert!(is_closed_curve(&nearly, &th));

    let open = arc_contour((0.0, 0.0), 60.0, 0.0, 300.0);
    assert!(!is_closed_curve(&open, &th));
}

#[test]
fn classification_is_deterministic() {
    let scene = reference_scene();
    let classifier = classifier();
    let first = classifier.detect(&scene.contours, &scene.lines, &scene.circles);
    let second = classifier.detect(&scene.contours, &scene.lines, &scene.circles);
    assert_eq!(first, second);
}

#[test]
fn reference_scene_breakdown() {
    let scene = reference_scene();
    let res = classifier().detect(&scene.contours, &scene.lines, &scene.circles);

    let kinds: Vec<_> = res.shapes.iter().take(5).map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        [
            ShapeKind::Line,
            ShapeKind::Line,
            ShapeKind::Line,
            ShapeKind::Circle,
            ShapeKind::Circle
        ]
    );

    let counts = res.counts();
    assert_eq!(counts.lines, 3);
    assert_eq!(counts.circles, 2);
    assert_eq!(counts.polygons, 2, "rectangle and triangle");
    // Full circles, both ellipses, and the convex pentagon and hexagon.
    assert_eq!(counts.ellipses, 6);
    assert!((4..=6).contains(&counts.arcs), "arcs = {}", counts.arcs);

    assert_eq!(res.outcomes.len(), scene.contours.len());
    for (i, outcome) in res.outcomes.iter().enumerate() {
        assert_eq!(outcome.index, i);
    }
    for idx in [8, 9, 12, 13] {
        assert_eq!(res.outcomes[idx].route, Some(Route::Arc));
        assert!(res.outcomes[idx].emitted(), "arc contour {idx} was skipped");
    }
    assert!(res.shapes.iter().all(|s| s.is_finite()));
}

#[test]
fn small_contours_are_discarded() {
    let tiny = Contour::from_xy(&[(0, 0), (6, 0), (6, 6), (0, 6)]).expect("contour");
    let res = classifier().classify(&[tiny]);
    assert!(res.shapes.is_empty());
    assert_eq!(res.outcomes[0].skip, Some(SkipReason::BelowMinArea));
    assert_eq!(res.outcomes[0].route, None);
}
