//! Default session content for the interactive demos.
//!
//! Each curve instance starts from one of these layouts; the user then drags
//! points around from there. Coordinates live in the 800x500 canvas space
//! the UI shell uses.

use crate::bezier::{BezierCurve, BezierCurve2};
use crate::rational::RationalBezierCurve;
use crate::spline::UniformQuadSpline;
use crate::surface::ControlGrid;
use nalgebra::Vector2;
use smallvec::smallvec;

/// The cubic arch the plain Bézier demo starts with.
pub fn bezier_demo() -> BezierCurve2<f64> {
    BezierCurve(smallvec![
        Vector2::new(100.0, 400.0),
        Vector2::new(200.0, 100.0),
        Vector2::new(600.0, 100.0),
        Vector2::new(700.0, 400.0),
    ])
}

/// The weighted four-point curve the NURBS demo starts with.
///
/// The heavy second point pulls the curve almost onto itself.
pub fn nurbs_demo() -> RationalBezierCurve<f64> {
    RationalBezierCurve::with_weights(
        smallvec![
            Vector2::new(150.0, 400.0),
            Vector2::new(300.0, 50.0),
            Vector2::new(500.0, 80.0),
            Vector2::new(650.0, 400.0),
        ],
        [1.0, 8.0, 3.0, 1.0],
    )
}

/// The five-point zigzag polygon the B-spline demo starts with.
pub fn spline_demo() -> UniformQuadSpline<f64> {
    UniformQuadSpline::from_polygon(vec![
        Vector2::new(100.0, 300.0),
        Vector2::new(250.0, 100.0),
        Vector2::new(400.0, 300.0),
        Vector2::new(550.0, 100.0),
        Vector2::new(700.0, 300.0),
    ])
}

/// The 4x4 sinusoidal hump the surface demo starts with.
pub fn surface_demo() -> ControlGrid<f64> {
    // 4x4 with the default spacing always satisfies the grid invariant
    ControlGrid::sampled(4, 4, 100.0, 50.0).unwrap()
}
