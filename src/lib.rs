#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod bezier;
pub mod math;
pub mod presets;
pub mod rational;
pub mod spline;
pub mod surface;

pub use crate::bezier::{BezierCurve, BezierCurve2, BezierCurve3, Level, Pyramid};
pub use crate::rational::RationalBezierCurve;
pub use crate::spline::{SplineConstruction, UniformQuadSpline};
pub use crate::surface::{ControlGrid, GridError, SurfaceConstruction};

#[cfg(test)]
mod tests {
    use crate::bezier::{BezierCurve, BezierCurve2};
    use crate::math::{binomial_coefficient, factorial, lerp, pascal_row};
    use crate::presets;
    use crate::rational::RationalBezierCurve;
    use crate::spline::UniformQuadSpline;
    use crate::surface::{ControlGrid, GridError};
    use nalgebra::{Vector2, Vector3};
    use smallvec::smallvec;

    fn assert_close2(a: Vector2<f64>, b: Vector2<f64>, tol: f64) {
        assert!(
            (a - b).norm() < tol,
            "{a:?} and {b:?} differ by more than {tol}"
        );
    }

    fn assert_close3(a: Vector3<f64>, b: Vector3<f64>, tol: f64) {
        assert!(
            (a - b).norm() < tol,
            "{a:?} and {b:?} differ by more than {tol}"
        );
    }

    #[test]
    fn factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
    }

    #[test]
    fn binomials() {
        assert_eq!(binomial_coefficient(0, 0), 1);
        assert_eq!(binomial_coefficient(4, 2), 6);
        assert_eq!(binomial_coefficient(7, 0), 1);
        assert_eq!(binomial_coefficient(7, 7), 1);

        // The pascal row is the same thing built by addition
        for n in 0..8 {
            let row = pascal_row::<f64>(n);
            assert_eq!(row.len(), n + 1);
            for (k, coefficient) in row.into_iter().enumerate() {
                assert_eq!(coefficient, binomial_coefficient(n, k) as f64);
            }
        }
    }

    #[test]
    fn lerp_endpoints() {
        let a = Vector2::new(1.0, -2.0);
        let b = Vector2::new(3.0, 6.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        assert_eq!(lerp(&a, &b, 1.0), b);
        assert_eq!(lerp(&a, &b, 0.5), Vector2::new(2.0, 2.0));
    }

    #[test]
    fn bezier_interpolates_endpoints() {
        let curve = presets::bezier_demo();
        assert_eq!(curve.evaluate(0.0).unwrap(), curve[0]);
        assert_eq!(curve.evaluate(1.0).unwrap(), curve[curve.len() - 1]);
    }

    #[test]
    fn bezier_cubic_midpoint() {
        // 0.125 (100,400) + 0.375 (200,100) + 0.375 (600,100) + 0.125 (700,400)
        let curve = presets::bezier_demo();
        assert_eq!(curve.evaluate(0.5).unwrap(), Vector2::new(400.0, 175.0));
    }

    #[test]
    fn bezier_stays_in_convex_hull() {
        let curve = BezierCurve(smallvec![
            Vector2::new(50.0, 0.0),
            Vector2::new(200.0, 33.0),
            Vector2::new(0.0, 66.0),
            Vector2::new(200.0, 33.0),
            Vector2::new(50.0, 100.0),
        ]);
        for axis in 0..2 {
            let min = curve.iter().map(|p| p[axis]).fold(f64::INFINITY, f64::min);
            let max = curve
                .iter()
                .map(|p| p[axis])
                .fold(f64::NEG_INFINITY, f64::max);
            for i in 0..=20 {
                let point = curve.evaluate(i as f64 / 20.0).unwrap();
                assert!(min <= point[axis] && point[axis] <= max);
            }
        }
    }

    #[test]
    fn bezier_pyramid_shape() {
        let curve = presets::bezier_demo();
        let pyramid = curve.levels(0.3);
        assert_eq!(pyramid.len(), curve.len());
        for (k, level) in pyramid.iter().enumerate() {
            assert_eq!(level.len(), curve.len() - k);
        }
        assert_eq!(&pyramid[0][..], &curve[..]);
        assert_eq!(pyramid.tip(), curve.evaluate(0.3).as_ref());
    }

    #[test]
    fn bezier_degenerate_inputs() {
        let single = BezierCurve(smallvec![Vector2::new(4.0, 2.0)]);
        assert_eq!(single.evaluate(0.7).unwrap(), Vector2::new(4.0, 2.0));
        assert_eq!(single.levels(0.7).len(), 1);
        assert!(single.polyline(1.0, 0.01).is_empty());

        let empty: BezierCurve2<f64> = BezierCurve(smallvec![]);
        assert_eq!(empty.evaluate(0.5), None);
        assert!(empty.levels(0.5).is_empty());
    }

    #[test]
    fn bezier_polyline_reaches_max_t() {
        let curve = presets::bezier_demo();
        // 0.37 isn't a multiple of the step, the trace must still end there
        let polyline = curve.polyline(0.37, 0.01);
        assert_eq!(polyline[0], curve.evaluate(0.0).unwrap());
        assert_eq!(polyline[polyline.len() - 1], curve.evaluate(0.37).unwrap());
    }

    #[test]
    fn presets_match_session_defaults() {
        assert_eq!(presets::bezier_demo().degree(), 3);
        assert_eq!(presets::nurbs_demo().weights(), &[1.0, 8.0, 3.0, 1.0]);
        assert_eq!(presets::spline_demo().segment_count(), 5);
        let grid = presets::surface_demo();
        assert_eq!((grid.rows(), grid.cols()), (4, 4));
    }

    #[test]
    fn polylines_do_not_repeat_exact_endpoints() {
        let curve = presets::bezier_demo();
        // Steps of 0.25 land on max_t exactly: 0, 0.25, 0.5, 0.75, 1
        let trace = curve.polyline(1.0, 0.25);
        assert_eq!(trace.len(), 5);
        assert_eq!(trace[4], curve.evaluate(1.0).unwrap());

        // A zero-length trace is a single point, not the same point twice
        assert_eq!(curve.polyline(0.0, 0.01).len(), 1);

        let spline = presets::spline_demo();
        let trace = spline.polyline(0.0, 0.01);
        assert_eq!(trace, vec![spline.point_at(0, 0.0).unwrap()]);

        // max_t = 0.1 is halfway into segment 0; 0.25 steps land on it exactly
        let trace = spline.polyline(0.1, 0.25);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[2], spline.point_at(0, 0.5).unwrap());
    }

    #[test]
    fn rational_with_unit_weights_is_polynomial() {
        let curve = presets::bezier_demo();
        let rational = RationalBezierCurve::new(curve.0.clone());
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_close2(
                rational.evaluate(t).unwrap(),
                curve.evaluate(t).unwrap(),
                1e-9,
            );
        }
    }

    #[test]
    fn rational_strategies_agree() {
        // Bernstein summation vs homogeneous de Casteljau
        let curve = presets::nurbs_demo();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let direct = curve.evaluate(t).unwrap();
            let pyramid = curve.levels(t);
            assert_close2(direct, *pyramid.tip().unwrap(), 1e-9);
        }
    }

    #[test]
    fn rational_pyramid_shape() {
        let curve = presets::nurbs_demo();
        let pyramid = curve.levels(0.4);
        assert_eq!(pyramid.len(), curve.points().len());
        for (k, level) in pyramid.iter().enumerate() {
            assert_eq!(level.len(), curve.points().len() - k);
        }
        assert_eq!(&pyramid[0][..], curve.points());
    }

    #[test]
    fn rational_missing_weights_default_to_one() {
        let points = presets::bezier_demo().0;
        let padded = RationalBezierCurve::with_weights(points.clone(), [1.0]);
        let unit = RationalBezierCurve::new(points);
        assert_eq!(padded, unit);
    }

    #[test]
    fn rational_weight_pulls_curve() {
        let points = presets::bezier_demo().0;
        let target = points[1];
        let unit = RationalBezierCurve::new(points.clone());
        let mut heavy = RationalBezierCurve::new(points);
        heavy.set_weight(1, 10.0);

        let unweighted = (unit.evaluate(0.5).unwrap() - target).norm();
        let weighted = (heavy.evaluate(0.5).unwrap() - target).norm();
        assert!(weighted < unweighted);
    }

    #[test]
    fn spline_basis_matches_hat_construction() {
        let spline = presets::spline_demo();
        for segment in 0..spline.segment_count() {
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let direct = spline.point_at(segment, t).unwrap();
                let construction = spline.construction_at(segment, t).unwrap();
                assert_close2(direct, construction.point, 1e-9);
            }
        }
    }

    #[test]
    fn spline_is_c0_continuous() {
        let spline = presets::spline_demo();
        for segment in 0..spline.segment_count() - 1 {
            assert_eq!(
                spline.point_at(segment, 1.0).unwrap(),
                spline.point_at(segment + 1, 0.0).unwrap(),
            );
        }
    }

    #[test]
    fn spline_locates_global_parameter() {
        let spline = presets::spline_demo();
        assert_eq!(spline.segment_count(), 5);
        assert_eq!(spline.locate(0.0), Some((0, 0.0)));
        assert_eq!(spline.locate(0.5), Some((2, 0.5)));
        // The very end lands on the last segment instead of falling off
        assert_eq!(spline.locate(1.0), Some((4, 1.0)));
    }

    #[test]
    fn spline_starts_and_ends_on_boundary_points() {
        // The duplicated boundary points pin the curve to the polygon's ends
        let spline = presets::spline_demo();
        let polygon = spline.polygon();
        assert_eq!(spline.point_at(0, 0.0).unwrap(), polygon[0]);
        let last = spline.segment_count() - 1;
        assert_eq!(
            spline.point_at(last, 1.0).unwrap(),
            polygon[polygon.len() - 1]
        );
    }

    #[test]
    fn spline_polyline_reaches_global_max_t() {
        let spline = presets::spline_demo();
        let polyline = spline.polyline(0.73, 0.01);
        let (segment, t) = spline.locate(0.73).unwrap();
        assert_eq!(
            polyline[polyline.len() - 1],
            spline.point_at(segment, t).unwrap()
        );
        assert_eq!(polyline[0], spline.point_at(0, 0.0).unwrap());
    }

    #[test]
    fn spline_without_points_is_a_no_op() {
        let spline = UniformQuadSpline::<f64>::from_polygon(Vec::new());
        assert_eq!(spline.segment_count(), 0);
        assert_eq!(spline.locate(0.5), None);
        assert_eq!(spline.point_at(0, 0.5), None);
        assert_eq!(spline.construction_at(0, 0.5), None);
        assert!(spline.polyline(1.0, 0.01).is_empty());
    }

    #[test]
    fn surface_interpolates_corners() {
        let grid = presets::surface_demo();
        assert_eq!(grid.evaluate(0.0, 0.0), *grid.get(0, 0));
        assert_eq!(
            grid.evaluate(1.0, 1.0),
            *grid.get(grid.rows() - 1, grid.cols() - 1)
        );
        assert_eq!(grid.evaluate(1.0, 0.0), *grid.get(0, grid.cols() - 1));
        assert_eq!(grid.evaluate(0.0, 1.0), *grid.get(grid.rows() - 1, 0));
    }

    #[test]
    fn surface_2x2_is_bilinear() {
        let p00 = Vector3::new(0.0, 0.0, 0.0);
        let p01 = Vector3::new(10.0, 2.0, 0.0);
        let p10 = Vector3::new(0.0, 3.0, 10.0);
        let p11 = Vector3::new(10.0, -1.0, 10.0);
        let grid = ControlGrid::from_rows(vec![vec![p00, p01], vec![p10, p11]]).unwrap();

        for i in 0..=4 {
            for j in 0..=4 {
                let u = i as f64 / 4.0;
                let v = j as f64 / 4.0;
                let bilinear = p00 * (1.0 - u) * (1.0 - v)
                    + p01 * u * (1.0 - v)
                    + p10 * (1.0 - u) * v
                    + p11 * u * v;
                assert_close3(grid.evaluate(u, v), bilinear, 1e-12);
            }
        }
    }

    #[test]
    fn surface_rows_then_columns_is_symmetric() {
        let grid = presets::surface_demo();
        let transposed = grid.transposed();
        for i in 0..=5 {
            for j in 0..=5 {
                let u = i as f64 / 5.0;
                let v = j as f64 / 5.0;
                assert_close3(grid.evaluate(u, v), transposed.evaluate(v, u), 1e-9);
            }
        }
    }

    #[test]
    fn surface_construction_exposes_both_stages() {
        let grid = presets::surface_demo();
        let construction = grid.construction_at(0.3, 0.7);

        assert_eq!(construction.row_pyramids.len(), grid.rows());
        for (r, pyramid) in construction.row_pyramids.iter().enumerate() {
            assert_eq!(pyramid.len(), grid.cols());
            assert_eq!(&pyramid[0][..], grid.row(r));
            assert_eq!(pyramid.tip(), Some(&construction.row_points[r]));
        }

        assert_eq!(construction.column_pyramid.len(), grid.rows());
        assert_eq!(
            construction.column_pyramid.tip(),
            Some(&grid.evaluate(0.3, 0.7))
        );
    }

    #[test]
    fn sampled_grid_is_reproducible() {
        let a = ControlGrid::<f64>::sampled(4, 6, 100.0, 50.0).unwrap();
        let b = ControlGrid::<f64>::sampled(4, 6, 100.0, 50.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows(), 4);
        assert_eq!(a.cols(), 6);

        // Boundary points sit on the base plane, the center bulges up
        assert_eq!(a.get(0, 0).y, 0.0);
        assert!(a.get(2, 3).y > 0.0);

        // Centered lattice
        assert_eq!(a.get(0, 0).x, -250.0);
        assert_eq!(a.get(0, 5).x, 250.0);
        assert_eq!(a.get(0, 0).z, -150.0);
        assert_eq!(a.get(3, 0).z, 150.0);
    }

    #[test]
    fn grid_construction_is_validated() {
        let row = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)];
        assert_eq!(
            ControlGrid::from_rows(vec![row.clone()]),
            Err(GridError::TooSmall { rows: 1, cols: 2 })
        );
        assert_eq!(
            ControlGrid::<f64>::sampled(2, 1, 1.0, 1.0),
            Err(GridError::TooSmall { rows: 2, cols: 1 })
        );

        let short = vec![Vector3::new(0.0, 0.0, 0.0)];
        assert_eq!(
            ControlGrid::from_rows(vec![row, short]),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            })
        );
    }
}
