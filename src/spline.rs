//! Uniform quadratic B-splines over a control polygon.
//!
//! Each segment is a quadratic arc influenced by 3 consecutive control
//! points with the uniform basis
//!
//! ```text
//! b0(t) = 0.5 (1-t)^2
//! b1(t) = 0.5 + t - t^2
//! b2(t) = 0.5 t^2
//! ```
//!
//! The first and last control points are duplicated so the curve starts and
//! ends exactly on them. The duplicates aren't stored: [`UniformQuadSpline`]
//! keeps only the visible polygon and maps stored indices onto it, which
//! makes the "boundary duplicates are identical and immutable" invariant
//! hold by construction instead of by convention.

use crate::math::{lerp, usize_to_scalar};
use nalgebra::{RealField, Scalar, Vector2};

/// A uniform quadratic B-spline through a polygon of 2d control points.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformQuadSpline<T: Scalar> {
    polygon: Vec<Vector2<T>>,
}

/// The midpoint ("hat") construction of a point on a spline segment.
///
/// `m1` and `m2` are the midpoints of the segment's outer legs, `q0` and
/// `q1` interpolate along the hat `m1 -> p1 -> m2` and `point` interpolates
/// between them. `point` equals the basis evaluation exactly.
#[derive(Clone, Debug, PartialEq)]
pub struct SplineConstruction<T: Scalar> {
    /// Midpoint of the segment's first two control points.
    pub m1: Vector2<T>,
    /// Midpoint of the segment's last two control points.
    pub m2: Vector2<T>,
    /// Interpolation between `m1` and the middle control point.
    pub q0: Vector2<T>,
    /// Interpolation between the middle control point and `m2`.
    pub q1: Vector2<T>,
    /// The point on the curve.
    pub point: Vector2<T>,
}

impl<T: Scalar> UniformQuadSpline<T> {
    /// Creates a spline from its visible control polygon.
    ///
    /// The duplicated boundary points are implied; an empty polygon yields a
    /// spline with no segments which all evaluators treat as a no-op.
    pub fn from_polygon(polygon: Vec<Vector2<T>>) -> Self {
        UniformQuadSpline { polygon }
    }

    /// The visible control polygon, without the implied duplicates.
    pub fn polygon(&self) -> &[Vector2<T>] {
        &self.polygon
    }

    /// Moves a control point. No-op for an out-of-range index.
    pub fn set_point(&mut self, i: usize, point: Vector2<T>) {
        if let Some(slot) = self.polygon.get_mut(i) {
            *slot = point;
        }
    }

    /// Number of curve segments, i.e. stored control points minus 2.
    ///
    /// With the two implied duplicates the stored count is `polygon + 2`, so
    /// this equals the polygon length.
    pub fn segment_count(&self) -> usize {
        self.polygon.len()
    }

    /// The control point at a stored index, resolving the duplicates.
    ///
    /// Stored index 0 and the last stored index alias the polygon's first
    /// and last point respectively.
    fn control(&self, stored: usize) -> &Vector2<T> {
        let i = stored.saturating_sub(1).min(self.polygon.len() - 1);
        &self.polygon[i]
    }
}

impl<T: RealField> UniformQuadSpline<T> {
    /// Maps a global parameter in `[0, 1]` onto a segment and a local `t`.
    ///
    /// `max_t = 1` is clamped onto the last segment with `t = 1` instead of
    /// falling off the end; `None` if the spline has no segments.
    pub fn locate(&self, max_t: T) -> Option<(usize, T)> {
        let segments = self.segment_count();
        if segments == 0 {
            return None;
        }
        let total = max_t * usize_to_scalar::<T>(segments);
        // floor(total) as a segment index, clamped onto the last segment
        let mut index = 0;
        while index + 1 < segments && usize_to_scalar::<T>(index + 1) <= total {
            index += 1;
        }
        let local = total - usize_to_scalar::<T>(index);
        if local > T::one() {
            return Some((index, T::one()));
        }
        Some((index, local))
    }

    /// Get the point on segment `segment` at local position `t`.
    ///
    /// Applies the uniform quadratic basis directly; `None` for an
    /// out-of-range segment.
    pub fn point_at(&self, segment: usize, t: T) -> Option<Vector2<T>> {
        if segment >= self.segment_count() {
            return None;
        }
        let half = T::from_subset(&0.5);
        let t_inv = T::one() - t.clone();
        let b0 = half.clone() * t_inv.clone() * t_inv;
        let b1 = half.clone() + t.clone() - t.clone() * t.clone();
        let b2 = half * t.clone() * t;
        Some(
            self.control(segment) * b0
                + self.control(segment + 1) * b1
                + self.control(segment + 2) * b2,
        )
    }

    /// Computes the midpoint construction of the point on segment `segment`
    /// at local position `t`.
    pub fn construction_at(&self, segment: usize, t: T) -> Option<SplineConstruction<T>> {
        if segment >= self.segment_count() {
            return None;
        }
        let half = T::from_subset(&0.5);
        let p0 = self.control(segment);
        let p1 = self.control(segment + 1);
        let p2 = self.control(segment + 2);

        let m1 = (p0 + p1) * half.clone();
        let m2 = (p1 + p2) * half;
        let q0 = lerp(&m1, p1, t.clone());
        let q1 = lerp(p1, &m2, t.clone());
        let point = lerp(&q0, &q1, t);

        Some(SplineConstruction { m1, m2, q0, q1, point })
    }

    /// Traces the curve from its start up to global parameter `max_t`.
    ///
    /// Walks every fully traversed segment and the final partial one,
    /// sampling each at fixed `step` in local `t` and always emitting the
    /// exact segment/partial endpoint. When the step accumulation lands on
    /// a segment's end exactly, that endpoint isn't repeated.
    pub fn polyline(&self, max_t: T, step: T) -> Vec<Vector2<T>> {
        let Some((last_segment, last_t)) = self.locate(max_t) else {
            return Vec::new();
        };
        let mut points = Vec::new();
        for segment in 0..=last_segment {
            let segment_max = if segment < last_segment {
                T::one()
            } else {
                last_t.clone()
            };
            let mut t = T::zero();
            while t <= segment_max {
                if let Some(point) = self.point_at(segment, t.clone()) {
                    points.push(point);
                }
                t += step.clone();
            }
            if let Some(end) = self.point_at(segment, segment_max) {
                if points.last() != Some(&end) {
                    points.push(end);
                }
            }
        }
        points
    }
}
