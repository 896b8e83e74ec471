//! Rational (NURBS) Bézier curves with per-point weights.
//!
//! Two equivalent strategies are implemented: [`evaluate`] sums the weighted
//! Bernstein basis directly, while [`levels`] runs de Casteljau in
//! homogeneous coordinates and projects every level back to Cartesian space,
//! since intermediate rational points are only meaningful that way.
//!
//! [`evaluate`]: RationalBezierCurve::evaluate
//! [`levels`]: RationalBezierCurve::levels

use crate::bezier::Pyramid;
use crate::math::pascal_row;
use nalgebra::{RealField, Scalar, Vector2, Vector3};
use smallvec::SmallVec;

/// A planar Bézier curve with a positive weight attached to each control
/// point.
///
/// A missing weight means 1: [`with_weights`] pads a short weight list with
/// ones, so the "weightless control point" rule is part of construction
/// instead of an optional field on every point.
///
/// Weights are read as-is. The editing layer is expected to keep them
/// positive; a non-positive weight can drive the basis sum to zero and the
/// evaluation to NaN/infinity, which is a caller validation failure, not
/// something this type clamps away.
///
/// [`with_weights`]: RationalBezierCurve::with_weights
#[derive(Clone, Debug, PartialEq)]
pub struct RationalBezierCurve<T: Scalar> {
    points: SmallVec<[Vector2<T>; 4]>,
    weights: SmallVec<[T; 4]>,
}

impl<T: RealField> RationalBezierCurve<T> {
    /// Creates a curve with every weight set to 1, i.e. a plain Bézier curve.
    pub fn new(points: SmallVec<[Vector2<T>; 4]>) -> Self {
        let weights = points.iter().map(|_| T::one()).collect();
        RationalBezierCurve { points, weights }
    }

    /// Creates a curve from control points and their weights.
    ///
    /// A weight list shorter than the point list is padded with ones,
    /// surplus weights are dropped.
    pub fn with_weights(points: SmallVec<[Vector2<T>; 4]>, weights: impl IntoIterator<Item = T>) -> Self {
        let mut weights: SmallVec<[T; 4]> =
            weights.into_iter().take(points.len()).collect();
        while weights.len() < points.len() {
            weights.push(T::one());
        }
        RationalBezierCurve { points, weights }
    }

    /// Returns a curve's degree which is one lower then its number of control points
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// The control points.
    pub fn points(&self) -> &[Vector2<T>] {
        &self.points
    }

    /// The weights, one per control point.
    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    /// Moves a control point. No-op for an out-of-range index.
    pub fn set_point(&mut self, i: usize, point: Vector2<T>) {
        if let Some(slot) = self.points.get_mut(i) {
            *slot = point;
        }
    }

    /// Changes a weight. No-op for an out-of-range index.
    pub fn set_weight(&mut self, i: usize, weight: T) {
        if let Some(slot) = self.weights.get_mut(i) {
            *slot = weight;
        }
    }

    /// Get the point on the curve at position `t`.
    ///
    /// Sums the weighted Bernstein basis:
    /// `Σ C(n,i) (1-t)^(n-i) t^i w_i P_i / Σ C(n,i) (1-t)^(n-i) t^i w_i`.
    ///
    /// Returns `None` for an empty curve and the sole point for a single
    /// control point. `t` isn't clamped.
    pub fn evaluate(&self, t: T) -> Option<Vector2<T>> {
        match self.points.len() {
            0 => return None,
            1 => return Some(self.points[0].clone()),
            _ => {}
        }
        let n = self.degree();
        let coefficients = pascal_row::<T>(n);
        let t_inv = T::one() - t.clone();

        let mut sum = Vector2::zeros();
        let mut sum_w = T::zero();
        for (i, (point, weight)) in self.points.iter().zip(self.weights.iter()).enumerate() {
            let basis = coefficients[i].clone()
                * t_inv.clone().powi((n - i) as i32)
                * t.clone().powi(i as i32);
            let weighted = basis * weight.clone();
            sum += point * weighted.clone();
            sum_w += weighted;
        }
        Some(sum / sum_w)
    }

    /// Computes the full pyramid of interpolation levels at position `t`.
    ///
    /// Lifts the control points to homogeneous coordinates `(x w, y w, w)`,
    /// runs ordinary de Casteljau component-wise including the weight
    /// channel, and divides each level's x/y by its w so the overlay can be
    /// drawn in Cartesian space. Level 0 are the control points.
    pub fn levels(&self, t: T) -> Pyramid<T, 2> {
        let mut levels: Vec<SmallVec<[Vector2<T>; 4]>> = Vec::with_capacity(self.points.len());
        if self.points.is_empty() {
            return Pyramid(levels);
        }
        levels.push(self.points.iter().cloned().collect());

        let mut current: SmallVec<[Vector3<T>; 4]> = self
            .points
            .iter()
            .zip(self.weights.iter())
            .map(|(p, w)| {
                Vector3::new(p.x.clone() * w.clone(), p.y.clone() * w.clone(), w.clone())
            })
            .collect();

        while current.len() > 1 {
            let t_inv = T::one() - t.clone();
            let mut next: SmallVec<[Vector3<T>; 4]> = SmallVec::with_capacity(current.len() - 1);
            for (p, q) in current[..current.len() - 1]
                .iter()
                .zip(current[1..].iter())
            {
                next.push(p * t_inv.clone() + q * t.clone());
            }
            levels.push(
                next.iter()
                    .map(|h| Vector2::new(h.x.clone() / h.z.clone(), h.y.clone() / h.z.clone()))
                    .collect(),
            );
            current = next;
        }

        Pyramid(levels)
    }
}
