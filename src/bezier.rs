//! Polynomial Bézier curves evaluated with de Casteljau's algorithm.

use nalgebra::{RealField, SVector, Scalar};
use smallvec::SmallVec;
use std::ops::{Deref, DerefMut};

/// One round of interpolation: an ordered row of points.
///
/// Cubic curves and lower stay on the stack.
pub type Level<T, const D: usize> = SmallVec<[SVector<T, D>; 4]>;

/// A Bézier curve of arbitrary degree given by its control points.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierCurve<T: Scalar, const D: usize>(pub Level<T, D>);

/// A planar Bézier curve.
pub type BezierCurve2<T> = BezierCurve<T, 2>;
/// A Bézier curve in 3d space.
pub type BezierCurve3<T> = BezierCurve<T, 3>;

impl<T: Scalar, const D: usize> Deref for BezierCurve<T, D> {
    type Target = Level<T, D>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<T: Scalar, const D: usize> DerefMut for BezierCurve<T, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Scalar, const D: usize> BezierCurve<T, D> {
    /// Returns a curve's degree which is one lower then its number of control points
    pub fn degree(&self) -> usize {
        self.len() - 1
    }
}

impl<T: RealField, const D: usize> BezierCurve<T, D> {
    /// Get the point on the curve at position `t`.
    ///
    /// Runs de Casteljau's algorithm iteratively with two scratch buffers
    /// instead of literal recursion.
    ///
    /// `t` is typically between 0 and 1 but isn't clamped, so callers may
    /// extrapolate. A single control point is returned unchanged; an empty
    /// curve yields `None` so a render loop can simply skip the draw.
    pub fn evaluate(&self, t: T) -> Option<SVector<T, D>> {
        evaluate_slice(&self.0, t)
    }

    /// Computes the full pyramid of interpolation levels at position `t`.
    ///
    /// Level 0 are the control points themselves, level `k` holds `N - k`
    /// points and the final level is the single point on the curve. Used to
    /// drive the step-by-step construction overlay.
    pub fn levels(&self, t: T) -> Pyramid<T, D> {
        levels_of_slice(&self.0, t)
    }

    /// Traces the curve from 0 to `max_t` as a dense polyline.
    ///
    /// Emits a point every `step` and always ends with the exact point at
    /// `max_t`, so the trace never stops short due to step rounding. When
    /// the step accumulation lands on `max_t` exactly, the endpoint isn't
    /// repeated.
    pub fn polyline(&self, max_t: T, step: T) -> Vec<SVector<T, D>> {
        if self.len() < 2 {
            return Vec::new();
        }
        let mut points = Vec::new();
        let mut t = T::zero();
        while t <= max_t {
            if let Some(point) = self.evaluate(t.clone()) {
                points.push(point);
            }
            t += step.clone();
        }
        if let Some(end) = self.evaluate(max_t) {
            if points.last() != Some(&end) {
                points.push(end);
            }
        }
        points
    }
}

/// Performs a single step of de Casteljau's algorithm
///
/// i.e. combines `n` points into `n - 1` points by computing
/// `(1 - t) * A + t * B` on consecutive points `A` and `B`
pub(crate) fn casteljau_step<T: RealField, const D: usize>(
    input: &Level<T, D>,
    output: &mut Level<T, D>,
    t: T,
) {
    output.clear();
    let len = input.len();
    let t_inv = T::one() - t.clone();
    for (p, q) in input[0..len - 1].iter().zip(input[1..len].iter()) {
        output.push(p * t_inv.clone() + q * t.clone());
    }
}

/// De Casteljau on a borrowed row of points, shared with the surface
/// evaluator which runs it once per grid row.
pub(crate) fn evaluate_slice<T: RealField, const D: usize>(
    points: &[SVector<T, D>],
    t: T,
) -> Option<SVector<T, D>> {
    match points {
        [] => None,
        [a] => Some(a.clone()),
        _ => {
            let mut old_points: Level<T, D> = points.iter().cloned().collect();
            let mut new_points: Level<T, D> = SmallVec::with_capacity(points.len() - 1);
            let mut buffers = (&mut old_points, &mut new_points);
            while buffers.0.len() > 1 {
                casteljau_step(buffers.0, buffers.1, t.clone());
                buffers = (buffers.1, buffers.0);
            }
            Some(buffers.0[0].clone())
        }
    }
}

pub(crate) fn levels_of_slice<T: RealField, const D: usize>(
    points: &[SVector<T, D>],
    t: T,
) -> Pyramid<T, D> {
    let mut levels: Vec<Level<T, D>> = Vec::with_capacity(points.len());
    if points.is_empty() {
        return Pyramid(levels);
    }
    levels.push(points.iter().cloned().collect());
    while levels[levels.len() - 1].len() > 1 {
        let current = &levels[levels.len() - 1];
        let mut next = SmallVec::with_capacity(current.len() - 1);
        casteljau_step(current, &mut next, t.clone());
        levels.push(next);
    }
    Pyramid(levels)
}

/// The full sequence of interpolation levels produced by one evaluation.
///
/// Purely a visualization artifact: it is rebuilt from scratch on every call
/// and carries no identity beyond the order of its levels.
#[derive(Clone, Debug, PartialEq)]
pub struct Pyramid<T: Scalar, const D: usize>(pub Vec<Level<T, D>>);

impl<T: Scalar, const D: usize> Deref for Pyramid<T, D> {
    type Target = Vec<Level<T, D>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Scalar, const D: usize> Pyramid<T, D> {
    /// The point on the curve, i.e. the singleton of the final level.
    pub fn tip(&self) -> Option<&SVector<T, D>> {
        self.0.last().and_then(|level| level.first())
    }
}
