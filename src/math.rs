//! Small numeric kernel shared by all evaluators.

use nalgebra::{RealField, SVector};
use num::One;
use std::ops::Add;

/// Factorials of 0 through 20, the largest that fit into a `u64`.
const FACTORIALS: [u64; 21] = {
    let mut table = [1u64; 21];
    let mut n = 1;
    while n < 21 {
        table[n] = table[n - 1] * n as u64;
        n += 1;
    }
    table
};

/// Computes `n!`.
///
/// Backed by a precomputed table instead of a mutable cache, since the same
/// small degrees are hit over and over each frame.
///
/// **Panics for `n > 20`** as the result wouldn't fit into a `u64`.
/// Curve degrees are nowhere near that bound.
pub fn factorial(n: usize) -> u64 {
    FACTORIALS[n]
}

/// Computes the binomial coefficient `n choose k` as `n! / (k! (n-k)!)`.
///
/// Requires `k <= n <= 20`.
pub fn binomial_coefficient(n: usize, k: usize) -> u64 {
    debug_assert!(k <= n);
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Computes a given layer of pascal's triangle in the scalar type itself.
///
/// Rational evaluation sums weighted Bernstein bases over a generic scalar,
/// so the coefficients are built by repeated addition instead of being
/// converted from integers.
pub fn pascal_row<N>(layer: usize) -> Vec<N>
where
    N: Add<Output = N> + One + Clone,
{
    let one = N::one();
    let mut old_layer = Vec::with_capacity(layer + 1);
    let mut new_layer = Vec::with_capacity(layer + 1);
    new_layer.push(N::one());

    for _ in 0..layer {
        old_layer.clone_from(&new_layer);

        new_layer.push(one.clone());
        let get = |i: usize| old_layer.get(i).unwrap_or(&one).clone();
        for i in 1..new_layer.len() - 1 {
            new_layer[i] = get(i - 1) + get(i);
        }
    }

    new_layer
}

/// Builds a scalar from a small count by repeated addition, so formulas
/// treating a count as a scalar stay generic.
pub(crate) fn usize_to_scalar<T: RealField>(n: usize) -> T {
    let mut k = T::zero();
    for _ in 0..n {
        k += T::one();
    }
    k
}

/// Linear interpolation `(1 - t) * a + t * b`, applied componentwise.
pub fn lerp<T: RealField, const D: usize>(
    a: &SVector<T, D>,
    b: &SVector<T, D>,
    t: T,
) -> SVector<T, D> {
    a * (T::one() - t.clone()) + b * t
}
