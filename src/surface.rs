//! Tensor-product Bézier surfaces over a rectangular control grid.

use crate::bezier::{evaluate_slice, levels_of_slice, Level, Pyramid};
use crate::math::usize_to_scalar;
use nalgebra::{RealField, Scalar, Vector3};
use thiserror::Error;

/// Construction of a control grid failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A surface needs at least 2 rows and 2 columns of control points.
    #[error("grid needs at least 2x2 control points, got {rows}x{cols}")]
    TooSmall {
        /// Rows handed to the constructor.
        rows: usize,
        /// Columns handed to the constructor.
        cols: usize,
    },

    /// Every row must have the same number of columns.
    #[error("row {row} has {got} points, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },
}

/// A rectangular R x C grid of 3d control points, stored row-major.
///
/// `R, C >= 2` and equal row lengths are enforced on construction, so the
/// evaluators can assume a well-formed grid per call. The grid bounds the
/// surface's bidegree at `(R - 1, C - 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlGrid<T: Scalar> {
    points: Vec<Vector3<T>>,
    rows: usize,
    cols: usize,
}

/// The two-stage construction of a point on the surface.
///
/// Stage one reduces every row at `u`, stage two reduces the resulting
/// column at `v`; the column pyramid's tip is the point on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConstruction<T: Scalar> {
    /// Per row, the full de Casteljau pyramid at `u`.
    pub row_pyramids: Vec<Pyramid<T, 3>>,
    /// The reduced point of each row, i.e. the tips of `row_pyramids`.
    pub row_points: Vec<Vector3<T>>,
    /// The pyramid of `row_points` at `v`.
    pub column_pyramid: Pyramid<T, 3>,
}

impl<T: Scalar> ControlGrid<T> {
    /// Creates a grid from its rows of control points.
    pub fn from_rows(rows: Vec<Vec<Vector3<T>>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let col_count = rows.first().map(Vec::len).unwrap_or(0);
        if row_count < 2 || col_count < 2 {
            return Err(GridError::TooSmall {
                rows: row_count,
                cols: col_count,
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(GridError::RaggedRow {
                    row: i,
                    expected: col_count,
                    got: row.len(),
                });
            }
        }
        Ok(ControlGrid {
            points: rows.into_iter().flatten().collect(),
            rows: row_count,
            cols: col_count,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The control points of row `r`.
    pub fn row(&self, r: usize) -> &[Vector3<T>] {
        &self.points[r * self.cols..(r + 1) * self.cols]
    }

    /// The control point at row `r`, column `c`.
    pub fn get(&self, r: usize, c: usize) -> &Vector3<T> {
        &self.points[r * self.cols + c]
    }

    /// Moves a control point, e.g. from a drag interaction.
    pub fn set(&mut self, r: usize, c: usize, point: Vector3<T>) {
        self.points[r * self.cols + c] = point;
    }

    /// Returns the grid with rows and columns swapped.
    pub fn transposed(&self) -> ControlGrid<T> {
        let mut points = Vec::with_capacity(self.points.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                points.push(self.get(r, c).clone());
            }
        }
        ControlGrid {
            points,
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl<T: RealField> ControlGrid<T> {
    /// Get the point on the surface at position `(u, v)`.
    ///
    /// Runs de Casteljau along each row at `u`, then along the resulting
    /// column of points at `v`. Row-then-column is the fixed convention; in
    /// exact arithmetic evaluating the transposed grid at `(v, u)` yields
    /// the same surface. Parameters aren't clamped.
    pub fn evaluate(&self, u: T, v: T) -> Vector3<T> {
        let column = self.reduce_rows(u);
        // rows >= 2, so the column can't be empty
        evaluate_slice(&column, v).unwrap_or_else(|| unreachable!())
    }

    /// Computes the two-stage construction at position `(u, v)`.
    ///
    /// Exposes every intermediate level of both reduction stages for the
    /// construction overlay.
    pub fn construction_at(&self, u: T, v: T) -> SurfaceConstruction<T> {
        let row_pyramids: Vec<Pyramid<T, 3>> = (0..self.rows)
            .map(|r| levels_of_slice(self.row(r), u.clone()))
            .collect();
        let row_points: Vec<Vector3<T>> = row_pyramids
            .iter()
            .map(|pyramid| pyramid.tip().cloned().unwrap_or_else(|| unreachable!()))
            .collect();
        let column_pyramid = levels_of_slice(&row_points, v);
        SurfaceConstruction {
            row_pyramids,
            row_points,
            column_pyramid,
        }
    }

    fn reduce_rows(&self, u: T) -> Level<T, 3> {
        (0..self.rows)
            .map(|r| evaluate_slice(self.row(r), u.clone()).unwrap_or_else(|| unreachable!()))
            .collect()
    }

    /// Generates a grid evenly spaced in x/z with a sinusoidal height field.
    ///
    /// The default session content: points sit on a `spacing`-wide lattice
    /// centered at the origin and are lifted by
    /// `amplitude * sin(i pi / (R-1)) * sin(j pi / (C-1))` with y up.
    /// Deterministic, so it doubles as a test fixture.
    pub fn sampled(
        rows: usize,
        cols: usize,
        spacing: T,
        amplitude: T,
    ) -> Result<Self, GridError> {
        if rows < 2 || cols < 2 {
            return Err(GridError::TooSmall { rows, cols });
        }
        let half = T::from_subset(&0.5);
        let offset_x = -(usize_to_scalar::<T>(cols - 1) * spacing.clone() * half.clone());
        let offset_z = -(usize_to_scalar::<T>(rows - 1) * spacing.clone() * half);

        let mut points = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            let fraction_i = usize_to_scalar::<T>(i) / usize_to_scalar::<T>(rows - 1);
            let z = offset_z.clone() + usize_to_scalar::<T>(i) * spacing.clone();
            for j in 0..cols {
                let fraction_j = usize_to_scalar::<T>(j) / usize_to_scalar::<T>(cols - 1);
                let x = offset_x.clone() + usize_to_scalar::<T>(j) * spacing.clone();
                let y = amplitude.clone()
                    * (fraction_i.clone() * T::pi()).sin()
                    * (fraction_j * T::pi()).sin();
                points.push(Vector3::new(x, y, z.clone()));
            }
        }
        Ok(ControlGrid {
            points,
            rows,
            cols,
        })
    }
}
