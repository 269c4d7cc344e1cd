//! Neighbor-shifted views over ghost-padded buffers.
//!
//! Stencil arithmetic is written as elementwise operations between the
//! interior view and translated copies of it, instead of manual ghost-offset
//! index bookkeeping at every use site.

use ndarray::{Array2, ArrayView2, ArrayViewMut2, s};

use crate::error::{Error, Result};
use crate::mesh::grid::Grid2d;

/// Read-only stencil-indexed window over a padded field buffer.
pub struct StencilView<'a> {
    data: &'a Array2<f64>,
    grid: &'a Grid2d,
}

impl<'a> StencilView<'a> {
    pub fn new(data: &'a Array2<f64>, grid: &'a Grid2d) -> Result<StencilView<'a>> {
        if data.dim() != grid.padded_shape() {
            return Err(Error::ShapeMismatch {
                got: data.dim(),
                want: grid.padded_shape(),
            });
        }
        Ok(StencilView { data, grid })
    }

    /// The sub-view over exactly the non-ghost region, shape `(nx, ny)`.
    pub fn interior(&self) -> ArrayView2<'a, f64> {
        let g = self.grid;
        self.data.slice(s![g.ilo..=g.ihi, g.jlo..=g.jhi])
    }

    /// The interior region translated by `(di, dj)` cells, same shape as
    /// `interior()`. Offsets beyond the ghost width are a boundary-design
    /// error and fail fast.
    pub fn shifted(&self, di: isize, dj: isize) -> Result<ArrayView2<'a, f64>> {
        let g = self.grid;
        let ng = g.ng as isize;
        if di.abs() > ng || dj.abs() > ng {
            return Err(Error::StencilOffsetOutOfRange {
                di,
                dj,
                ng: g.ng,
            });
        }
        let i0 = (g.ilo as isize + di) as usize;
        let j0 = (g.jlo as isize + dj) as usize;
        Ok(self.data.slice(s![i0..i0 + g.nx, j0..j0 + g.ny]))
    }

    /// Right-neighbor shorthand: `ip(1)` reads each interior cell's
    /// `(+1, 0)` neighbor.
    pub fn ip(&self, shift: isize) -> Result<ArrayView2<'a, f64>> {
        self.shifted(shift, 0)
    }

    /// Up-neighbor shorthand along the second axis.
    pub fn jp(&self, shift: isize) -> Result<ArrayView2<'a, f64>> {
        self.shifted(0, shift)
    }
}

/// Mutable counterpart of [`StencilView`]; assignment through
/// `interior_mut` mutates the field in place.
pub struct StencilViewMut<'a> {
    data: &'a mut Array2<f64>,
    grid: &'a Grid2d,
}

impl<'a> StencilViewMut<'a> {
    pub fn new(data: &'a mut Array2<f64>, grid: &'a Grid2d) -> Result<StencilViewMut<'a>> {
        if data.dim() != grid.padded_shape() {
            return Err(Error::ShapeMismatch {
                got: data.dim(),
                want: grid.padded_shape(),
            });
        }
        Ok(StencilViewMut { data, grid })
    }

    pub fn interior_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        let g = self.grid;
        self.data
            .slice_mut(s![g.ilo..=g.ihi, g.jlo..=g.jhi])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> (Grid2d, Array2<f64>) {
        let g = Grid2d::new(4, 3, 2, 0.0, 1.0, 0.0, 1.0).unwrap();
        // a[i, j] = 10*i + j over the whole padded buffer
        let mut a = g.scratch_array();
        for i in 0..g.qx() {
            for j in 0..g.qy() {
                a[[i, j]] = 10.0 * i as f64 + j as f64;
            }
        }
        (g, a)
    }

    #[test]
    fn test_shape_invariance() {
        let (g, a) = ramp_grid();
        let v = StencilView::new(&a, &g).unwrap();
        let ng = g.ng as isize;
        for di in -ng..=ng {
            for dj in -ng..=ng {
                assert_eq!(v.shifted(di, dj).unwrap().dim(), (g.nx, g.ny));
            }
        }
        assert_eq!(v.interior().dim(), (g.nx, g.ny));
    }

    #[test]
    fn test_shift_reads_neighbors() {
        let (g, a) = ramp_grid();
        let v = StencilView::new(&a, &g).unwrap();
        let c = v.interior();
        let right = v.ip(1).unwrap();
        let up = v.jp(1).unwrap();
        for i in 0..g.nx {
            for j in 0..g.ny {
                assert_eq!(right[[i, j]] - c[[i, j]], 10.0);
                assert_eq!(up[[i, j]] - c[[i, j]], 1.0);
            }
        }
    }

    #[test]
    fn test_offset_beyond_ghosts_fails() {
        let (g, a) = ramp_grid();
        let v = StencilView::new(&a, &g).unwrap();
        assert!(matches!(
            v.shifted(3, 0),
            Err(Error::StencilOffsetOutOfRange { .. })
        ));
        assert!(v.shifted(-2, 2).is_ok());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let (g, _) = ramp_grid();
        let wrong = Array2::<f64>::zeros((3, 3));
        assert!(matches!(
            StencilView::new(&wrong, &g),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_interior_mut_writes_through() {
        let (g, mut a) = ramp_grid();
        StencilViewMut::new(&mut a, &g)
            .unwrap()
            .interior_mut()
            .fill(-1.0);
        assert_eq!(a[[g.ilo, g.jlo]], -1.0);
        assert_eq!(a[[g.ihi, g.jhi]], -1.0);
        // ghosts untouched
        assert_eq!(a[[0, 0]], 0.0);
    }
}
