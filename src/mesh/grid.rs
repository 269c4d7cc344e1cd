use ndarray::Array2;

use crate::error::{Error, Result};

/// Immutable geometry of a uniform cartesian grid with ghost padding.
///
/// Interior cells occupy the absolute index range `ilo..=ihi` x `jlo..=jhi`
/// inside buffers of padded shape `(nx + 2*ng, ny + 2*ng)`. The first and
/// last `ng` indices along each axis are ghost cells and hold no
/// authoritative state between boundary fills.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2d {
    pub nx: usize,
    pub ny: usize,
    pub ng: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub dx: f64,
    pub dy: f64,
    pub ilo: usize,
    pub ihi: usize,
    pub jlo: usize,
    pub jhi: usize,
}

impl Grid2d {
    pub fn new(
        nx: usize,
        ny: usize,
        ng: usize,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    ) -> Result<Grid2d> {
        if nx == 0 || ny == 0 {
            return Err(Error::InvalidParameter(format!(
                "interior cell counts must be positive, got nx={nx}, ny={ny}"
            )));
        }
        if ng == 0 {
            return Err(Error::InvalidParameter(
                "ghost width must be at least 1".to_string(),
            ));
        }
        // ghost fills copy ng-wide interior slabs, so the interior must be
        // at least that wide along each axis
        if nx < ng || ny < ng {
            return Err(Error::InvalidParameter(format!(
                "interior must span at least the ghost width: nx={nx}, ny={ny}, ng={ng}"
            )));
        }
        if xmax <= xmin || ymax <= ymin {
            return Err(Error::InvalidParameter(format!(
                "degenerate domain [{xmin}, {xmax}] x [{ymin}, {ymax}]"
            )));
        }
        let dx = (xmax - xmin) / nx as f64;
        let dy = (ymax - ymin) / ny as f64;
        Ok(Grid2d {
            nx,
            ny,
            ng,
            xmin,
            xmax,
            ymin,
            ymax,
            dx,
            dy,
            ilo: ng,
            ihi: ng + nx - 1,
            jlo: ng,
            jhi: ng + ny - 1,
        })
    }

    /// Padded buffer extent along x.
    pub fn qx(&self) -> usize {
        self.nx + 2 * self.ng
    }

    /// Padded buffer extent along y.
    pub fn qy(&self) -> usize {
        self.ny + 2 * self.ng
    }

    pub fn padded_shape(&self) -> (usize, usize) {
        (self.qx(), self.qy())
    }

    /// A freshly zeroed buffer of the padded grid shape.
    pub fn scratch_array(&self) -> Array2<f64> {
        Array2::zeros(self.padded_shape())
    }

    /// Cell-center x coordinate of absolute (ghost-inclusive) index `i`.
    pub fn x(&self, i: usize) -> f64 {
        self.xmin + (i as f64 - self.ng as f64 + 0.5) * self.dx
    }

    /// Cell-center y coordinate of absolute (ghost-inclusive) index `j`.
    pub fn y(&self, j: usize) -> f64 {
        self.ymin + (j as f64 - self.ng as f64 + 0.5) * self.dy
    }

    pub fn cell_area(&self) -> f64 {
        self.dx * self.dy
    }
}
