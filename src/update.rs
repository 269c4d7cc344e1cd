//! Conservative finite-volume update kernel.

use ndarray::Array2;

use crate::error::Result;
use crate::mesh::grid::Grid2d;
use crate::mesh::stencil::{StencilView, StencilViewMut};

/// Difference low-face fluxes into the discrete time-derivative of the
/// cell-averaged state:
///
/// ```text
/// k = (Fx - Fx.shifted(+1, 0)) / dx + (Fy - Fy.shifted(0, +1)) / dy
/// ```
///
/// `fx` and `fy` are padded-shape arrays holding the flux crossing the low
/// face of each cell along the respective axis; the `(+1)` shift reads the
/// flux leaving through the high face. The interior sum of `k`, weighted by
/// cell area, telescopes to boundary fluxes only, so
/// `state + dt * k` is conservative regardless of how the fluxes were built.
pub fn flux_divergence(grid: &Grid2d, fx: &Array2<f64>, fy: &Array2<f64>) -> Result<Array2<f64>> {
    let fx = StencilView::new(fx, grid)?;
    let fy = StencilView::new(fy, grid)?;

    let div = (&fx.interior() - &fx.ip(1)?) / grid.dx + (&fy.interior() - &fy.jp(1)?) / grid.dy;

    let mut k = grid.scratch_array();
    StencilViewMut::new(&mut k, grid)?.interior_mut().assign(&div);
    Ok(k)
}
