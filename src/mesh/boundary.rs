//! Ghost-cell fill policies.
//!
//! A policy mutates only the ghost region of a padded buffer; interior
//! values are never touched. Policies are selected by name from the
//! parameter file at setup time.

use ndarray::{Array2, s};

use crate::error::{Error, Result};
use crate::mesh::grid::Grid2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcPolicy {
    /// Wrap-around: ghosts copy the interior from the opposite side.
    Periodic,
    /// Zero-gradient: ghosts copy the nearest interior value.
    Outflow,
}

impl BcPolicy {
    pub fn from_name(name: &str) -> Result<BcPolicy> {
        match name {
            "periodic" => Ok(BcPolicy::Periodic),
            "outflow" => Ok(BcPolicy::Outflow),
            other => Err(Error::UnknownBoundary(other.to_string())),
        }
    }

    /// Populate the ghost cells of `field` from its interior values.
    ///
    /// The x sweep runs first and the y sweep copies full rows afterwards,
    /// so corner ghosts end up consistent for both policies.
    pub fn apply(&self, field: &mut Array2<f64>, grid: &Grid2d) {
        let (ng, ilo, ihi, jlo, jhi) = (grid.ng, grid.ilo, grid.ihi, grid.jlo, grid.jhi);
        match self {
            BcPolicy::Periodic => {
                let high = field.slice(s![ihi + 1 - ng..=ihi, ..]).to_owned();
                field.slice_mut(s![..ng, ..]).assign(&high);
                let low = field.slice(s![ilo..ilo + ng, ..]).to_owned();
                field.slice_mut(s![ihi + 1.., ..]).assign(&low);

                let high = field.slice(s![.., jhi + 1 - ng..=jhi]).to_owned();
                field.slice_mut(s![.., ..ng]).assign(&high);
                let low = field.slice(s![.., jlo..jlo + ng]).to_owned();
                field.slice_mut(s![.., jhi + 1..]).assign(&low);
            }
            BcPolicy::Outflow => {
                for i in 0..ng {
                    let edge = field.row(ilo).to_owned();
                    field.row_mut(i).assign(&edge);
                    let edge = field.row(ihi).to_owned();
                    field.row_mut(ihi + 1 + i).assign(&edge);
                }
                for j in 0..ng {
                    let edge = field.column(jlo).to_owned();
                    field.column_mut(j).assign(&edge);
                    let edge = field.column(jhi).to_owned();
                    field.column_mut(jhi + 1 + j).assign(&edge);
                }
            }
        }
    }
}
