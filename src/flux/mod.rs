//! Edge-flux evaluation.
//!
//! The update kernel and the time integrator only see this trait; the
//! reconstruction/upwinding strategy behind it is replaceable.

mod upwind;

pub use upwind::UpwindFlux;

use ndarray::Array2;

use crate::error::Result;
use crate::mesh::data::{CellCenteredData, FieldId};

/// Computes low-face fluxes for one field along each axis.
///
/// Both returned arrays have the padded grid shape; faces
/// `ilo..=ihi+1` x `jlo..=jhi+1` must hold valid values so the kernel can
/// difference them through a `(+1)` shift. Evaluators read the state they
/// are passed and never mutate it; `dt` is available for evaluators that
/// time-average or characteristic-trace their fluxes.
pub trait FluxEvaluator {
    fn fluxes(
        &self,
        data: &CellCenteredData,
        field: FieldId,
        dt: f64,
    ) -> Result<(Array2<f64>, Array2<f64>)>;
}
