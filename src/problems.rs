//! Initial-condition problems.
//!
//! Each problem populates the interior of an allocated container; ghost
//! cells are filled afterwards by the caller. Problems are picked from an
//! explicit registry by name.

use crate::error::{Error, Result};
use crate::mesh::data::{CellCenteredData, FieldId};

pub trait Problem {
    fn name(&self) -> &'static str;

    /// Set the interior values of `field`; called once before stepping.
    fn init_data(&self, data: &mut CellCenteredData, field: FieldId) -> Result<()>;
}

/// Square wave along x: density 2 over the middle half of the domain,
/// 1 elsewhere. Constant along y, so a 1D-reducible profile.
pub struct Tophat;

impl Problem for Tophat {
    fn name(&self) -> &'static str {
        "tophat"
    }

    fn init_data(&self, data: &mut CellCenteredData, field: FieldId) -> Result<()> {
        let g = data.grid().clone();
        let x_on = g.xmin + 0.25 * (g.xmax - g.xmin);
        let x_off = g.xmin + 0.75 * (g.xmax - g.xmin);
        let a = data.field_mut(field);
        for i in g.ilo..=g.ihi {
            let x = g.x(i);
            let value = if x >= x_on && x < x_off { 2.0 } else { 1.0 };
            for j in g.jlo..=g.jhi {
                a[[i, j]] = value;
            }
        }
        Ok(())
    }
}

/// Gaussian bump centered in the domain on a unit background.
pub struct Gaussian;

impl Problem for Gaussian {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn init_data(&self, data: &mut CellCenteredData, field: FieldId) -> Result<()> {
        let g = data.grid().clone();
        let xc = 0.5 * (g.xmin + g.xmax);
        let yc = 0.5 * (g.ymin + g.ymax);
        let a = data.field_mut(field);
        for i in g.ilo..=g.ihi {
            for j in g.jlo..=g.jhi {
                let r2 = (g.x(i) - xc).powi(2) + (g.y(j) - yc).powi(2);
                a[[i, j]] = 1.0 + (-60.0 * r2).exp();
            }
        }
        Ok(())
    }
}

/// Smooth periodic profile, `1 + 0.5 sin(2 pi x / Lx)`, constant along y.
/// Used by the convergence tests.
pub struct Smooth;

impl Problem for Smooth {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn init_data(&self, data: &mut CellCenteredData, field: FieldId) -> Result<()> {
        let g = data.grid().clone();
        let lx = g.xmax - g.xmin;
        let a = data.field_mut(field);
        for i in g.ilo..=g.ihi {
            let value = 1.0 + 0.5 * (2.0 * std::f64::consts::PI * (g.x(i) - g.xmin) / lx).sin();
            for j in g.jlo..=g.jhi {
                a[[i, j]] = value;
            }
        }
        Ok(())
    }
}

pub fn problem_by_name(name: &str) -> Result<Box<dyn Problem>> {
    match name {
        "tophat" => Ok(Box::new(Tophat)),
        "gaussian" => Ok(Box::new(Gaussian)),
        "smooth" => Ok(Box::new(Smooth)),
        other => Err(Error::UnknownProblem(other.to_string())),
    }
}
