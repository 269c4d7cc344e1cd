use std::fs;

use serde::Deserialize;

use crate::error::Result;
use crate::mesh::boundary::BcPolicy;
use crate::problems::problem_by_name;
use crate::time::RkScheme;

/// Runtime parameters, read from a JSON file.
///
/// Names for the scheme, problem and boundary condition are validated
/// eagerly against their registries so a typo fails before any allocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub nx: usize,
    pub ny: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    /// Advection velocity components.
    pub u: f64,
    pub v: f64,
    pub cfl: f64,
    pub final_time: f64,
    pub final_step: usize,
    pub scheme: String,
    pub problem: String,
    pub bc: String,
    /// Steps between CSV dumps; 0 writes only the initial and final state.
    pub output_interval: usize,
    pub output_prefix: String,
}

impl Default for SolverParams {
    fn default() -> SolverParams {
        SolverParams {
            nx: 32,
            ny: 32,
            xmin: 0.0,
            xmax: 1.0,
            ymin: 0.0,
            ymax: 1.0,
            u: 1.0,
            v: 1.0,
            cfl: 0.8,
            final_time: 1.0,
            final_step: usize::MAX,
            scheme: "rk2".to_string(),
            problem: "tophat".to_string(),
            bc: "periodic".to_string(),
            output_interval: 0,
            output_prefix: "outputs/density".to_string(),
        }
    }
}

impl SolverParams {
    pub fn parse(file_path: &str) -> Result<SolverParams> {
        let file_content = fs::read_to_string(file_path)?;
        let params: SolverParams = serde_json::from_str(&file_content)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        use crate::error::Error::InvalidParameter;
        if self.cfl <= 0.0 || self.cfl > 1.0 {
            return Err(InvalidParameter(format!(
                "cfl must lie in (0, 1], got {}",
                self.cfl
            )));
        }
        if self.final_time < 0.0 {
            return Err(InvalidParameter(format!(
                "final_time must be non-negative, got {}",
                self.final_time
            )));
        }
        RkScheme::from_name(&self.scheme)?;
        problem_by_name(&self.problem)?;
        BcPolicy::from_name(&self.bc)?;
        // reject early with the ghost width the simulation will build with
        crate::mesh::grid::Grid2d::new(
            self.nx,
            self.ny,
            crate::simulation::NG,
            self.xmin,
            self.xmax,
            self.ymin,
            self.ymax,
        )?;
        Ok(())
    }
}
