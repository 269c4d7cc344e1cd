//! # advect2d
//!
//! Structured-grid finite-volume core for scalar advection:
//! - ghost-padded cartesian grid with stencil-indexed (neighbor-shifted)
//!   array views
//! - cell-centered state container with named fields and per-field
//!   boundary policies
//! - conservative flux-divergence update kernel
//! - explicit multi-stage (Runge-Kutta) time integration with atomic
//!   step commit

pub mod error;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod problems;
pub mod simulation;
pub mod time;
pub mod update;

pub use error::{Error, Result};
pub use flux::{FluxEvaluator, UpwindFlux};
pub use io::params_parser::SolverParams;
pub use mesh::{BcPolicy, CellCenteredData, FieldId, Grid2d, StencilView, StencilViewMut};
pub use problems::{Problem, problem_by_name};
pub use simulation::{Simulation, substep};
pub use time::{Integrator, RkScheme};
pub use update::flux_divergence;
