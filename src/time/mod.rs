//! Explicit multi-stage (Runge-Kutta) time integration.
//!
//! The driver is agnostic to the stage count and weights; a scheme is just
//! an explicit Butcher tableau. Stages execute strictly in order and the
//! full-step increment is committed only after every stage succeeds, so a
//! failed step leaves the state container exactly as it was.

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::mesh::data::CellCenteredData;

/// Explicit Butcher tableau.
///
/// `a[k]` holds the weights of previously computed stage derivatives in
/// stage `k`'s input state (strictly lower triangular, so `a[0]` is empty),
/// `b` the final combination weights, `c` the stage time fractions.
#[derive(Debug, Clone)]
pub struct RkScheme {
    pub name: &'static str,
    pub order: usize,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    c: Vec<f64>,
}

impl RkScheme {
    /// Forward Euler, K=1.
    pub fn euler() -> RkScheme {
        RkScheme {
            name: "euler",
            order: 1,
            a: vec![vec![]],
            b: vec![1.0],
            c: vec![0.0],
        }
    }

    /// Explicit midpoint, K=2.
    pub fn rk2() -> RkScheme {
        RkScheme {
            name: "rk2",
            order: 2,
            a: vec![vec![], vec![0.5]],
            b: vec![0.0, 1.0],
            c: vec![0.0, 0.5],
        }
    }

    /// Classical fourth-order scheme, K=4.
    pub fn rk4() -> RkScheme {
        RkScheme {
            name: "rk4",
            order: 4,
            a: vec![
                vec![],
                vec![0.5],
                vec![0.0, 0.5],
                vec![0.0, 0.0, 1.0],
            ],
            b: vec![1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
            c: vec![0.0, 0.5, 0.5, 1.0],
        }
    }

    pub fn from_name(name: &str) -> Result<RkScheme> {
        match name {
            "euler" => Ok(RkScheme::euler()),
            "rk2" => Ok(RkScheme::rk2()),
            "rk4" => Ok(RkScheme::rk4()),
            other => Err(Error::UnknownScheme(other.to_string())),
        }
    }

    pub fn stages(&self) -> usize {
        self.b.len()
    }
}

/// One derivative array per registered field, in slot order, each of
/// padded grid shape with zeroed ghosts.
pub type StageDerivative = Vec<Array2<f64>>;

pub struct Integrator {
    scheme: RkScheme,
}

impl Integrator {
    pub fn new(scheme: RkScheme) -> Integrator {
        Integrator { scheme }
    }

    pub fn scheme(&self) -> &RkScheme {
        &self.scheme
    }

    /// Advance the container by one full time step.
    ///
    /// For each stage in order: build the stage input from the initial
    /// state and the retained derivatives, refresh ghost cells, then
    /// evaluate `rhs(data, stage_time)`. After the last stage the
    /// b-weighted increment is applied on top of the initial state and
    /// ghosts are refreshed once more.
    ///
    /// If any stage fails, the pre-step fields are restored before the
    /// error is returned; partial mutation is never observable.
    pub fn advance<F>(
        &self,
        data: &mut CellCenteredData,
        t: f64,
        dt: f64,
        mut rhs: F,
    ) -> Result<()>
    where
        F: FnMut(&CellCenteredData, f64) -> Result<StageDerivative>,
    {
        let start = data.snapshot();
        match self.run_stages(data, t, dt, &mut rhs, &start) {
            Ok(derivs) => {
                let ids: Vec<_> = data.field_ids().collect();
                data.restore(&start);
                for (n, id) in ids.into_iter().enumerate() {
                    for (k, deriv) in derivs.iter().enumerate() {
                        let w = self.scheme.b[k];
                        if w != 0.0 {
                            data.field_mut(id).scaled_add(dt * w, &deriv[n]);
                        }
                    }
                }
                data.fill_boundary_conditions();
                Ok(())
            }
            Err(err) => {
                data.restore(&start);
                Err(err)
            }
        }
    }

    fn run_stages<F>(
        &self,
        data: &mut CellCenteredData,
        t: f64,
        dt: f64,
        rhs: &mut F,
        start: &[Array2<f64>],
    ) -> Result<Vec<StageDerivative>>
    where
        F: FnMut(&CellCenteredData, f64) -> Result<StageDerivative>,
    {
        let ids: Vec<_> = data.field_ids().collect();
        let mut derivs: Vec<StageDerivative> = Vec::with_capacity(self.scheme.stages());

        for k in 0..self.scheme.stages() {
            data.restore(start);
            for (j, deriv) in derivs.iter().enumerate() {
                let w = self.scheme.a[k][j];
                if w != 0.0 {
                    for (n, id) in ids.iter().enumerate() {
                        data.field_mut(*id).scaled_add(dt * w, &deriv[n]);
                    }
                }
            }
            data.fill_boundary_conditions();

            let stage_t = t + self.scheme.c[k] * dt;
            let deriv = rhs(data, stage_t).map_err(|source| Error::StageFailed {
                stage: k + 1,
                source: Box::new(source),
            })?;
            self.check_derivative(data, &deriv)?;
            derivs.push(deriv);
        }
        Ok(derivs)
    }

    fn check_derivative(&self, data: &CellCenteredData, deriv: &StageDerivative) -> Result<()> {
        if deriv.len() != data.nfields() {
            return Err(Error::DerivativeCountMismatch {
                got: deriv.len(),
                want: data.nfields(),
            });
        }
        let want = data.grid().padded_shape();
        for arr in deriv {
            if arr.dim() != want {
                return Err(Error::ShapeMismatch {
                    got: arr.dim(),
                    want,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::boundary::BcPolicy;
    use crate::mesh::data::FieldId;
    use crate::mesh::grid::Grid2d;

    fn uniform_container(value: f64) -> (CellCenteredData, FieldId) {
        let grid = Grid2d::new(4, 4, 2, 0.0, 1.0, 0.0, 1.0).unwrap();
        let mut data = CellCenteredData::new(grid);
        let id = data.register("density", BcPolicy::Outflow).unwrap();
        data.create().unwrap();
        data.field_mut(id).fill(value);
        data.fill_boundary_conditions();
        (data, id)
    }

    /// du/dt = c * u, which every cell obeys independently.
    fn exponential_rhs(c: f64) -> impl FnMut(&CellCenteredData, f64) -> Result<StageDerivative> {
        move |data, _t| {
            Ok(data
                .field_ids()
                .map(|id| {
                    let mut k = data.field(id).clone();
                    k *= c;
                    k
                })
                .collect())
        }
    }

    #[test]
    fn test_euler_single_step() {
        let (mut data, id) = uniform_container(1.0);
        let integrator = Integrator::new(RkScheme::euler());
        integrator.advance(&mut data, 0.0, 0.1, exponential_rhs(1.0)).unwrap();
        // u + dt*u = 1.1
        assert!((data.field(id)[[2, 2]] - 1.1).abs() < 1e-14);
    }

    #[test]
    fn test_rk4_matches_exponential() {
        let (mut data, id) = uniform_container(1.0);
        let integrator = Integrator::new(RkScheme::rk4());
        let dt = 0.1;
        let n = 10;
        let mut rhs = exponential_rhs(1.0);
        for step in 0..n {
            integrator
                .advance(&mut data, dt * step as f64, dt, &mut rhs)
                .unwrap();
        }
        let expected = (dt * n as f64).exp();
        let got = data.field(id)[[2, 2]];
        assert!(
            (got - expected).abs() < 1e-5,
            "rk4 exponential: expected {expected}, got {got}"
        );
    }

    #[test]
    fn test_scheme_accuracy_ordering() {
        // one step of du/dt = u from 1: compare against exp(dt)
        let dt: f64 = 0.2;
        let exact = dt.exp();
        let mut errors = Vec::new();
        for scheme in [RkScheme::euler(), RkScheme::rk2(), RkScheme::rk4()] {
            let (mut data, id) = uniform_container(1.0);
            Integrator::new(scheme)
                .advance(&mut data, 0.0, dt, exponential_rhs(1.0))
                .unwrap();
            errors.push((data.field(id)[[2, 2]] - exact).abs());
        }
        assert!(errors[0] > errors[1] && errors[1] > errors[2]);
    }

    #[test]
    fn test_failed_stage_leaves_state_untouched() {
        let (mut data, id) = uniform_container(2.0);
        let before = data.field(id).clone();
        let integrator = Integrator::new(RkScheme::rk2());

        let mut calls = 0;
        let result = integrator.advance(&mut data, 0.0, 0.1, |d, _t| {
            calls += 1;
            if calls == 2 {
                return Err(Error::NonFiniteFlux("density".to_string()));
            }
            Ok(vec![d.scratch_array()])
        });

        let err = result.unwrap_err();
        assert!(matches!(err, Error::StageFailed { stage: 2, .. }));
        assert_eq!(data.field(id), &before);
    }

    #[test]
    fn test_stages_run_in_order() {
        let (mut data, _) = uniform_container(0.0);
        let integrator = Integrator::new(RkScheme::rk4());
        let mut times = Vec::new();
        integrator
            .advance(&mut data, 1.0, 0.4, |d, t| {
                times.push(t);
                Ok(vec![d.scratch_array()])
            })
            .unwrap();
        assert_eq!(times, vec![1.0, 1.2, 1.2, 1.4]);
    }

    #[test]
    fn test_derivative_count_checked() {
        let (mut data, _) = uniform_container(0.0);
        let integrator = Integrator::new(RkScheme::euler());
        let result = integrator.advance(&mut data, 0.0, 0.1, |_d, _t| Ok(vec![]));
        assert!(matches!(result, Err(Error::DerivativeCountMismatch { .. })));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(RkScheme::from_name("rk2").unwrap().stages(), 2);
        assert!(matches!(
            RkScheme::from_name("ab3"),
            Err(Error::UnknownScheme(_))
        ));
    }
}
