use advect2d::error::Result;
use advect2d::io::params_parser::SolverParams;
use advect2d::simulation::Simulation;

fn run(param_path: &str) -> Result<()> {
    let params = SolverParams::parse(param_path)?;
    println!(
        "advecting `{}` on a {}x{} grid with scheme `{}`",
        params.problem, params.nx, params.ny, params.scheme
    );
    let mut simulation = Simulation::new(params)?;
    simulation.run()
}

fn main() {
    let param_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inputs/solverparam.json".to_string());
    if let Err(err) = run(&param_path) {
        eprintln!("advect2d: {err}");
        std::process::exit(1);
    }
}
