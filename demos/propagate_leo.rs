use std::{env, error::Error};

use satprop::{
    circular_orbit_initial_conditions, propagate, CartesianDynamics, ClassicalDynamics,
    EquinoctialDynamics, OrbitState, PhysicalParameters, Representation, SatpropError,
    Trajectory,
};

/// Command-line options of the demo.
struct Options {
    representation: Representation,
    altitude: f64,
    inclination: f64,
    t_end: f64,
    step: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            representation: Representation::Equinoctial,
            altitude: 500_000.0,
            inclination: 0.0,
            t_end: 86_400.0,
            step: 10.0,
        }
    }
}

fn parse_value(flag: &str, value: Option<String>) -> Result<f64, Box<dyn Error>> {
    let value = value.ok_or_else(|| format!("{flag} expects a value"))?;
    value
        .parse::<f64>()
        .map_err(|err| format!("{flag} expects a number, got '{value}': {err}").into())
}

fn parse_args() -> Result<Options, Box<dyn Error>> {
    let mut options = Options::default();
    let mut args = env::args().skip(1);

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--representation" => {
                let value = args.next().unwrap_or_default();
                options.representation = value.parse()?;
            }
            "--altitude" => options.altitude = parse_value(&flag, args.next())?,
            "--inclination" => options.inclination = parse_value(&flag, args.next())?,
            "--t_end" => options.t_end = parse_value(&flag, args.next())?,
            "--step" => options.step = parse_value(&flag, args.next())?,
            other => log::warn!("ignoring unknown argument '{other}'"),
        }
    }
    Ok(options)
}

fn run(options: &Options, params: &PhysicalParameters) -> Result<Trajectory<6>, SatpropError> {
    let mu = params.mu();
    let initial = circular_orbit_initial_conditions(options.altitude, options.inclination, params)?;
    let start = OrbitState::Cartesian(initial).convert(options.representation, mu)?;
    log::info!("initial state ({}):\n{start}", options.representation);

    let state = start.to_vector();
    let (t_end, step) = (options.t_end, options.step);
    match options.representation {
        Representation::Cartesian => {
            propagate(&CartesianDynamics::new(), &state, params, 0.0, t_end, step)
        }
        Representation::Classical => {
            propagate(&ClassicalDynamics::new(), &state, params, 0.0, t_end, step)
        }
        Representation::Equinoctial => {
            propagate(&EquinoctialDynamics::new(), &state, params, 0.0, t_end, step)
        }
    }
}

/// Propagate a circular LEO orbit with J2 and drag and report the final state.
///
/// Usage:
///   propagate_leo [--representation cartesian|classical|equinoctial]
///                 [--altitude M] [--inclination RAD] [--t_end S] [--step S]
/// Example:
///   cargo run --example propagate_leo -- --representation equinoctial --inclination 0.9
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args()?;
    let params = PhysicalParameters::default();
    let mu = params.mu();

    let trajectory = run(&options, &params)?;
    let Some((t, last)) = trajectory.last() else {
        return Ok(());
    };

    let final_state = OrbitState::from_vector(options.representation, &last);
    let cartesian = final_state.to_cartesian(mu)?;
    let altitude = cartesian.position.norm() - params.earth_radius();

    log::info!(
        "propagated {} samples with step {} s",
        trajectory.len(),
        options.step
    );
    println!("t = {t:.1} s\n{final_state}");
    println!("altitude = {:.3} km", altitude / 1000.0);
    Ok(())
}
