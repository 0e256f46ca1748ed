pub mod constants;
pub mod conversion;
pub mod dynamics;
pub mod integrator;
pub mod kepler;
pub mod orbit_type;
pub mod perturbations;
pub mod physical_params;
pub mod satprop_errors;

pub use conversion::UnitScaling;
pub use dynamics::{CartesianDynamics, ClassicalDynamics, Dynamics, EquinoctialDynamics};
pub use integrator::{propagate, propagate_batch, rk4_step, Trajectory};
pub use orbit_type::{
    cartesian_state::{circular_orbit_initial_conditions, CartesianState},
    cylindrical::{CylindricalAccelerations, CylindricalRates, CylindricalState},
    equinoctial_element::EquinoctialElements,
    keplerian_element::KeplerianElements,
    OrbitState, Representation,
};
pub use physical_params::{PhysicalParameters, PhysicalParametersConfig};
pub use satprop_errors::SatpropError;
