//! # Equations of motion
//!
//! The integrator only knows the [`Dynamics`] capability: a right-hand side mapping a state
//! vector, the run parameters and the time to the time derivative of the state. Three
//! implementations share the same physics in different coordinates:
//!
//! - [`CartesianDynamics`]: Newton's law in ECI, `(x, y, z, ẋ, ẏ, ż)`.
//! - [`ClassicalDynamics`]: Gauss variational equations for `(a, e, i, ω, Ω, θ)`; singular
//!   for circular and equatorial orbits.
//! - [`EquinoctialDynamics`]: modified equinoctial equations for `(p, f, g, h, k, L)`,
//!   regular everywhere except at `i = π`.
//!
//! Each dynamics applies J2 and drag by default. Both can be switched off individually,
//! and arbitrary [`RtnPerturbation`] terms can be appended with `with_perturbation`.
//!
//! Any closure with the signature of [`Dynamics::derivative`] is also a dynamics, which is
//! convenient for tests and for one-off models.
//!
//! ## Example
//!
//! ```rust, no_run
//! use satprop::dynamics::{Dynamics, EquinoctialDynamics};
//! use satprop::physical_params::PhysicalParameters;
//! use satprop::constants::StateVector;
//!
//! let params = PhysicalParameters::default();
//! let dynamics = EquinoctialDynamics::new().without_drag();
//! let state = StateVector::new(6.9e6, 0.0, 0.0, 0.3, 0.0, 0.0);
//! let rate = dynamics.derivative(&state, &params, 0.0).unwrap();
//! println!("dL/dt = {}", rate[5]);
//! ```
use nalgebra::SVector;

use crate::{perturbations::RtnPerturbation, satprop_errors::SatpropError};

mod cartesian;
mod classical;
mod equinoctial;

pub use cartesian::CartesianDynamics;
pub use classical::ClassicalDynamics;
pub use equinoctial::EquinoctialDynamics;

/// Right-hand side of a first-order system `ẏ = F(y, P, t)` of dimension `D`.
///
/// Implementations must not keep state between calls: the integrator evaluates them at
/// intermediate points in any order.
pub trait Dynamics<P, const D: usize> {
    /// Time derivative of `state` at time `t` (seconds).
    fn derivative(
        &self,
        state: &SVector<f64, D>,
        params: &P,
        t: f64,
    ) -> Result<SVector<f64, D>, SatpropError>;
}

impl<P, const D: usize, F> Dynamics<P, D> for F
where
    F: Fn(&SVector<f64, D>, &P, f64) -> Result<SVector<f64, D>, SatpropError>,
{
    fn derivative(
        &self,
        state: &SVector<f64, D>,
        params: &P,
        t: f64,
    ) -> Result<SVector<f64, D>, SatpropError> {
        self(state, params, t)
    }
}

/// Which forces a dynamics applies on top of the central attraction.
pub(crate) struct ForceSelection {
    pub(crate) j2: bool,
    pub(crate) drag: bool,
    pub(crate) extra: Vec<Box<dyn RtnPerturbation>>,
}

impl Default for ForceSelection {
    fn default() -> Self {
        Self {
            j2: true,
            drag: true,
            extra: Vec::new(),
        }
    }
}

impl ForceSelection {
    fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.j2 {
            names.push("J2");
        }
        if self.drag {
            names.push("drag");
        }
        names.extend(self.extra.iter().map(|p| p.name()));
        names
    }
}

/// Builder-style force toggles shared by the three dynamics.
macro_rules! force_toggles {
    ($dynamics:ident) => {
        impl $dynamics {
            /// Dynamics with J2 and drag enabled and no extra perturbation.
            pub fn new() -> Self {
                Self::default()
            }

            /// Remove the J2 term.
            pub fn without_j2(mut self) -> Self {
                self.forces.j2 = false;
                self
            }

            /// Remove the drag term.
            pub fn without_drag(mut self) -> Self {
                self.forces.drag = false;
                self
            }

            /// Append an extra RTN perturbation.
            pub fn with_perturbation(
                mut self,
                perturbation: Box<dyn $crate::perturbations::RtnPerturbation>,
            ) -> Self {
                log::debug!(
                    "{}: adding perturbation '{}'",
                    stringify!($dynamics),
                    perturbation.name()
                );
                self.forces.extra.push(perturbation);
                self
            }

            /// Names of the forces applied on top of the central attraction.
            pub fn force_names(&self) -> Vec<&'static str> {
                self.forces.names()
            }
        }

        impl std::fmt::Debug for $dynamics {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($dynamics))
                    .field("forces", &self.forces.names())
                    .finish()
            }
        }
    };
}

pub(crate) use force_toggles;

#[cfg(test)]
mod dynamics_test {
    use super::*;
    use crate::constants::StateVector;
    use crate::perturbations::perturbations_test::ConstantThrust;
    use crate::physical_params::PhysicalParameters;

    #[test]
    fn closures_are_dynamics() {
        let decay = |y: &SVector<f64, 1>, rate: &f64, _t: f64| Ok::<_, SatpropError>(y * -*rate);
        let out = decay.derivative(&SVector::<f64, 1>::new(2.0), &0.5, 0.0).unwrap();
        assert_eq!(out[0], -1.0);
    }

    #[test]
    fn toggles_change_the_force_list() {
        let dynamics = CartesianDynamics::new();
        assert_eq!(dynamics.force_names(), vec!["J2", "drag"]);

        let dynamics = EquinoctialDynamics::new()
            .without_j2()
            .with_perturbation(Box::new(ConstantThrust(1e-7)));
        assert_eq!(dynamics.force_names(), vec!["drag", "constant thrust"]);

        let dynamics = ClassicalDynamics::new().without_j2().without_drag();
        assert!(dynamics.force_names().is_empty());
        assert_eq!(format!("{dynamics:?}"), "ClassicalDynamics { forces: [] }");
    }

    #[test]
    fn trait_objects_are_usable() {
        let params = PhysicalParameters::default();
        let models: Vec<Box<dyn Dynamics<PhysicalParameters, 6>>> = vec![
            Box::new(CartesianDynamics::new()),
            Box::new(ClassicalDynamics::new()),
            Box::new(EquinoctialDynamics::new()),
        ];
        let states = [
            StateVector::new(7e6, 0.0, 0.0, 0.0, 7.5e3, 0.0),
            StateVector::new(7e6, 0.01, 0.5, 0.1, 0.2, 0.3),
            StateVector::new(7e6, 0.0, 0.0, 0.1, 0.0, 0.0),
        ];
        for (model, state) in models.iter().zip(states.iter()) {
            let rate = model.derivative(state, &params, 0.0).unwrap();
            assert!(rate.iter().all(|x| x.is_finite()));
        }
    }
}
