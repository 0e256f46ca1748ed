use nalgebra::Vector3;

use super::{force_toggles, Dynamics, ForceSelection};
use crate::{
    constants::StateVector,
    orbit_type::cartesian_state::CartesianState,
    perturbations::{
        drag::drag_force_eci, extra_rtn_acceleration, j2::j2_acceleration_eci, rtn_frame,
    },
    physical_params::PhysicalParameters,
    satprop_errors::SatpropError,
};

/// Newton's law in the ECI frame.
///
/// ```text
/// ṙ = v
/// v̇ = −mu r/|r|³ + a_J2(r) + F_drag(v)/m + R_rtn→eci · u_extra
/// ```
#[derive(Default)]
pub struct CartesianDynamics {
    forces: ForceSelection,
}

force_toggles!(CartesianDynamics);

impl Dynamics<PhysicalParameters, 6> for CartesianDynamics {
    fn derivative(
        &self,
        state: &StateVector,
        params: &PhysicalParameters,
        t: f64,
    ) -> Result<StateVector, SatpropError> {
        let cart = CartesianState::from_vector(state);
        let position = cart.position;
        let velocity = cart.velocity;

        let r = position.norm();
        if r == 0.0 {
            return Err(SatpropError::DegenerateState(
                "satellite at the centre of the Earth".into(),
            ));
        }

        let mut accel: Vector3<f64> = -params.mu() / (r * r * r) * position;

        if self.forces.j2 {
            accel += j2_acceleration_eci(&position, params);
        }
        if self.forces.drag {
            accel += drag_force_eci(&velocity, params) / params.satellite_mass();
        }
        if !self.forces.extra.is_empty() {
            let rtn = extra_rtn_acceleration(&self.forces.extra, &cart, params, t);
            accel += rtn_frame(&position, &velocity)? * rtn;
        }

        Ok(StateVector::new(
            velocity.x, velocity.y, velocity.z, accel.x, accel.y, accel.z,
        ))
    }
}

#[cfg(test)]
mod cartesian_dynamics_test {
    use super::*;
    use crate::perturbations::perturbations_test::ConstantThrust;
    use approx::assert_relative_eq;

    #[test]
    fn two_body_acceleration_points_to_the_centre() {
        let params = PhysicalParameters::builder().unperturbed().build().unwrap();
        let state = StateVector::new(7e6, 0.0, 0.0, 0.0, 7.5e3, 0.0);
        let rate = CartesianDynamics::new().derivative(&state, &params, 0.0).unwrap();

        assert_eq!(rate[1], 7.5e3);
        assert_relative_eq!(rate[3], -params.mu() / 49e12, max_relative = 1e-15);
        assert_eq!(rate[4], 0.0);
        assert_eq!(rate[5], 0.0);
    }

    #[test]
    fn toggles_remove_forces() {
        let params = PhysicalParameters::default();
        let state = StateVector::new(5e6, 3e6, 3e6, -3e3, 6e3, 1e3);

        let full = CartesianDynamics::new().derivative(&state, &params, 0.0).unwrap();
        let bare = CartesianDynamics::new()
            .without_j2()
            .without_drag()
            .derivative(&state, &params, 0.0)
            .unwrap();
        let unperturbed = PhysicalParameters::builder().unperturbed().build().unwrap();
        let reference = CartesianDynamics::new()
            .derivative(&state, &unperturbed, 0.0)
            .unwrap();

        assert_relative_eq!(bare, reference, max_relative = 1e-15);
        assert!((full - bare).norm() > 0.0);
    }

    #[test]
    fn along_track_thrust_is_rotated_into_eci() {
        let params = PhysicalParameters::default();
        let state = StateVector::new(7e6, 0.0, 0.0, 0.0, 7.5e3, 0.0);
        let base = CartesianDynamics::new().without_j2().without_drag();
        let thrust = CartesianDynamics::new()
            .without_j2()
            .without_drag()
            .with_perturbation(Box::new(ConstantThrust(1e-3)));

        let diff = thrust.derivative(&state, &params, 0.0).unwrap()
            - base.derivative(&state, &params, 0.0).unwrap();
        assert_relative_eq!(diff[4], 1e-3, max_relative = 1e-12);
        assert_eq!(diff[3], 0.0);
    }

    #[test]
    fn origin_is_degenerate() {
        let params = PhysicalParameters::default();
        let state = StateVector::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        assert!(matches!(
            CartesianDynamics::new().derivative(&state, &params, 0.0),
            Err(SatpropError::DegenerateState(_))
        ));
    }
}
