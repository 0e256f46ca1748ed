//! Atmospheric drag with a constant density.
//!
//! ```text
//! F = −½ ρ C_D A |v| v
//! ```
//!
//! The atmosphere is taken at rest in the inertial frame, so the relative velocity is the
//! inertial velocity. In RTN components the velocity of a Keplerian orbit has no normal
//! component, which leaves two in-plane terms computed by [`drag_rtn`].
use nalgebra::Vector3;

use crate::physical_params::PhysicalParameters;

/// Drag **force** in ECI components (N). Divide by the satellite mass for the acceleration.
pub fn drag_force_eci(velocity: &Vector3<f64>, params: &PhysicalParameters) -> Vector3<f64> {
    -0.5 * params.rho() * params.drag_coefficient() * params.reference_area()
        * velocity.norm()
        * velocity
}

/// Drag **acceleration** in RTN components from the radial and transverse velocities.
///
/// `−½ ρ C_D A/m · √(v_r² + v_t²) · (v_r, v_t, 0)`
pub fn drag_rtn(
    radial_velocity: f64,
    transverse_velocity: f64,
    params: &PhysicalParameters,
) -> Vector3<f64> {
    let speed = radial_velocity.hypot(transverse_velocity);
    -params.drag_factor() * speed * Vector3::new(radial_velocity, transverse_velocity, 0.0)
}

/// RTN drag acceleration from classical elements.
///
/// `v_r = √(mu/p) e sin θ`, `v_t = √(mu/p) (1 + e cos θ)`.
pub fn drag_rtn_classical(
    semi_latus_rectum: f64,
    eccentricity: f64,
    true_anomaly: f64,
    params: &PhysicalParameters,
) -> Vector3<f64> {
    let sqrt_mu_p = (params.mu() / semi_latus_rectum).sqrt();
    let (sin_t, cos_t) = true_anomaly.sin_cos();
    drag_rtn(
        sqrt_mu_p * eccentricity * sin_t,
        sqrt_mu_p * (1.0 + eccentricity * cos_t),
        params,
    )
}

/// RTN drag acceleration from equinoctial elements.
///
/// `v_r = √(mu/p) (f sin L − g cos L)`, `v_t = √(mu/p) w` with `w = 1 + f cos L + g sin L`.
pub fn drag_rtn_equinoctial(
    p: f64,
    f: f64,
    g: f64,
    true_longitude: f64,
    params: &PhysicalParameters,
) -> Vector3<f64> {
    let sqrt_mu_p = (params.mu() / p).sqrt();
    let (sin_l, cos_l) = true_longitude.sin_cos();
    let w = 1.0 + f * cos_l + g * sin_l;
    drag_rtn(
        sqrt_mu_p * (f * sin_l - g * cos_l),
        sqrt_mu_p * w,
        params,
    )
}

#[cfg(test)]
mod drag_test {
    use super::*;
    use crate::orbit_type::equinoctial_element::EquinoctialElements;
    use crate::orbit_type::keplerian_element::KeplerianElements;
    use crate::perturbations::rtn_frame;
    use approx::assert_relative_eq;

    #[test]
    fn force_opposes_velocity_quadratically() {
        let params = PhysicalParameters::default();
        let v = Vector3::new(0.0, 7_600.0, 0.0);
        let force = drag_force_eci(&v, &params);

        let expected = 0.5 * params.rho() * params.drag_coefficient() * params.reference_area()
            * 7_600.0_f64.powi(2);
        assert_relative_eq!(force.y, -expected, max_relative = 1e-14);
        assert_eq!(force.x, 0.0);

        let doubled = drag_force_eci(&(2.0 * v), &params);
        assert_relative_eq!(doubled.y, 4.0 * force.y, max_relative = 1e-14);
    }

    #[test]
    fn zero_density_switches_drag_off() {
        let params = PhysicalParameters::builder().rho(0.0).build().unwrap();
        assert_eq!(drag_rtn(10.0, 7_000.0, &params), Vector3::zeros());
    }

    #[test]
    fn rtn_forms_agree_with_eci_force() {
        let params = PhysicalParameters::builder().rho(1e-11).build().unwrap();
        let mu = params.mu();
        let kep = KeplerianElements {
            semi_major_axis: 6_900_000.0,
            eccentricity: 0.05,
            inclination: 0.7,
            periapsis_argument: 2.0,
            ascending_node_longitude: 4.0,
            true_anomaly: 1.0,
        };
        let state = kep.to_cartesian(mu).unwrap();
        let to_eci = rtn_frame(&state.position, &state.velocity).unwrap();
        let eci = drag_force_eci(&state.velocity, &params) / params.satellite_mass();

        let classical = drag_rtn_classical(
            kep.semi_latus_rectum(),
            kep.eccentricity,
            kep.true_anomaly,
            &params,
        );
        assert_relative_eq!(to_eci * classical, eci, epsilon = 1e-18, max_relative = 1e-9);

        let eq = EquinoctialElements::try_from(&kep).unwrap();
        let equinoctial = drag_rtn_equinoctial(eq.p, eq.f, eq.g, eq.l, &params);
        assert_relative_eq!(to_eci * equinoctial, eci, epsilon = 1e-18, max_relative = 1e-9);
    }
}
