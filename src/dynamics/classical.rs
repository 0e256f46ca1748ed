use nalgebra::Vector3;

use super::{force_toggles, Dynamics, ForceSelection};
use crate::{
    constants::{StateVector, SINGULARITY_TOLERANCE},
    orbit_type::keplerian_element::KeplerianElements,
    perturbations::{drag::drag_rtn_classical, extra_rtn_acceleration, j2::j2_rtn_classical},
    physical_params::PhysicalParameters,
    satprop_errors::SatpropError,
};

/// Gauss variational equations for the classical elements `(a, e, i, ω, Ω, θ)`.
///
/// With `h = √(mu·p)`, `r = p/(1 + e cos θ)`, `u = ω + θ` and the perturbing
/// acceleration `(F_R, F_T, F_N)` in the RTN frame:
///
/// ```text
/// ȧ = 2a²/h [e sin θ F_R + (p/r) F_T]
/// ė = 1/h [p sin θ F_R + ((p + r) cos θ + r e) F_T]
/// i̇ = r cos u / h · F_N
/// Ω̇ = r sin u / (h sin i) · F_N
/// ω̇ = 1/(e h) [−p cos θ F_R + (p + r) sin θ F_T] − r sin u cos i / (h sin i) · F_N
/// θ̇ = h/r² + 1/(e h) [p cos θ F_R − (p + r) sin θ F_T]
/// ```
///
/// The equations divide by `e` and `sin i`. States with `e` or `|sin i|` below
/// [`SINGULARITY_TOLERANCE`] are rejected with
/// [`SatpropError::SingularClassicalElements`]; such orbits must be propagated with
/// [`EquinoctialDynamics`](crate::dynamics::EquinoctialDynamics).
#[derive(Default)]
pub struct ClassicalDynamics {
    forces: ForceSelection,
}

force_toggles!(ClassicalDynamics);

impl Dynamics<PhysicalParameters, 6> for ClassicalDynamics {
    fn derivative(
        &self,
        state: &StateVector,
        params: &PhysicalParameters,
        t: f64,
    ) -> Result<StateVector, SatpropError> {
        let kep = KeplerianElements::from_vector(state);
        let KeplerianElements {
            semi_major_axis: a,
            eccentricity: e,
            inclination: incl,
            periapsis_argument: peri,
            true_anomaly: theta,
            ..
        } = kep;

        if !(a > 0.0 && a.is_finite()) {
            return Err(SatpropError::NonPositiveSemiMajorAxis(a));
        }
        if !(e < 1.0) {
            return Err(SatpropError::InvalidEccentricity(e));
        }
        let (sin_i, cos_i) = incl.sin_cos();
        if e < SINGULARITY_TOLERANCE || sin_i.abs() < SINGULARITY_TOLERANCE {
            return Err(SatpropError::SingularClassicalElements {
                eccentricity: e,
                inclination: incl,
            });
        }

        let mu = params.mu();
        let p = kep.semi_latus_rectum();
        let ang_mom = (mu * p).sqrt();
        let (sin_t, cos_t) = theta.sin_cos();
        let r = p / (1.0 + e * cos_t);
        let arg_latitude = peri + theta;
        let (sin_u, cos_u) = arg_latitude.sin_cos();

        let mut force = Vector3::zeros();
        if self.forces.j2 {
            force += j2_rtn_classical(r, incl, arg_latitude, params);
        }
        if self.forces.drag {
            force += drag_rtn_classical(p, e, theta, params);
        }
        if !self.forces.extra.is_empty() {
            let cart = kep.to_cartesian(mu)?;
            force += extra_rtn_acceleration(&self.forces.extra, &cart, params, t);
        }
        let (f_r, f_t, f_n) = (force.x, force.y, force.z);

        let a_dot = 2.0 * a * a / ang_mom * (e * sin_t * f_r + p / r * f_t);
        let e_dot = (p * sin_t * f_r + ((p + r) * cos_t + r * e) * f_t) / ang_mom;
        let i_dot = r * cos_u / ang_mom * f_n;
        let node_dot = r * sin_u / (ang_mom * sin_i) * f_n;
        let peri_dot = (-p * cos_t * f_r + (p + r) * sin_t * f_t) / (e * ang_mom)
            - r * sin_u * cos_i / (ang_mom * sin_i) * f_n;
        let theta_dot = ang_mom / (r * r)
            + (p * cos_t * f_r - (p + r) * sin_t * f_t) / (e * ang_mom);

        Ok(StateVector::new(
            a_dot, e_dot, i_dot, peri_dot, node_dot, theta_dot,
        ))
    }
}
